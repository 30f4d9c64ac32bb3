//! Invoice business service.
//!
//! Generating an invoice checks that the billed customer and every
//! referenced product exist before the repository writes anything. The
//! write itself is best-effort: header and items are separate inserts.

use std::sync::Arc;

use tracing::info;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_database::repositories::{
    CustomerRepository, InvoiceRepository, ProductRepository,
};
use tradehub_entity::invoice::{CreateInvoice, Invoice, InvoiceHeader};

use crate::validate;

/// Handles invoice generation and lookup.
#[derive(Debug, Clone)]
pub struct InvoiceService {
    invoices: Arc<InvoiceRepository>,
    customers: Arc<CustomerRepository>,
    products: Arc<ProductRepository>,
}

impl InvoiceService {
    /// Create a new invoice service.
    pub fn new(
        invoices: Arc<InvoiceRepository>,
        customers: Arc<CustomerRepository>,
        products: Arc<ProductRepository>,
    ) -> Self {
        Self {
            invoices,
            customers,
            products,
        }
    }

    /// Generate an invoice for an existing customer and existing products.
    pub async fn generate(&self, data: CreateInvoice) -> AppResult<Invoice> {
        validate(&data)?;

        self.customers.find_by_id(data.client_id).await?;
        for item in &data.items {
            self.products.find_by_id(item.product_id).await?;
        }

        let invoice = self.invoices.create(&data).await?;
        info!(
            invoice_id = invoice.header.id,
            client_id = invoice.header.client_id,
            items = invoice.items.len(),
            "Invoice generated"
        );
        Ok(invoice)
    }

    /// Load a complete invoice by id.
    pub async fn find(&self, id: i64) -> AppResult<Invoice> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::Invoice,
                format!("Invoice {id} not found"),
            ));
        }
        self.invoices.find_by_id(id).await
    }

    /// List invoice headers with pagination.
    pub async fn list(&self, filter: &Filter) -> AppResult<FilteredResult<InvoiceHeader>> {
        self.invoices.find_all(filter).await
    }

    /// Remove an invoice and its items by id.
    pub async fn remove(&self, id: i64) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::Invoice,
                format!("Invoice {id} not found"),
            ));
        }
        self.invoices.delete(id).await?;
        info!(invoice_id = id, "Invoice removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPool;
    use tradehub_core::error::ErrorKind;
    use tradehub_entity::invoice::CreateInvoiceItem;

    fn service() -> InvoiceService {
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        InvoiceService::new(
            Arc::new(InvoiceRepository::new(pool.clone())),
            Arc::new(CustomerRepository::new(pool.clone())),
            Arc::new(ProductRepository::new(pool)),
        )
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_item_list_before_storage() {
        let err = service()
            .generate(CreateInvoice {
                client_id: 1,
                items: Vec::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_product_id_before_storage() {
        let err = service()
            .generate(CreateInvoice {
                client_id: 1,
                items: vec![CreateInvoiceItem { product_id: 0 }],
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_find_rejects_non_positive_id() {
        let err = service().find(0).await.unwrap_err();
        assert!(err.is_not_found(Resource::Invoice));
    }
}
