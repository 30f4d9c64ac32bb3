//! Invoice repositories: header, items, and the composite wrapper.
//!
//! Header and items are written in separate statements with no enclosing
//! transaction; a failed item insert leaves the already-written header
//! behind. Callers are expected to treat invoice creation as best-effort.

use chrono::Utc;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_entity::invoice::{CreateInvoice, Invoice, InvoiceHeader, InvoiceItem};

use super::storage_err;

/// Columns callers may sort the invoice list by.
const SORTABLE_COLUMNS: &[&str] = &["id", "client_id", "created_at", "updated_at"];
/// Sort column applied when the filter does not name one.
const DEFAULT_SORT: &str = "created_at";

/// Fixed select list matching the positional decode order of `InvoiceHeader`.
const HEADER_COLUMNS: &str = "id, uuid, client_id, created_at, updated_at, deleted_at";

/// Repository for invoice header rows.
#[derive(Debug, Clone)]
pub struct InvoiceHeaderRepository {
    pool: PgPool,
}

impl InvoiceHeaderRepository {
    /// Create a new invoice header repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a header for the given customer and return it.
    pub async fn create(&self, client_id: i64) -> AppResult<InvoiceHeader> {
        let uuid = Uuid::new_v4();
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO invoice_headers (uuid, client_id, created_at) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(uuid)
        .bind(client_id)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err("Failed to create invoice header"))?;

        Ok(InvoiceHeader {
            id,
            uuid,
            client_id,
            created_at,
            updated_at: None,
            deleted_at: None,
        })
    }

    /// Find a header by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<InvoiceHeader> {
        sqlx::query_as::<_, InvoiceHeader>(&format!(
            "SELECT {HEADER_COLUMNS} FROM invoice_headers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to find invoice by id"))?
        .ok_or_else(|| AppError::not_found(Resource::Invoice, format!("Invoice {id} not found")))
    }

    /// List headers with pagination and sorting.
    pub async fn find_all(&self, filter: &Filter) -> AppResult<FilteredResult<InvoiceHeader>> {
        let order = filter.order_by(SORTABLE_COLUMNS, DEFAULT_SORT)?;
        let query = format!(
            "SELECT {HEADER_COLUMNS} FROM invoice_headers ORDER BY {order} {} LIMIT $1 OFFSET $2",
            filter.direction.as_sql()
        );

        let headers = sqlx::query_as::<_, InvoiceHeader>(&query)
            .bind(filter.limit() as i64)
            .bind(filter.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err("Failed to list invoices"))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoice_headers")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count invoices"))?;

        Ok(filter.paginate(headers, total as u64))
    }

    /// Re-point a header at another customer and stamp `updated_at`.
    pub async fn update(&self, header: &InvoiceHeader) -> AppResult<InvoiceHeader> {
        let updated_at = Utc::now();

        let result =
            sqlx::query("UPDATE invoice_headers SET client_id = $2, updated_at = $3 WHERE id = $1")
                .bind(header.id)
                .bind(header.client_id)
                .bind(updated_at)
                .execute(&self.pool)
                .await
                .map_err(storage_err("Failed to update invoice header"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::Invoice,
                format!("Invoice {} not found", header.id),
            ));
        }

        Ok(InvoiceHeader {
            updated_at: Some(updated_at),
            ..header.clone()
        })
    }

    /// Hard-delete a header by id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM invoice_headers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete invoice header"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::Invoice,
                format!("Invoice {id} not found"),
            ));
        }
        Ok(())
    }
}

/// Repository for invoice line items.
#[derive(Debug, Clone)]
pub struct InvoiceItemRepository {
    pool: PgPool,
}

impl InvoiceItemRepository {
    /// Create a new invoice item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one line item bound to a header.
    pub async fn create(&self, invoice_header_id: i64, product_id: i64) -> AppResult<InvoiceItem> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO invoice_items (invoice_header_id, product_id) \
             VALUES ($1, $2) RETURNING id",
        )
        .bind(invoice_header_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err("Failed to create invoice item"))?;

        Ok(InvoiceItem {
            id,
            invoice_header_id,
            product_id,
        })
    }

    /// List all items belonging to a header.
    pub async fn find_by_header(&self, invoice_header_id: i64) -> AppResult<Vec<InvoiceItem>> {
        sqlx::query_as::<_, InvoiceItem>(
            "SELECT id, invoice_header_id, product_id FROM invoice_items \
             WHERE invoice_header_id = $1 ORDER BY id ASC",
        )
        .bind(invoice_header_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list invoice items"))
    }

    /// Delete every item belonging to a header. Zero rows is not an error;
    /// a header may legitimately have had its items removed already.
    pub async fn delete_by_header(&self, invoice_header_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM invoice_items WHERE invoice_header_id = $1")
            .bind(invoice_header_id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete invoice items"))?;
        Ok(result.rows_affected())
    }
}

/// Composite repository exposing invoices as header-plus-items values.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    header: InvoiceHeaderRepository,
    items: InvoiceItemRepository,
}

impl InvoiceRepository {
    /// Create a new composite invoice repository over a shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            header: InvoiceHeaderRepository::new(pool.clone()),
            items: InvoiceItemRepository::new(pool),
        }
    }

    /// Generate a new invoice: header first, then each item.
    ///
    /// Not atomic. If an item insert fails the header stays behind; the
    /// partial state is logged and the error returned unchanged.
    pub async fn create(&self, data: &CreateInvoice) -> AppResult<Invoice> {
        let header = self.header.create(data.client_id).await?;

        let mut items = Vec::with_capacity(data.items.len());
        for item in &data.items {
            match self.items.create(header.id, item.product_id).await {
                Ok(created) => items.push(created),
                Err(e) => {
                    warn!(
                        invoice_id = header.id,
                        product_id = item.product_id,
                        "Invoice item insert failed, header left behind"
                    );
                    return Err(e);
                }
            }
        }

        Ok(Invoice { header, items })
    }

    /// Load a complete invoice by header id.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Invoice> {
        let header = self.header.find_by_id(id).await?;
        let items = self.items.find_by_header(id).await?;
        Ok(Invoice { header, items })
    }

    /// List invoice headers with pagination. Items are loaded on demand
    /// via [`InvoiceRepository::find_by_id`].
    pub async fn find_all(&self, filter: &Filter) -> AppResult<FilteredResult<InvoiceHeader>> {
        self.header.find_all(filter).await
    }

    /// Re-point an invoice at another customer.
    pub async fn update(&self, header: &InvoiceHeader) -> AppResult<InvoiceHeader> {
        self.header.update(header).await
    }

    /// Delete an invoice: items first, then the header.
    ///
    /// The two deletes are separate statements; a failure between them
    /// can leave a header without items.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.items.delete_by_header(id).await?;
        self.header.delete(id).await
    }
}
