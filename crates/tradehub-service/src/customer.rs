//! Customer business service.

use std::sync::Arc;

use tracing::info;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_database::repositories::CustomerRepository;
use tradehub_entity::customer::{CreateCustomer, Customer, UpdateCustomer};

use crate::validate;

/// Handles customer lifecycle operations.
#[derive(Debug, Clone)]
pub struct CustomerService {
    repo: Arc<CustomerRepository>,
}

impl CustomerService {
    /// Create a new customer service.
    pub fn new(repo: Arc<CustomerRepository>) -> Self {
        Self { repo }
    }

    /// Register a new customer.
    pub async fn add(&self, data: CreateCustomer) -> AppResult<Customer> {
        validate(&data)?;

        let customer = self.repo.create(&data).await?;
        info!(customer_id = customer.id, "Customer added");
        Ok(customer)
    }

    /// Find a customer by id.
    pub async fn find(&self, id: i64) -> AppResult<Customer> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::Customer,
                format!("Customer {id} not found"),
            ));
        }
        self.repo.find_by_id(id).await
    }

    /// List customers with pagination.
    pub async fn list(&self, filter: &Filter) -> AppResult<FilteredResult<Customer>> {
        self.repo.find_all(filter).await
    }

    /// Replace a customer's business fields.
    pub async fn update(&self, id: i64, data: UpdateCustomer) -> AppResult<Customer> {
        validate(&data)?;

        let current = self.find(id).await?;
        let updated = self
            .repo
            .update(&Customer {
                first_name: data.first_name,
                last_name: data.last_name,
                email: data.email,
                ..current
            })
            .await?;

        info!(customer_id = id, "Customer updated");
        Ok(updated)
    }

    /// Remove a customer by id.
    pub async fn remove(&self, id: i64) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::Customer,
                format!("Customer {id} not found"),
            ));
        }
        self.repo.delete(id).await?;
        info!(customer_id = id, "Customer removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPool;
    use tradehub_core::error::ErrorKind;

    fn service() -> CustomerService {
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        CustomerService::new(Arc::new(CustomerRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_add_rejects_empty_fields_before_storage() {
        let err = service()
            .add(CreateCustomer {
                first_name: String::new(),
                last_name: String::new(),
                email: "grace@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_find_rejects_non_positive_id() {
        let err = service().find(0).await.unwrap_err();
        assert!(err.is_not_found(Resource::Customer));
    }
}
