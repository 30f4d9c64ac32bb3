//! Customer repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_entity::customer::{CreateCustomer, Customer};

use super::storage_err;

/// Columns callers may sort the customer list by.
const SORTABLE_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "created_at",
    "updated_at",
];
/// Sort column applied when the filter does not name one.
const DEFAULT_SORT: &str = "created_at";

/// Fixed select list matching the positional decode order of `Customer`.
const CUSTOMER_COLUMNS: &str =
    "id, uuid, first_name, last_name, email, created_at, updated_at, deleted_at";

/// Repository for customer CRUD and query operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new customer and return it with its storage-assigned id.
    pub async fn create(&self, data: &CreateCustomer) -> AppResult<Customer> {
        let uuid = Uuid::new_v4();
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO customers (uuid, first_name, last_name, email, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(uuid)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err("Failed to create customer"))?;

        Ok(Customer {
            id,
            uuid,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            created_at,
            updated_at: None,
            deleted_at: None,
        })
    }

    /// Find a customer by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to find customer by id"))?
        .ok_or_else(|| AppError::not_found(Resource::Customer, format!("Customer {id} not found")))
    }

    /// List customers with pagination and sorting.
    pub async fn find_all(&self, filter: &Filter) -> AppResult<FilteredResult<Customer>> {
        let order = filter.order_by(SORTABLE_COLUMNS, DEFAULT_SORT)?;
        let query = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY {order} {} LIMIT $1 OFFSET $2",
            filter.direction.as_sql()
        );

        let customers = sqlx::query_as::<_, Customer>(&query)
            .bind(filter.limit() as i64)
            .bind(filter.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err("Failed to list customers"))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count customers"))?;

        Ok(filter.paginate(customers, total as u64))
    }

    /// Overwrite a customer's business fields and stamp `updated_at`.
    pub async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        let updated_at = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET first_name = $2, last_name = $3, email = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update customer"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::Customer,
                format!("Customer {} not found", customer.id),
            ));
        }

        Ok(Customer {
            updated_at: Some(updated_at),
            ..customer.clone()
        })
    }

    /// Hard-delete a customer by id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete customer"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::Customer,
                format!("Customer {id} not found"),
            ));
        }
        Ok(())
    }
}
