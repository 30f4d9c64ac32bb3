//! Product repository implementation.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_entity::product::{CreateProduct, Product};

use super::storage_err;

/// Columns callers may sort the product list by.
const SORTABLE_COLUMNS: &[&str] = &["id", "name", "price", "created_at", "updated_at"];
/// Sort column applied when the filter does not name one.
const DEFAULT_SORT: &str = "created_at";

/// Fixed select list matching the positional decode order of `Product`.
const PRODUCT_COLUMNS: &str =
    "id, uuid, name, observations, price, created_at, updated_at, deleted_at";

/// Repository for product CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product and return it with its storage-assigned id.
    pub async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        let uuid = Uuid::new_v4();
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (uuid, name, observations, price, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(uuid)
        .bind(&data.name)
        .bind(&data.observations)
        .bind(data.price)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err("Failed to create product"))?;

        Ok(Product {
            id,
            uuid,
            name: data.name.clone(),
            observations: data.observations.clone(),
            price: data.price,
            created_at,
            updated_at: None,
            deleted_at: None,
        })
    }

    /// Find a product by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to find product by id"))?
        .ok_or_else(|| AppError::not_found(Resource::Product, format!("Product {id} not found")))
    }

    /// List products with pagination and sorting.
    pub async fn find_all(&self, filter: &Filter) -> AppResult<FilteredResult<Product>> {
        let order = filter.order_by(SORTABLE_COLUMNS, DEFAULT_SORT)?;
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY {order} {} LIMIT $1 OFFSET $2",
            filter.direction.as_sql()
        );

        let products = sqlx::query_as::<_, Product>(&query)
            .bind(filter.limit() as i64)
            .bind(filter.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err("Failed to list products"))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count products"))?;

        Ok(filter.paginate(products, total as u64))
    }

    /// Overwrite a product's business fields and stamp `updated_at`.
    pub async fn update(&self, product: &Product) -> AppResult<Product> {
        let updated_at = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET name = $2, observations = $3, price = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.observations)
        .bind(product.price)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update product"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::Product,
                format!("Product {} not found", product.id),
            ));
        }

        Ok(Product {
            updated_at: Some(updated_at),
            ..product.clone()
        })
    }

    /// Hard-delete a product by id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete product"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                Resource::Product,
                format!("Product {id} not found"),
            ));
        }
        Ok(())
    }
}
