//! Product business service.

use std::sync::Arc;

use tracing::info;

use tradehub_core::error::{AppError, Resource};
use tradehub_core::result::AppResult;
use tradehub_core::types::filter::{Filter, FilteredResult};
use tradehub_database::repositories::ProductRepository;
use tradehub_entity::product::{CreateProduct, Product, UpdateProduct};

use crate::validate;

/// Handles product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductService {
    repo: Arc<ProductRepository>,
}

impl ProductService {
    /// Create a new product service.
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        Self { repo }
    }

    /// Add a new product to the catalog.
    pub async fn add(&self, data: CreateProduct) -> AppResult<Product> {
        validate(&data)?;

        let product = self.repo.create(&data).await?;
        info!(product_id = product.id, "Product added");
        Ok(product)
    }

    /// Find a product by id.
    pub async fn find(&self, id: i64) -> AppResult<Product> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::Product,
                format!("Product {id} not found"),
            ));
        }
        self.repo.find_by_id(id).await
    }

    /// List products with pagination.
    pub async fn list(&self, filter: &Filter) -> AppResult<FilteredResult<Product>> {
        self.repo.find_all(filter).await
    }

    /// Replace a product's business fields.
    pub async fn update(&self, id: i64, data: UpdateProduct) -> AppResult<Product> {
        validate(&data)?;

        let current = self.find(id).await?;
        let updated = self
            .repo
            .update(&Product {
                name: data.name,
                observations: data.observations,
                price: data.price,
                ..current
            })
            .await?;

        info!(product_id = id, "Product updated");
        Ok(updated)
    }

    /// Remove a product by id.
    pub async fn remove(&self, id: i64) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::not_found(
                Resource::Product,
                format!("Product {id} not found"),
            ));
        }
        self.repo.delete(id).await?;
        info!(product_id = id, "Product removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPool;
    use tradehub_core::error::ErrorKind;

    fn service() -> ProductService {
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        ProductService::new(Arc::new(ProductRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_add_rejects_nameless_product_before_storage() {
        let err = service()
            .add(CreateProduct {
                name: String::new(),
                observations: None,
                price: 1.0,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_add_rejects_negative_price_before_storage() {
        let err = service()
            .add(CreateProduct {
                name: "Coffee".to_string(),
                observations: None,
                price: -0.5,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
