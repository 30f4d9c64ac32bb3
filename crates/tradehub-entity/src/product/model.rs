//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;
use validator::Validate;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Storage-assigned surrogate key. Non-zero after creation.
    pub id: i64,
    /// Externally-visible stable identifier, generated at creation.
    pub uuid: Uuid,
    /// Product name.
    pub name: String,
    /// Free-form notes about the product.
    pub observations: Option<String>,
    /// Unit price.
    pub price: f64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated. `None` means never updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker. `None` means not deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

// Column order: (id, uuid, name, observations, price, created_at,
// updated_at, deleted_at); must match the products table schema.
impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            uuid: row.try_get(1)?,
            name: row.try_get(2)?,
            observations: row.try_get(3)?,
            price: row.try_get(4)?,
            created_at: row.try_get(5)?,
            updated_at: row.try_get(6)?,
            deleted_at: row.try_get(7)?,
        })
    }
}

/// Data required to add a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProduct {
    /// Product name.
    #[validate(length(min = 1, message = "the product has no name"))]
    pub name: String,
    /// Free-form notes about the product.
    pub observations: Option<String>,
    /// Unit price. Must not be negative.
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

/// Whole-row replacement of a product's business fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    /// New product name.
    #[validate(length(min = 1, message = "the product has no name"))]
    pub name: String,
    /// New notes.
    pub observations: Option<String>,
    /// New unit price.
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nameless_product_rejected() {
        let data = CreateProduct {
            name: String::new(),
            observations: None,
            price: 9.99,
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let data = CreateProduct {
            name: "Coffee".to_string(),
            observations: None,
            price: -1.0,
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_valid_product_passes() {
        let data = CreateProduct {
            name: "Coffee".to_string(),
            observations: Some("beans, 1kg".to_string()),
            price: 12.50,
        };
        assert!(data.validate().is_ok());
    }
}
