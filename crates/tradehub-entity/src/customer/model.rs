//! Customer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;
use validator::Validate;

/// A customer who can be billed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Storage-assigned surrogate key. Non-zero after creation.
    pub id: i64,
    /// Externally-visible stable identifier, generated at creation.
    pub uuid: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated. `None` means never updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker. `None` means not deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

// Column order: (id, uuid, first_name, last_name, email, created_at,
// updated_at, deleted_at); must match the customers table schema.
impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            uuid: row.try_get(1)?,
            first_name: row.try_get(2)?,
            last_name: row.try_get(3)?,
            email: row.try_get(4)?,
            created_at: row.try_get(5)?,
            updated_at: row.try_get(6)?,
            deleted_at: row.try_get(7)?,
        })
    }
}

/// Data required to register a new customer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCustomer {
    /// Given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "email not valid"))]
    pub email: String,
}

/// Whole-row replacement of a customer's business fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCustomer {
    /// New given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    /// New family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// New email address.
    #[validate(email(message = "email not valid"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_last_name_rejected() {
        let data = CreateCustomer {
            first_name: "Grace".to_string(),
            last_name: String::new(),
            email: "grace@example.com".to_string(),
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_valid_customer_passes() {
        let data = CreateCustomer {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
        };
        assert!(data.validate().is_ok());
    }
}
