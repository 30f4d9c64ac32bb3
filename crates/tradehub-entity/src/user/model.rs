//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;
use validator::Validate;

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
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
    /// Password. Never serialized out.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated. `None` means never updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker. `None` means not deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// The user's full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Column order: (id, uuid, first_name, last_name, email, password,
// created_at, updated_at, deleted_at); must match the users table schema.
impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            uuid: row.try_get(1)?,
            first_name: row.try_get(2)?,
            last_name: row.try_get(3)?,
            email: row.try_get(4)?,
            password: row.try_get(5)?,
            created_at: row.try_get(6)?,
            updated_at: row.try_get(7)?,
            deleted_at: row.try_get(8)?,
        })
    }
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "email not valid"))]
    pub email: String,
    /// Password in the representation the storage expects.
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Whole-row replacement of a user's business fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    /// New given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    /// New family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// New email address.
    #[validate(email(message = "email not valid"))]
    pub email: String,
    /// New password.
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}
