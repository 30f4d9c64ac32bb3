//! Invoice header model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

/// The header row of an invoice, referencing the billed customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceHeader {
    /// Storage-assigned surrogate key. Non-zero after creation.
    pub id: i64,
    /// Externally-visible stable identifier, generated at creation.
    pub uuid: Uuid,
    /// The billed customer's id.
    pub client_id: i64,
    /// When the invoice was created.
    pub created_at: DateTime<Utc>,
    /// When the invoice was last updated. `None` means never updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker. `None` means not deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

// Column order: (id, uuid, client_id, created_at, updated_at, deleted_at);
// must match the invoice_headers table schema.
impl<'r> FromRow<'r, PgRow> for InvoiceHeader {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            uuid: row.try_get(1)?,
            client_id: row.try_get(2)?,
            created_at: row.try_get(3)?,
            updated_at: row.try_get(4)?,
            deleted_at: row.try_get(5)?,
        })
    }
}
