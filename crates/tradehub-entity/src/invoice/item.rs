//! Invoice line item model.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

/// A line item on an invoice, referencing one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Storage-assigned surrogate key.
    pub id: i64,
    /// The owning invoice header's id.
    pub invoice_header_id: i64,
    /// The billed product's id.
    pub product_id: i64,
}

// Column order: (id, invoice_header_id, product_id); must match the
// invoice_items table schema.
impl<'r> FromRow<'r, PgRow> for InvoiceItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            invoice_header_id: row.try_get(1)?,
            product_id: row.try_get(2)?,
        })
    }
}

/// One requested line item when generating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceItem {
    /// The billed product's id.
    #[validate(range(min = 1, message = "product id is required"))]
    pub product_id: i64,
}
