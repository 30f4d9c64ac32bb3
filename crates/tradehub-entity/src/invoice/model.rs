//! Composite invoice model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::header::InvoiceHeader;
use super::item::{CreateInvoiceItem, InvoiceItem};

/// A complete invoice: header plus line items.
///
/// The header and items live in separate tables and are written
/// separately; the composite write is best-effort, not atomic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// The invoice header.
    pub header: InvoiceHeader,
    /// The line items belonging to the header.
    pub items: Vec<InvoiceItem>,
}

/// Data required to generate a new invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoice {
    /// The billed customer's id.
    #[validate(range(min = 1, message = "client id is required"))]
    pub client_id: i64,
    /// Requested line items. At least one is required.
    #[validate(length(min = 1, message = "invoice needs at least one item"), nested)]
    pub items: Vec<CreateInvoiceItem>,
}
