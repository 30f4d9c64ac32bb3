//! Invoice entity: a header referencing a customer plus its line items.

pub mod header;
pub mod item;
pub mod model;

pub use header::InvoiceHeader;
pub use item::{CreateInvoiceItem, InvoiceItem};
pub use model::{CreateInvoice, Invoice};
