//! # tradehub-service
//!
//! Business logic services for TradeHub. Each service validates
//! caller-supplied data, applies defaults, and orchestrates repository
//! calls; repositories never see unvalidated input.

pub mod customer;
pub mod invoice;
pub mod product;
pub mod user;

pub use customer::CustomerService;
pub use invoice::InvoiceService;
pub use product::ProductService;
pub use user::UserService;

use tradehub_core::error::AppError;
use tradehub_core::result::AppResult;

/// Run `validator` rules on a payload, mapping failures into the
/// application's validation error kind.
pub(crate) fn validate(payload: &impl validator::Validate) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
