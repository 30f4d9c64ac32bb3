//! Repository implementations for all TradeHub entities.

pub mod customer;
pub mod invoice;
pub mod product;
pub mod user;

pub use customer::CustomerRepository;
pub use invoice::{InvoiceHeaderRepository, InvoiceItemRepository, InvoiceRepository};
pub use product::ProductRepository;
pub use user::UserRepository;

use tradehub_core::error::{AppError, ErrorKind};

/// Classify a sqlx failure into the application error taxonomy.
///
/// Pool acquisition deadlines become `Timeout`, row-decode failures
/// become `Scan` (with the sqlx cause attached), everything else is
/// `Database`. `RowNotFound` never reaches this path: single-row reads
/// go through `fetch_optional` and map misses to per-entity not-found.
pub(crate) fn storage_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::PoolTimedOut => AppError::with_source(ErrorKind::Timeout, context, e),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => AppError::with_source(ErrorKind::Scan, context, e),
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}
