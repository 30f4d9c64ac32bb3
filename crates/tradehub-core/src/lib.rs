//! # tradehub-core
//!
//! Core crate for TradeHub. Contains configuration schemas, the
//! pagination/sort/filter types used by every repository, the API
//! response envelope, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TradeHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
