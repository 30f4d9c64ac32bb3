//! Shared types used across TradeHub crates.

pub mod filter;
pub mod response;
pub mod sorting;

pub use filter::{Filter, FilteredResult};
pub use response::ApiResponse;
pub use sorting::SortDirection;
