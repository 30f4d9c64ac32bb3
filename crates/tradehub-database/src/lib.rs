//! # tradehub-database
//!
//! PostgreSQL connection management, concrete repository implementations
//! for all TradeHub entities, and the [`Storage`] aggregator that owns
//! the shared pool.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod storage;

pub use connection::DatabasePool;
pub use storage::Storage;
