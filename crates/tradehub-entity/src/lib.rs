//! # tradehub-entity
//!
//! Domain entity models for TradeHub: users, customers, products, and
//! invoices. Entities are plain value objects with no storage
//! back-references.
//!
//! Each model carries a hand-written [`sqlx::FromRow`] implementation
//! that decodes columns **by position** in the fixed table order, so the
//! same decode path serves both single-row and multi-row queries.
//! Nullable audit timestamps (`updated_at`, `deleted_at`) map to
//! `Option<DateTime<Utc>>`; `None` means "never updated" / "not deleted".

pub mod customer;
pub mod invoice;
pub mod product;
pub mod user;
