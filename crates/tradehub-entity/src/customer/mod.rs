//! Customer entity.

pub mod model;

pub use model::{CreateCustomer, Customer, UpdateCustomer};
