//! Storage aggregator: one pool, every repository.

use tracing::info;

use tradehub_core::config::DatabaseConfig;
use tradehub_core::error::AppError;
use tradehub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::repositories::{
    CustomerRepository, InvoiceRepository, ProductRepository, UserRepository,
};

/// Composes all entity repositories behind one handle.
///
/// Owns the shared connection pool and is the only place it is opened.
/// Construction fails fast: an unrecognized engine is rejected before a
/// connection is attempted, and a connection failure is returned as an
/// error rather than aborting the process.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: DatabasePool,
    users: UserRepository,
    customers: CustomerRepository,
    products: ProductRepository,
    invoices: InvoiceRepository,
}

impl Storage {
    /// Open the configured backend and construct every repository over it.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.engine.as_str() {
            "" => {
                return Err(AppError::configuration("database engine not selected"));
            }
            "postgres" => {}
            other => {
                return Err(AppError::configuration(format!(
                    "database engine '{other}' not implemented"
                )));
            }
        }

        let db = DatabasePool::connect(config).await?;
        let pool = db.pool().clone();

        info!("Storage initialized (engine: postgres)");

        Ok(Self {
            users: UserRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            invoices: InvoiceRepository::new(pool),
            pool: db,
        })
    }

    /// The user repository.
    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// The customer repository.
    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    /// The product repository.
    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    /// The invoice repository.
    pub fn invoices(&self) -> &InvoiceRepository {
        &self.invoices
    }

    /// The shared pool handle.
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.pool.health_check().await
    }

    /// Close the shared pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
