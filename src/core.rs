//! Pool bootstrap
//!
//! [`FastPost`] owns the connection pool and hands out the store and the
//! business layer built on it.

use std::sync::Arc;
use std::time::Duration;

use config::{AppConfig, DatabaseConfig, StoreConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use store_object::{DataStore, TenantBinding};

use crate::biz::{Biz, PasswordHasher, TokenSigner};
use crate::errors::AppError;
use crate::store::Store;

pub struct FastPost {
    pool: PgPool,
    store_config: StoreConfig,
}

impl FastPost {
    /// Connect using both sections of `config`
    pub async fn new(config: &AppConfig) -> Result<Self, AppError> {
        let pool = Self::connect(&config.database).await?;
        Ok(Self {
            pool,
            store_config: config.store.clone(),
        })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool, store_config: StoreConfig) -> Self {
        Self { pool, store_config }
    }

    /// Build the connection pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, AppError> {
        let connection_string = config.connection_string();

        let mut pool_options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        if let Some(schema) = config.schema.clone() {
            // validated as a plain identifier by DatabaseConfig
            pool_options = pool_options.after_connect(move |conn, _meta| {
                let statement = format!("SET search_path TO \"{}\"", schema);
                Box::pin(async move {
                    conn.execute(statement.as_str()).await?;
                    Ok(())
                })
            });
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::info!(
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "connected to database"
        );
        Ok(pool)
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn store_config(&self) -> &StoreConfig {
        &self.store_config
    }

    /// Data store with the configured tenant binding, if any
    pub fn datastore(&self) -> DataStore {
        let datastore = DataStore::new(self.pool.clone());
        match &self.store_config.tenant_key {
            Some(key) => datastore.with_tenant(TenantBinding::user_scoped(key.as_str())),
            None => datastore,
        }
    }

    pub fn store(&self) -> Store {
        Store::new(self.datastore())
    }

    pub fn biz(&self, hasher: Arc<dyn PasswordHasher>, signer: Arc<dyn TokenSigner>) -> Biz {
        Biz::new(
            Arc::new(self.store()),
            hasher,
            signer,
            self.store_config.max_fanout_concurrency,
        )
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        crate::migration::migrate(&self.pool).await
    }
}
