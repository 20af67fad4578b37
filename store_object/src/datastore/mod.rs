//! Transaction-scoped data access
//!
//! [`DataStore`] owns the pool and the optional tenant binding. Every store
//! call asks it for the active [`Db`] handle through the [`Context`] it was
//! given, so code running inside [`DataStore::tx`] joins that transaction
//! without knowing about it.

pub mod context;
pub mod executor;
pub mod transaction;

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use sqlx::PgPool;

pub use context::Context;
pub use executor::Db;
pub use transaction::TxHandle;

use crate::errors::StoreError;
use crate::query_builder::{QueryHandle, TenantBinding, Where};
use transaction::PgTransaction;

#[derive(Debug, Clone)]
pub struct DataStore {
    pool: PgPool,
    tenant: Option<TenantBinding>,
}

impl DataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, tenant: None }
    }

    /// Attach the tenant binding carried by [`new_where`](Self::new_where)
    pub fn with_tenant(mut self, binding: TenantBinding) -> Self {
        self.tenant = Some(binding);
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn tenant(&self) -> Option<&TenantBinding> {
        self.tenant.as_ref()
    }

    /// Fresh condition builder carrying this store's tenant binding
    pub fn new_where(&self) -> Where {
        match &self.tenant {
            Some(binding) => Where::new().with_tenant_binding(binding.clone()),
            None => Where::new(),
        }
    }

    /// Transaction handle from `ctx` if present, otherwise the pool
    pub fn db(&self, ctx: &Context) -> Db {
        match ctx.transaction() {
            Some(handle) => Db::Tx(handle.clone()),
            None => Db::Pool(self.pool.clone()),
        }
    }

    /// Active handle plus a query on `table` with `filter` rendered onto it
    pub fn query(&self, ctx: &Context, table: &str, filter: Option<&Where>) -> (Db, QueryHandle) {
        let handle = QueryHandle::table(table);
        let handle = match filter {
            Some(filter) => filter.render(handle),
            None => handle,
        };
        (self.db(ctx), handle)
    }

    /// Run `unit_of_work` inside a new transaction
    ///
    /// Commits on `Ok`. Rolls back on `Err` or panic; the error is returned
    /// unchanged and a panic is resumed after the rollback. Calling this with
    /// a context that is already in a transaction opens an independent one;
    /// use [`join_or_tx`](Self::join_or_tx) to join instead.
    pub async fn tx<F, Fut, R, E>(&self, ctx: &Context, unit_of_work: F) -> Result<R, E>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<StoreError>,
    {
        if ctx.in_transaction() {
            tracing::warn!(
                request_id = ctx.request_id().unwrap_or_default(),
                "nested transaction requested, opening an independent transaction"
            );
        }

        let tx = self.pool.begin().await.map_err(|e| {
            tracing::error!(error = %e, "failed to begin transaction");
            StoreError::Connection(format!("failed to begin transaction: {}", e))
        })?;

        let handle = TxHandle::new(tx);
        let child = ctx.clone().with_transaction(handle.clone());

        let outcome = AssertUnwindSafe(unit_of_work(child)).catch_unwind().await;
        let tx = handle.take().await;

        match outcome {
            Ok(Ok(value)) => {
                let tx = tx
                    .ok_or_else(|| StoreError::Transaction(executor::TX_FINISHED.to_string()))?;
                tx.commit().await.map_err(|e| {
                    tracing::error!(error = %e, "failed to commit transaction");
                    StoreError::Transaction(format!("failed to commit transaction: {}", e))
                })?;
                Ok(value)
            }
            Ok(Err(err)) => {
                rollback(tx).await;
                Err(err)
            }
            Err(panic) => {
                rollback(tx).await;
                std::panic::resume_unwind(panic)
            }
        }
    }

    /// Join the transaction carried by `ctx`, or open one if there is none
    pub async fn join_or_tx<F, Fut, R, E>(&self, ctx: &Context, unit_of_work: F) -> Result<R, E>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<StoreError>,
    {
        if ctx.in_transaction() {
            unit_of_work(ctx.clone()).await
        } else {
            self.tx(ctx, unit_of_work).await
        }
    }
}

async fn rollback(tx: Option<PgTransaction>) {
    if let Some(tx) = tx {
        if let Err(e) = tx.rollback().await {
            tracing::error!(error = %e, "failed to roll back transaction");
        }
    }
}
