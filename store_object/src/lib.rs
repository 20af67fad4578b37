//! Store Object - Core data access layer for FastPost
//!
//! This crate provides the condition builder, the transaction-scoped
//! [`DataStore`] and the generic CRUD store shared by every resource.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod datastore;
pub mod errors;
pub mod generic_store;
pub mod prelude;
pub mod query_builder;
pub mod traits;

pub use datastore::{Context, DataStore, Db, TxHandle};
pub use errors::{StoreError, StoreResult};
pub use generic_store::GenericStore;
pub use query_builder::{
    Clause, Pagination, QueryHandle, RawCondition, SortOrder, SqlStatement, TenantBinding, Value,
    Where, UNBOUNDED,
};
pub use traits::Record;

use sqlx::PgPool;

pub type DbPool = PgPool;
