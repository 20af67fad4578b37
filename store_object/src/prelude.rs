//! Convenience re-exports for common store-object usage

// Context and transactions
pub use crate::datastore::{Context, DataStore, Db, TxHandle};

// Error types
pub use crate::errors::{StoreError, StoreResult};

// Core store functionality
pub use crate::generic_store::GenericStore;
pub use crate::traits::Record;

// Query building
pub use crate::query_builder::{Clause, SortOrder, TenantBinding, Value, Where};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::{FromRow, PgPool};
