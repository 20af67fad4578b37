//! Convenience re-exports for common FastPost usage
//!
//! ```rust
//! use fastpost::prelude::*;
//! ```

// Core FastPost components
pub use crate::core::FastPost;
pub use crate::errors::{AppError, AppResult};
pub use crate::migration;

// Models and stores
pub use crate::model::{Post, User};
pub use crate::store::{IStore, PostStore, Store, UserStore};

// Business layer
pub use crate::biz::{Biz, PasswordHasher, PostBiz, SignedToken, TokenSigner, UserBiz};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, StoreConfig};

// Resource ids
pub use resource_id::ResourceKind;

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;
