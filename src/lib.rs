//! # FastPost
//!
//! Storage core for a users-and-posts REST backend on PostgreSQL: a
//! conditional query builder, transaction-scoped stores, obfuscated resource
//! ids and the business operations built on them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fastpost::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let app = FastPost::new(&config).await?;
//!     app.migrate().await?;
//!
//!     let store = app.store();
//!     let ctx = Context::new().with_new_request_id();
//!
//!     let filter = store.new_where().with_filter("username", "alice");
//!     let alice = store.users().get(&ctx, &filter).await?;
//!     println!("found {}", alice.user_id);
//!
//!     // Both posts commit or roll back together
//!     let posts = store.posts();
//!     store
//!         .datastore()
//!         .tx(&ctx, |tx_ctx| async move {
//!             for title in ["hello", "again"] {
//!                 let mut post = Post::new(alice.user_id.as_str(), title, "");
//!                 posts.create(&tx_ctx, &mut post).await?;
//!             }
//!             Ok::<_, AppError>(())
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod biz;
pub mod core;
pub mod errors;
pub mod migration;
pub mod model;
pub mod prelude;
pub mod store;
pub mod telemetry;

pub use crate::core::FastPost;
pub use errors::{AppError, AppResult};
