//! Business layer
//!
//! Request handlers call into [`Biz`]; it talks to storage only through
//! [`IStore`] and passes the caller's [`Context`] to every store call.

pub mod auth;
pub mod fanout;
pub mod post;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use store_object::Context;

pub use auth::{PasswordHasher, SignedToken, TokenSigner};
pub use fanout::fan_out;
pub use post::PostBiz;
pub use user::UserBiz;

use crate::errors::{AppError, AppResult};
use crate::store::IStore;

pub struct Biz {
    users: UserBiz,
    posts: PostBiz,
}

impl Biz {
    pub fn new(
        store: Arc<dyn IStore>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        max_fanout_concurrency: usize,
    ) -> Self {
        Self {
            users: UserBiz::new(store.clone(), hasher, signer, max_fanout_concurrency),
            posts: PostBiz::new(store),
        }
    }

    pub fn users(&self) -> &UserBiz {
        &self.users
    }

    pub fn posts(&self) -> &PostBiz {
        &self.posts
    }
}

/// Authenticated caller's external id
pub(crate) fn caller(ctx: &Context) -> AppResult<&str> {
    ctx.user_id()
        .filter(|id| !id.is_empty())
        .ok_or(AppError::Unauthenticated)
}
