//! Typed resource stores
//!
//! [`Store`] is the PostgreSQL-backed [`IStore`]; business code only sees the
//! traits, so tests can swap in fakes.

pub mod post;
pub mod user;

use store_object::{DataStore, Where};

pub use post::{PgPostStore, PostStore};
pub use user::{PgUserStore, UserStore};

/// Entry point to every resource store
pub trait IStore: Send + Sync {
    fn users(&self) -> &dyn UserStore;
    fn posts(&self) -> &dyn PostStore;
    /// Condition builder carrying the configured tenant binding
    fn new_where(&self) -> Where;
}

#[derive(Debug, Clone)]
pub struct Store {
    datastore: DataStore,
    users: PgUserStore,
    posts: PgPostStore,
}

impl Store {
    pub fn new(datastore: DataStore) -> Self {
        Self {
            users: PgUserStore::new(datastore.clone()),
            posts: PgPostStore::new(datastore.clone()),
            datastore,
        }
    }

    /// Underlying handle, for running units of work with [`DataStore::tx`]
    pub fn datastore(&self) -> &DataStore {
        &self.datastore
    }
}

impl IStore for Store {
    fn users(&self) -> &dyn UserStore {
        &self.users
    }

    fn posts(&self) -> &dyn PostStore {
        &self.posts
    }

    fn new_where(&self) -> Where {
        self.datastore.new_where()
    }
}
