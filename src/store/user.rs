use async_trait::async_trait;
use store_object::{Context, DataStore, GenericStore, StoreError, Where};

use crate::model::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, ctx: &Context, user: &mut User) -> Result<(), StoreError>;
    async fn update(&self, ctx: &Context, user: &User) -> Result<(), StoreError>;
    async fn delete(&self, ctx: &Context, filter: &Where) -> Result<(), StoreError>;
    async fn get(&self, ctx: &Context, filter: &Where) -> Result<User, StoreError>;
    async fn list(&self, ctx: &Context, filter: &Where) -> Result<(i64, Vec<User>), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    inner: GenericStore<User>,
}

impl PgUserStore {
    pub fn new(datastore: DataStore) -> Self {
        Self {
            inner: GenericStore::new(datastore),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, ctx: &Context, user: &mut User) -> Result<(), StoreError> {
        self.inner.create(ctx, user).await
    }

    async fn update(&self, ctx: &Context, user: &User) -> Result<(), StoreError> {
        self.inner.update(ctx, user).await
    }

    async fn delete(&self, ctx: &Context, filter: &Where) -> Result<(), StoreError> {
        let removed = self.inner.delete(ctx, filter).await?;
        tracing::debug!(removed, "users deleted");
        Ok(())
    }

    async fn get(&self, ctx: &Context, filter: &Where) -> Result<User, StoreError> {
        self.inner.get(ctx, filter).await
    }

    async fn list(&self, ctx: &Context, filter: &Where) -> Result<(i64, Vec<User>), StoreError> {
        self.inner.list(ctx, filter).await
    }
}
