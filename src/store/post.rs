use async_trait::async_trait;
use store_object::{Context, DataStore, GenericStore, StoreError, Where};

use crate::model::Post;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, ctx: &Context, post: &mut Post) -> Result<(), StoreError>;
    async fn update(&self, ctx: &Context, post: &Post) -> Result<(), StoreError>;
    async fn delete(&self, ctx: &Context, filter: &Where) -> Result<(), StoreError>;
    async fn get(&self, ctx: &Context, filter: &Where) -> Result<Post, StoreError>;
    async fn list(&self, ctx: &Context, filter: &Where) -> Result<(i64, Vec<Post>), StoreError>;
    async fn count(&self, ctx: &Context, filter: &Where) -> Result<i64, StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgPostStore {
    inner: GenericStore<Post>,
}

impl PgPostStore {
    pub fn new(datastore: DataStore) -> Self {
        Self {
            inner: GenericStore::new(datastore),
        }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, ctx: &Context, post: &mut Post) -> Result<(), StoreError> {
        self.inner.create(ctx, post).await
    }

    async fn update(&self, ctx: &Context, post: &Post) -> Result<(), StoreError> {
        self.inner.update(ctx, post).await
    }

    async fn delete(&self, ctx: &Context, filter: &Where) -> Result<(), StoreError> {
        let removed = self.inner.delete(ctx, filter).await?;
        tracing::debug!(removed, "posts deleted");
        Ok(())
    }

    async fn get(&self, ctx: &Context, filter: &Where) -> Result<Post, StoreError> {
        self.inner.get(ctx, filter).await
    }

    async fn list(&self, ctx: &Context, filter: &Where) -> Result<(i64, Vec<Post>), StoreError> {
        self.inner.list(ctx, filter).await
    }

    async fn count(&self, ctx: &Context, filter: &Where) -> Result<i64, StoreError> {
        self.inner.count(ctx, filter).await
    }
}
