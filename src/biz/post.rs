use std::sync::Arc;

use resource_id::ResourceKind;
use store_object::{Context, Value, Where};

use crate::api::{
    CreatePostRequest, CreatePostResponse, DeletePostRequest, DeletePostResponse, GetPostRequest,
    GetPostResponse, ListPostRequest, ListPostResponse, Post as PostView, UpdatePostRequest,
    UpdatePostResponse,
};
use crate::biz::caller;
use crate::errors::AppResult;
use crate::model::Post;
use crate::store::IStore;

pub struct PostBiz {
    store: Arc<dyn IStore>,
}

impl PostBiz {
    pub fn new(store: Arc<dyn IStore>) -> Self {
        Self { store }
    }

    /// Builder scoped to the caller's posts
    fn owned(&self, ctx: &Context) -> AppResult<Where> {
        let user_id = caller(ctx)?;
        Ok(self
            .store
            .new_where()
            .with_tenant(ctx)
            .with_filter("user_id", user_id))
    }

    pub async fn create(
        &self,
        ctx: &Context,
        req: CreatePostRequest,
    ) -> AppResult<CreatePostResponse> {
        let user_id = caller(ctx)?;
        let mut post = Post::new(user_id, req.title, req.content);
        self.store.posts().create(ctx, &mut post).await?;

        tracing::info!(post_id = %post.post_id, user_id, "post created");
        Ok(CreatePostResponse {
            post_id: post.post_id,
        })
    }

    pub async fn update(
        &self,
        ctx: &Context,
        req: UpdatePostRequest,
    ) -> AppResult<UpdatePostResponse> {
        ResourceKind::Post.validate(&req.post_id)?;
        let filter = self
            .owned(ctx)?
            .with_filter("post_id", req.post_id.as_str());
        let mut post = self.store.posts().get(ctx, &filter).await?;

        if let Some(title) = req.title {
            post.title = title;
        }
        if let Some(content) = req.content {
            post.content = content;
        }

        self.store.posts().update(ctx, &post).await?;
        Ok(UpdatePostResponse {})
    }

    /// Delete several of the caller's posts; unknown ids are skipped
    pub async fn delete(
        &self,
        ctx: &Context,
        req: DeletePostRequest,
    ) -> AppResult<DeletePostResponse> {
        let filter = self.owned(ctx)?;
        if req.post_ids.is_empty() {
            return Ok(DeletePostResponse {});
        }
        for post_id in &req.post_ids {
            ResourceKind::Post.validate(post_id)?;
        }

        let placeholders = vec!["?"; req.post_ids.len()].join(", ");
        let args = req.post_ids.into_iter().map(Value::from).collect();
        let filter = filter.with_raw(format!("post_id IN ({})", placeholders), args);

        self.store.posts().delete(ctx, &filter).await?;
        Ok(DeletePostResponse {})
    }

    pub async fn get(&self, ctx: &Context, req: GetPostRequest) -> AppResult<GetPostResponse> {
        ResourceKind::Post.validate(&req.post_id)?;
        let filter = self
            .owned(ctx)?
            .with_filter("post_id", req.post_id.as_str());
        let post = self.store.posts().get(ctx, &filter).await?;
        Ok(GetPostResponse {
            post: PostView::from(&post),
        })
    }

    /// Caller's posts, optionally narrowed to titles containing `title`
    pub async fn list(&self, ctx: &Context, req: ListPostRequest) -> AppResult<ListPostResponse> {
        let mut filter = self
            .owned(ctx)?
            .with_offset(req.offset)
            .with_limit(req.limit);
        if let Some(title) = req.title.filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(&title));
            filter = filter.with_raw("title LIKE ? ESCAPE '\\'", vec![Value::from(pattern)]);
        }

        let (total, posts) = self.store.posts().list(ctx, &filter).await?;
        Ok(ListPostResponse {
            total,
            posts: posts.iter().map(PostView::from).collect(),
        })
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
