use chrono::{DateTime, Utc};
use resource_id::ResourceKind;
use sqlx::FromRow;
use store_object::{Record, StoreError, Value};

pub const POSTS_TABLE: &str = "posts";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Post {
    pub id: i64,
    pub post_id: String,
    /// Owner's external user id
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            post_id: String::new(),
            user_id: user_id.into(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Post {
    fn table_name() -> &'static str {
        POSTS_TABLE
    }

    fn select_columns() -> &'static str {
        "id, COALESCE(post_id, '') AS post_id, user_id, title, content, created_at, updated_at"
    }

    fn external_id_field() -> &'static str {
        "post_id"
    }

    fn insert_fields() -> &'static [&'static str] {
        &["user_id", "title", "content"]
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(&self.user_id),
            Value::from(&self.title),
            Value::from(&self.content),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn external_id(&self) -> &str {
        &self.post_id
    }

    fn derive_external_id(id: u64) -> String {
        ResourceKind::Post.new_id(id)
    }

    fn not_found() -> StoreError {
        StoreError::PostNotFound
    }
}
