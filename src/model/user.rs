use chrono::{DateTime, Utc};
use resource_id::ResourceKind;
use sqlx::FromRow;
use store_object::{Record, StoreError, Value};

pub const USERS_TABLE: &str = "users";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    /// Hashed password
    pub password: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Unsaved user; ids and timestamps are assigned by the store
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id: String::new(),
            username: username.into(),
            password: password.into(),
            nickname: nickname.into(),
            email: email.into(),
            phone: phone.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for User {
    fn table_name() -> &'static str {
        USERS_TABLE
    }

    fn select_columns() -> &'static str {
        "id, COALESCE(user_id, '') AS user_id, username, password, nickname, email, phone, created_at, updated_at"
    }

    fn external_id_field() -> &'static str {
        "user_id"
    }

    fn insert_fields() -> &'static [&'static str] {
        &["username", "password", "nickname", "email", "phone"]
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![
            Value::from(&self.username),
            Value::from(&self.password),
            Value::from(&self.nickname),
            Value::from(&self.email),
            Value::from(&self.phone),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn external_id(&self) -> &str {
        &self.user_id
    }

    fn derive_external_id(id: u64) -> String {
        ResourceKind::User.new_id(id)
    }

    fn not_found() -> StoreError {
        StoreError::UserNotFound
    }
}
