//! Request and response types exchanged with the serving layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&model::User> for User {
    fn from(user: &model::User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            post_count: 0,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&model::Post> for Post {
    fn from(post: &model::Post) -> Self {
        Self {
            post_id: post.post_id.clone(),
            user_id: post.user_id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ---- users ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteUserRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserResponse {}

/// An empty `user_id` means the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetUserRequest {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUserRequest {
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUserResponse {
    pub total: i64,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expire_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub expire_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangePasswordResponse {}

// ---- posts ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub post_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub post_id: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePostResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePostRequest {
    #[serde(rename = "post_id")]
    pub post_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletePostResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPostRequest {
    pub post_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostRequest {
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPostResponse {
    pub total: i64,
    pub posts: Vec<Post>,
}
