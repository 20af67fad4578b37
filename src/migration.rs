//! Database migration functionality
//!
//! Creates the `users` and `posts` tables and their indexes when absent.
//! External id columns are nullable until the second phase of a create
//! fills them, and UNIQUE so the database rejects a colliding id.

use sqlx::PgPool;

use crate::errors::AppError;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS "users" (
    "id"         BIGSERIAL PRIMARY KEY,
    "user_id"    VARCHAR(64) UNIQUE,
    "username"   VARCHAR(255) NOT NULL UNIQUE,
    "password"   VARCHAR(255) NOT NULL,
    "nickname"   VARCHAR(255) NOT NULL DEFAULT '',
    "email"      VARCHAR(255) NOT NULL DEFAULT '',
    "phone"      VARCHAR(32) NOT NULL DEFAULT '',
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_POSTS: &str = r#"
CREATE TABLE IF NOT EXISTS "posts" (
    "id"         BIGSERIAL PRIMARY KEY,
    "post_id"    VARCHAR(64) UNIQUE,
    "user_id"    VARCHAR(64) NOT NULL,
    "title"      VARCHAR(255) NOT NULL,
    "content"    TEXT NOT NULL DEFAULT '',
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const INDEXES: &[&str] = &[
    r#"CREATE INDEX IF NOT EXISTS "idx_posts_user_id" ON "posts" ("user_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "idx_posts_created_at" ON "posts" ("created_at")"#,
    r#"CREATE INDEX IF NOT EXISTS "idx_users_created_at" ON "users" ("created_at")"#,
];

/// Create tables and indexes if they do not exist
pub async fn migrate(pool: &PgPool) -> Result<(), AppError> {
    for statement in [CREATE_USERS, CREATE_POSTS].into_iter().chain(INDEXES.iter().copied()) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| migration_error(statement, e))?;
    }
    tracing::info!("migrations applied");
    Ok(())
}

/// Drop both tables
pub async fn drop_all(pool: &PgPool) -> Result<(), AppError> {
    let statement = r#"DROP TABLE IF EXISTS "posts", "users""#;
    sqlx::query(statement)
        .execute(pool)
        .await
        .map_err(|e| migration_error(statement, e))?;
    Ok(())
}

fn migration_error(statement: &str, error: sqlx::Error) -> AppError {
    tracing::error!(error = %error, statement = statement.trim(), "migration statement failed");
    AppError::Migration(error.to_string())
}
