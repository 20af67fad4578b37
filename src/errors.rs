//! Error types for the FastPost crate
//!
//! [`AppError`] is what the serving layer sees. Each variant maps to an HTTP
//! status via [`AppError::code`] and a stable reason string via
//! [`AppError::reason`].

use config::ConfigError;
use resource_id::ResourceIdError;
use store_object::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Tracing setup failed: {0}")]
    Telemetry(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password is incorrect")]
    InvalidPassword,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Failed to sign token: {0}")]
    SignToken(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<ResourceIdError> for AppError {
    fn from(err: ResourceIdError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl AppError {
    /// HTTP status code
    pub fn code(&self) -> u16 {
        match self {
            AppError::Store(StoreError::UserNotFound | StoreError::PostNotFound) => 404,
            AppError::Store(StoreError::InvalidFilterInput(_)) => 400,
            AppError::UserAlreadyExists
            | AppError::InvalidUsername(_)
            | AppError::InvalidPassword
            | AppError::InvalidArgument(_) => 400,
            AppError::Unauthenticated | AppError::SignToken(_) => 401,
            _ => 500,
        }
    }

    /// Stable machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::Store(err) => match err {
                StoreError::UserNotFound => "NotFound.UserNotFound",
                StoreError::PostNotFound => "NotFound.PostNotFound",
                StoreError::ReadFailure(_) => "InternalError.DBRead",
                StoreError::WriteFailure(_) => "InternalError.DBWrite",
                StoreError::InvalidFilterInput(_) => "InvalidArgument.FilterInvalid",
                StoreError::Connection(_) | StoreError::Transaction(_) => "InternalError",
            },
            AppError::UserAlreadyExists => "AlreadyExist.UserAlreadyExists",
            AppError::InvalidUsername(_) => "InvalidArgument.UserNameInvalid",
            AppError::InvalidPassword => "InvalidArgument.PasswordInvalid",
            AppError::Unauthenticated => "Unauthenticated",
            AppError::SignToken(_) => "Unauthenticated.SignToken",
            AppError::InvalidArgument(_) => "InvalidArgument",
            AppError::Config(_)
            | AppError::DatabaseConnection(_)
            | AppError::Migration(_)
            | AppError::Telemetry(_) => "InternalError",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Store(err) if err.is_not_found())
    }
}
