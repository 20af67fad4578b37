use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Read failure: {0}")]
    ReadFailure(String),

    #[error("Write failure: {0}")]
    WriteFailure(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("Invalid filter input: {0}")]
    InvalidFilterInput(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Failed query on `table`
    pub fn read(table: &str, operation: &str, error: impl std::fmt::Display) -> Self {
        Self::ReadFailure(format!("{} on {}: {}", operation, table, error))
    }

    /// Failed statement on `table`
    pub fn write(table: &str, operation: &str, error: impl std::fmt::Display) -> Self {
        Self::WriteFailure(format!("{} on {}: {}", operation, table, error))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::PostNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = StoreError::read("users", "select", "connection reset");
        assert_eq!(err.to_string(), "Read failure: select on users: connection reset");

        let err = StoreError::write("posts", "insert", "duplicate key");
        assert!(matches!(err, StoreError::WriteFailure(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_kinds() {
        assert!(StoreError::UserNotFound.is_not_found());
        assert!(StoreError::PostNotFound.is_not_found());
        assert!(!StoreError::Transaction("x".into()).is_not_found());
    }
}
