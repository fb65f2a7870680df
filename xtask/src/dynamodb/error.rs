//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error(
        "Table '{table_name}' is missing local index(es) {}; local indexes can only be \
         declared at creation, run `cargo xtask dynamodb deploy --destroy` and deploy again",
        missing.join(", ")
    )]
    IndexDrift {
        table_name: String,
        missing: Vec<String>,
    },

    #[error("{remaining} item(s) still unprocessed after {attempts} attempts")]
    UnprocessedItems { remaining: usize, attempts: usize },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_drift_message_names_index() {
        let err = DynamodbError::IndexDrift {
            table_name: "CinemaTable".to_string(),
            missing: vec!["periodIx".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("CinemaTable"));
        assert!(message.contains("periodIx"));
        assert!(message.contains("--destroy"));
    }
}
