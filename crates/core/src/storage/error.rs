use thiserror::Error;

/// Errors that can occur during schedule store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store throttled: {0}")]
    Throttled(String),
    #[error("Malformed key: {0}")]
    MalformedKey(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Whether the same call may succeed if issued again.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Throttled(_))
    }
}

/// Result type for schedule store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_unavailable_display() {
        let error = StoreError::Unavailable("connection reset".to_string());
        assert_eq!(error.to_string(), "Store unavailable: connection reset");
    }

    #[test]
    fn test_store_error_throttled_display() {
        let error = StoreError::Throttled("rate exceeded".to_string());
        assert_eq!(error.to_string(), "Store throttled: rate exceeded");
    }

    #[test]
    fn test_store_error_malformed_key_display() {
        let error = StoreError::MalformedKey("key type mismatch".to_string());
        assert_eq!(error.to_string(), "Malformed key: key type mismatch");
    }

    #[test]
    fn test_store_error_invalid_data_display() {
        let error = StoreError::InvalidData("Missing or invalid field: movieId".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: Missing or invalid field: movieId"
        );
    }

    #[test]
    fn test_is_transient() {
        assert!(StoreError::Unavailable(String::new()).is_transient());
        assert!(StoreError::Throttled(String::new()).is_transient());
        assert!(!StoreError::MalformedKey(String::new()).is_transient());
        assert!(!StoreError::QueryFailed(String::new()).is_transient());
        assert!(!StoreError::InvalidData(String::new()).is_transient());
    }
}
