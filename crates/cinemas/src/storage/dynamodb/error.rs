//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `cinemas_core::storage`, keeping
//! the transient/permanent split the resolver retries on.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use cinemas_core::storage::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    if let Some(error) = map_transport_error(&err) {
        return error;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => map_error_code(err.code(), format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> StoreError {
    if let Some(error) = map_transport_error(&err) {
        return error;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table or index not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded".to_string())
        }
        QueryError::InternalServerError(_) => {
            StoreError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => map_error_code(err.code(), format!("Query failed: {:?}", err)),
    }
}

/// Errors raised before DynamoDB produced a service response.
fn map_transport_error<E, R>(err: &SdkError<E, R>) -> Option<StoreError> {
    match err {
        SdkError::TimeoutError(_) => Some(StoreError::Unavailable(
            "Request to DynamoDB timed out".to_string(),
        )),
        SdkError::DispatchFailure(failure) => Some(StoreError::Unavailable(format!(
            "Dispatch failure: {:?}",
            failure
        ))),
        SdkError::ResponseError(_) => Some(StoreError::Unavailable(
            "Unreadable DynamoDB response".to_string(),
        )),
        SdkError::ConstructionFailure(_) => Some(StoreError::QueryFailed(
            "Failed to construct DynamoDB request".to_string(),
        )),
        _ => None,
    }
}

/// Classify errors DynamoDB reports only by code.
fn map_error_code(code: Option<&str>, detail: String) -> StoreError {
    match code {
        Some("ThrottlingException") => StoreError::Throttled(detail),
        Some("ValidationException") => StoreError::MalformedKey(detail),
        Some("ServiceUnavailable") | Some("ServiceUnavailableException") => {
            StoreError::Unavailable(detail)
        }
        _ => StoreError::QueryFailed(detail),
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::{
        InternalServerError, ProvisionedThroughputExceededException, ResourceNotFoundException,
    };

    use super::*;

    fn coded(code: &str) -> ErrorMetadata {
        ErrorMetadata::builder()
            .code(code)
            .message("details from DynamoDB")
            .build()
    }

    #[test]
    fn test_get_item_throughput_is_throttled() {
        let err: SdkError<GetItemError, ()> = SdkError::service_error(
            GetItemError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().build(),
            ),
            (),
        );
        assert!(matches!(map_get_item_error(err), StoreError::Throttled(_)));
    }

    #[test]
    fn test_get_item_internal_error_is_unavailable() {
        let err: SdkError<GetItemError, ()> = SdkError::service_error(
            GetItemError::InternalServerError(InternalServerError::builder().build()),
            (),
        );
        assert!(matches!(
            map_get_item_error(err),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_get_item_validation_is_malformed_key() {
        let err: SdkError<GetItemError, ()> =
            SdkError::service_error(GetItemError::generic(coded("ValidationException")), ());
        assert!(matches!(
            map_get_item_error(err),
            StoreError::MalformedKey(_)
        ));
    }

    #[test]
    fn test_query_throttling_code_is_throttled() {
        let err: SdkError<QueryError, ()> =
            SdkError::service_error(QueryError::generic(coded("ThrottlingException")), ());
        assert!(matches!(map_query_error(err), StoreError::Throttled(_)));
    }

    #[test]
    fn test_query_missing_table_is_query_failed() {
        let err: SdkError<QueryError, ()> = SdkError::service_error(
            QueryError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
            (),
        );
        assert_eq!(
            map_query_error(err),
            StoreError::QueryFailed("Table or index not found".to_string())
        );
    }

    #[test]
    fn test_query_unknown_code_is_query_failed() {
        let err: SdkError<QueryError, ()> =
            SdkError::service_error(QueryError::generic(coded("AccessDeniedException")), ());
        assert!(matches!(map_query_error(err), StoreError::QueryFailed(_)));
    }

    #[test]
    fn test_timeout_is_unavailable() {
        let err: SdkError<QueryError, ()> = SdkError::timeout_error("operation timed out");
        assert_eq!(
            map_query_error(err),
            StoreError::Unavailable("Request to DynamoDB timed out".to_string())
        );
    }

    #[test]
    fn test_construction_failure_is_query_failed() {
        let err: SdkError<GetItemError, ()> = SdkError::construction_failure("missing key");
        assert!(matches!(
            map_get_item_error(err),
            StoreError::QueryFailed(_)
        ));
    }
}
