use std::{env, time::Duration};

use cinemas_core::query::RetryPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding the schedules (default: "CinemaTable")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub table_name: String,
    /// AWS region of the table (default: "eu-west-1")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub region: String,
    /// Endpoint override, e.g. DynamoDB Local (default: none)
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub endpoint_url: Option<String>,
    /// Per-attempt store timeout in milliseconds (default: 3,000)
    pub store_timeout_ms: u64,
    /// Minimum backoff before the store retry in milliseconds (default: 100)
    pub store_retry_delay_ms: u64,
    /// Whole-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - DynamoDB table name (default: "CinemaTable")
    /// - `REGION`, then `AWS_REGION` - AWS region (default: "eu-west-1")
    /// - `AWS_ENDPOINT_URL` - DynamoDB endpoint override (default: none)
    /// - `STORE_TIMEOUT_MS` - Per-attempt store timeout (default: 3,000)
    /// - `STORE_RETRY_DELAY_MS` - Minimum retry backoff (default: 100)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "CinemaTable".to_string()),
            region: env::var("REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| "eu-west-1".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_000),
            store_retry_delay_ms: env::var("STORE_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Timeout and retry settings for store calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_timeout(Duration::from_millis(self.store_timeout_ms))
            .with_min_delay(Duration::from_millis(self.store_retry_delay_ms))
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            table_name: "CinemaTable".to_string(),
            region: "eu-west-1".to_string(),
            endpoint_url: None,
            store_timeout_ms: 1_500,
            store_retry_delay_ms: 50,
            request_timeout_secs: 7,
        }
    }

    #[test]
    fn test_retry_policy_conversion() {
        let policy = sample_config().retry_policy();

        assert_eq!(policy.timeout, Duration::from_millis(1_500));
        assert_eq!(policy.min_delay, Duration::from_millis(50));
        assert_eq!(policy.max_retries, 1);
    }

    #[test]
    fn test_request_timeout_conversion() {
        assert_eq!(sample_config().request_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("TABLE_NAME");
        env::remove_var("REGION");
        env::remove_var("AWS_REGION");
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("STORE_TIMEOUT_MS");
        env::remove_var("STORE_RETRY_DELAY_MS");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        let config = Config::from_env();

        assert_eq!(config.table_name, "CinemaTable");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.store_timeout_ms, 3_000);
        assert_eq!(config.store_retry_delay_ms, 100);
        assert_eq!(config.request_timeout_secs, 10);
    }
}
