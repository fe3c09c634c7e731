//! Error handling for the Goldtrack client
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for dashboard client operations
#[derive(Error, Debug)]
pub enum GoldtrackError {
    #[error("api error: {0}")]
    ApiError(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

/// Result type alias for client operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = GoldtrackError::ApiError("connection refused".to_string());
        assert_eq!(err.to_string(), "api error: connection refused");
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to load purchases");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to load purchases"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_goldtrack_error_variants() {
        let api_err = GoldtrackError::ApiError("test".to_string());
        assert!(api_err.to_string().starts_with("api error"));

        let config_err = GoldtrackError::ConfigError("test".to_string());
        assert!(config_err.to_string().starts_with("config error"));
    }
}
