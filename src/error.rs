//! Error types for wyvern-match-scan

use alloy::primitives::B256;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// RPC-related errors
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Call data decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Output errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// The filter worker stopped before the fetch loop finished
    #[error("Filter worker failed: {0}")]
    Worker(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// RPC-specific errors
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Block {0} not found")]
    BlockNotFound(u64),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("Invalid depth: {0}")]
    InvalidDepth(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Call data decoding errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error(
        "Malformed call data in transaction {hash:#x}: {len} hex chars, need at least {required}"
    )]
    MalformedCallData {
        hash: B256,
        len: usize,
        required: usize,
    },
}

/// Output-related errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    CsvWrite(String),

    #[error("Failed to create output file: {0}")]
    FileCreate(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: Error = ConfigError::InvalidDepth("must be greater than 0".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Config error: Invalid depth: must be greater than 0"
        );

        let err: Error = RpcError::BlockNotFound(42).into();
        assert_eq!(err.to_string(), "RPC error: Block 42 not found");
    }

    #[test]
    fn test_malformed_call_data_display() {
        let err = DecodeError::MalformedCallData {
            hash: B256::ZERO,
            len: 839,
            required: 840,
        };
        let msg = err.to_string();
        assert!(msg.contains("839 hex chars"));
        assert!(msg.contains("840"));
    }
}
