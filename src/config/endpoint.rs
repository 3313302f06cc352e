//! RPC endpoint configuration

use serde::{Deserialize, Serialize};

/// Infura mainnet endpoint prefix; the project key is appended
pub const INFURA_MAINNET_URL: &str = "https://mainnet.infura.io/v3/";

/// Configuration for the node the blocks are fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// RPC URL
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl EndpointConfig {
    /// Create a new endpoint config with defaults
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Endpoint for an Infura project key on mainnet
    pub fn infura(api_key: &str) -> Self {
        Self::new(format!("{}{}", INFURA_MAINNET_URL, api_key))
    }

    /// Builder-style setter for timeout_secs
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// URL safe for logging, with an Infura key masked
    pub fn display_url(&self) -> String {
        match self.url.strip_prefix(INFURA_MAINNET_URL) {
            Some(key) if !key.is_empty() => {
                format!("{}<key:{} chars>", INFURA_MAINNET_URL, key.len())
            }
            _ => self.url.clone(),
        }
    }
}
