//! Runtime configuration
//!
//! [`Config`] is assembled through [`ConfigBuilder`], which validates the
//! inputs once so the rest of the crate can rely on them: depth and timeout
//! are non-zero and there is an endpoint to talk to. The match target is
//! fixed; the extraction offsets only hold for Wyvern `atomicMatch_` calls.

mod endpoint;
mod file;

pub use endpoint::{EndpointConfig, INFURA_MAINNET_URL};
pub use file::{ConfigFile, Settings};

use crate::error::{ConfigError, OutputError, Result};
use crate::filter::MatchTarget;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format for matched transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One labelled line per match
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(OutputError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Where and how results are written
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// stdout when `None`
    pub path: Option<PathBuf>,
}

/// Validated configuration for one scan
#[derive(Debug, Clone)]
pub struct Config {
    /// Node to fetch blocks from
    pub endpoint: EndpointConfig,
    /// Number of most recent blocks to scan, including the head
    pub depth: u64,
    /// Contract and selector a transaction must hit
    pub target: MatchTarget,
    /// Output settings
    pub output: OutputConfig,
    /// Suppress progress output
    pub quiet: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    infura_key: Option<String>,
    rpc_url: Option<String>,
    timeout_secs: Option<u64>,
    depth: Option<u64>,
    output: OutputConfig,
    quiet: bool,
}

impl ConfigBuilder {
    pub fn infura_key(mut self, key: impl Into<String>) -> Self {
        self.infura_key = Some(key.into());
        self
    }

    /// Use this RPC URL instead of Infura
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn depth(mut self, depth: u64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output.format = format;
        self
    }

    pub fn output_path(mut self, path: &Path) -> Self {
        self.output.path = Some(path.to_path_buf());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn build(self) -> Result<Config> {
        let depth = self
            .depth
            .ok_or_else(|| ConfigError::MissingField("depth (-d)".to_string()))?;
        if depth == 0 {
            return Err(ConfigError::InvalidDepth("must be greater than 0".to_string()).into());
        }

        let endpoint = match (self.rpc_url, self.infura_key) {
            (Some(url), _) if !url.trim().is_empty() => EndpointConfig::new(url.trim()),
            (_, Some(key)) if !key.trim().is_empty() => EndpointConfig::infura(key.trim()),
            _ => {
                return Err(ConfigError::MissingField(
                    "Infura API key (-i) or RPC URL (--rpc)".to_string(),
                )
                .into())
            }
        };
        let endpoint = match self.timeout_secs {
            Some(0) => {
                return Err(
                    ConfigError::InvalidTimeout("must be at least 1 second".to_string()).into(),
                )
            }
            Some(secs) => endpoint.with_timeout(secs),
            None => endpoint,
        };

        Ok(Config {
            endpoint,
            depth,
            target: MatchTarget::default(),
            output: self.output,
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::filter::{ATOMIC_MATCH_SELECTOR, WYVERN_EXCHANGE};

    #[test]
    fn test_build_infura_config() {
        let config = Config::builder()
            .infura_key("abc")
            .depth(10)
            .build()
            .unwrap();

        assert_eq!(config.endpoint.url, "https://mainnet.infura.io/v3/abc");
        assert_eq!(config.depth, 10);
        assert_eq!(config.target.address, WYVERN_EXCHANGE);
        assert_eq!(config.target.selector, ATOMIC_MATCH_SELECTOR);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_rpc_url_takes_precedence() {
        let config = Config::builder()
            .infura_key("abc")
            .rpc_url("http://localhost:8545")
            .timeout_secs(5)
            .depth(1)
            .build()
            .unwrap();

        assert_eq!(config.endpoint.url, "http://localhost:8545");
        assert_eq!(config.endpoint.timeout_secs, 5);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = Config::builder()
            .infura_key("abc")
            .depth(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidDepth(_))));
    }

    #[test]
    fn test_missing_depth_rejected() {
        let err = Config::builder().infura_key("abc").build().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_missing_or_blank_key_rejected() {
        let err = Config::builder().depth(5).build().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingField(_))));

        let err = Config::builder()
            .infura_key("   ")
            .depth(5)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::builder()
            .infura_key("abc")
            .depth(1)
            .timeout_secs(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("sqlite".parse::<OutputFormat>().is_err());
    }
}
