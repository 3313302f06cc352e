//! wyvern-match-scan - find OpenSea (Wyvern) `atomicMatch_` calls in recent blocks
//!
//! Fetches the most recent blocks from an Ethereum JSON-RPC node, keeps the
//! transactions sent to the Wyvern exchange with the `atomicMatch_` selector,
//! and extracts the static target addresses of the buy and sell orders from
//! their call data.
//!
//! # Example
//!
//! ```rust,no_run
//! use wyvern_match_scan::{
//!     extract_order_targets, BlockPipeline, Config, NodeClient, TxFilter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::builder()
//!         .infura_key("YOUR_PROJECT_KEY")
//!         .depth(100)
//!         .build()?;
//!
//!     let client = NodeClient::new(&config.endpoint)?;
//!     let pipeline = BlockPipeline::new(client, TxFilter::new(config.target));
//!
//!     let range = pipeline.latest_range(config.depth).await?;
//!     for record in pipeline.run(range).await? {
//!         match extract_order_targets(&record) {
//!             Ok(targets) => println!("{}", targets),
//!             Err(e) => eprintln!("{}", e),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod filter;
pub mod output;
pub mod rpc;
pub mod types;

// Re-exports for convenience
pub use config::{
    Config, ConfigBuilder, ConfigFile, EndpointConfig, OutputConfig, OutputFormat, Settings,
};
pub use error::{ConfigError, DecodeError, Error, OutputError, Result, RpcError};
pub use extract::{
    extract_order_targets, OrderTargets, WordWindow, BUY_STATIC_TARGET, MIN_CALL_DATA_HEX_LEN,
    SELL_STATIC_TARGET,
};
pub use fetcher::{fetch_blocks, BlockPipeline, BlockRange, FetchProgress, QUEUE_CAPACITY};
pub use filter::{MatchTarget, Selector, TxFilter, ATOMIC_MATCH_SELECTOR, WYVERN_EXCHANGE};
pub use output::{
    create_writer, write_matches, CsvWriter, JsonWriter, OutputWriter, TextWriter, WriteSummary,
};
pub use rpc::{BlockSource, NodeClient};
pub use types::{Block, MatchedTransaction, Transaction, TxSignature};
