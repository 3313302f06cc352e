//! Block source backed by an Ethereum JSON-RPC node

use crate::config::EndpointConfig;
use crate::error::{Result, RpcError};
use crate::types::{Block, Transaction, TxSignature};
use alloy::consensus::Transaction as _;
use alloy::eips::BlockNumberOrTag;
use alloy::network::TransactionResponse as _;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use std::future::Future;
use std::time::{Duration, Instant};

/// The two node calls the scan needs
pub trait BlockSource {
    /// Current chain head (`eth_blockNumber`)
    fn block_number(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Block with full transaction objects (`eth_getBlockByNumber`, `true`)
    fn block_by_number(&self, number: u64) -> impl Future<Output = Result<Block>> + Send;
}

/// JSON-RPC client for a single node
#[derive(Clone)]
pub struct NodeClient {
    provider: DynProvider,
    display_url: String,
}

impl NodeClient {
    /// Build a client for an endpoint; no request is made here
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let url = config
            .url
            .parse::<reqwest::Url>()
            .map_err(|e| RpcError::InvalidUrl(format!("{}: {}", config.display_url(), e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RpcError::Client(e.to_string()))?;

        let transport = Http::with_client(http, url);
        let client = RpcClient::new(transport, false);
        let provider = ProviderBuilder::new().connect_client(client).erased();

        Ok(Self {
            provider,
            display_url: config.display_url(),
        })
    }

    /// Endpoint URL with any API key masked
    pub fn url(&self) -> &str {
        &self.display_url
    }
}

impl BlockSource for NodeClient {
    async fn block_number(&self) -> Result<u64> {
        let number = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| RpcError::Provider(e.to_string()))?;
        tracing::debug!("Chain head at block {}", number);
        Ok(number)
    }

    async fn block_by_number(&self, number: u64) -> Result<Block> {
        let start = Instant::now();
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .await
            .map_err(|e| RpcError::Provider(format!("block {}: {}", number, e)))?
            .ok_or(RpcError::BlockNotFound(number))?;

        tracing::trace!(
            "Fetched block {} ({} txs) in {:?}",
            number,
            block.transactions.len(),
            start.elapsed()
        );

        Ok(convert_block(block))
    }
}

fn convert_block(block: alloy::rpc::types::Block) -> Block {
    let header = &block.header;
    let transactions: Vec<Transaction> = block.transactions.txns().map(convert_tx).collect();
    let transaction_hashes = transactions.iter().map(|tx| tx.hash).collect();

    Block {
        number: header.number,
        hash: header.hash,
        parent_hash: header.parent_hash,
        miner: header.beneficiary,
        gas_limit: header.gas_limit,
        gas_used: header.gas_used,
        timestamp: header.timestamp,
        transactions,
        transaction_hashes,
    }
}

fn convert_tx(tx: &alloy::rpc::types::Transaction) -> Transaction {
    let signature = tx.inner.signature();

    Transaction {
        hash: tx.tx_hash(),
        from: tx.inner.signer(),
        to: tx.to(),
        input: tx.input().clone(),
        value: tx.value(),
        nonce: tx.nonce(),
        signature: TxSignature {
            y_parity: signature.v(),
            r: signature.r(),
            s: signature.s(),
        },
        block_hash: tx.block_hash,
        block_number: tx.block_number,
        transaction_index: tx.transaction_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NodeClient::new(&EndpointConfig::infura("secret")).unwrap();
        assert!(!client.url().contains("secret"));
    }

    #[test]
    fn test_invalid_url() {
        let result = NodeClient::new(&EndpointConfig::new("not a url"));
        assert!(matches!(
            result,
            Err(crate::error::Error::Rpc(RpcError::InvalidUrl(_)))
        ));
    }

    // Integration test (requires network and INFURA_API_KEY)
    #[tokio::test]
    #[ignore]
    async fn test_fetch_head_block() {
        let key = std::env::var("INFURA_API_KEY").unwrap();
        let client = NodeClient::new(&EndpointConfig::infura(&key)).unwrap();

        let head = client.block_number().await.unwrap();
        let block = client.block_by_number(head).await.unwrap();

        assert_eq!(block.number, head);
        assert_eq!(block.transactions.len(), block.transaction_hashes.len());
    }
}
