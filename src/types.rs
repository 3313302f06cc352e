//! Block and transaction data model
//!
//! These are the crate's own views of what the node returns. The RPC client
//! converts into them so the filter and extractor never see transport types.

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::Serialize;

/// A block with its full transaction list
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub number: u64,
    pub hash: B256,
    pub parent_hash: B256,
    pub miner: Address,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub transaction_hashes: Vec<B256>,
}

/// ECDSA signature components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TxSignature {
    pub y_parity: bool,
    pub r: U256,
    pub s: U256,
}

/// A transaction as included in a block
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub hash: B256,
    pub from: Address,
    /// `None` for contract creation
    pub to: Option<Address>,
    pub input: Bytes,
    pub value: U256,
    pub nonce: u64,
    pub signature: TxSignature,
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
}

/// A transaction that passed the filter, with its call data hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedTransaction {
    pub hash: B256,
    pub from: Address,
    pub to: Address,
    /// Lowercase hex of the full call data, no `0x` prefix
    pub input: String,
    pub value: U256,
    pub nonce: u64,
    pub signature: TxSignature,
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
}

impl MatchedTransaction {
    /// Build a record from a transaction already known to have a recipient
    pub fn new(tx: &Transaction, to: Address) -> Self {
        Self {
            hash: tx.hash,
            from: tx.from,
            to,
            input: hex::encode(&tx.input),
            value: tx.value,
            nonce: tx.nonce,
            signature: tx.signature,
            block_hash: tx.block_hash,
            block_number: tx.block_number,
            transaction_index: tx.transaction_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_transaction_encodes_input() {
        let tx = Transaction {
            hash: B256::repeat_byte(0x11),
            input: Bytes::from(vec![0xab, 0x83, 0x4b, 0xab, 0x00, 0xff]),
            nonce: 7,
            block_number: Some(100),
            transaction_index: Some(3),
            ..Default::default()
        };

        let record = MatchedTransaction::new(&tx, Address::repeat_byte(0x22));
        assert_eq!(record.input, "ab834bab00ff");
        assert_eq!(record.to, Address::repeat_byte(0x22));
        assert_eq!(record.nonce, 7);
        assert_eq!(record.block_number, Some(100));
        assert_eq!(record.transaction_index, Some(3));
    }
}
