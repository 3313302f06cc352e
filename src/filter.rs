//! Transaction filter
//!
//! Keeps transactions sent to one contract whose call data starts with one
//! function selector.

use crate::types::{Block, MatchedTransaction, Transaction};
use alloy::primitives::{address, Address};
use std::fmt;

/// Wyvern exchange v2 (OpenSea)
pub const WYVERN_EXCHANGE: Address = address!("7Be8076f4EA4A4AD08075C2508e481d6C946D12b");

/// `atomicMatch_` selector
pub const ATOMIC_MATCH_SELECTOR: Selector = Selector([0xab, 0x83, 0x4b, 0xab]);

/// 4-byte function selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    pub const LEN: usize = 4;

    /// Selector prefix of some call data, if it is long enough to have one
    pub fn of(input: &[u8]) -> Option<Self> {
        let bytes: [u8; 4] = input.get(..Self::LEN)?.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Contract address and selector a transaction has to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTarget {
    pub address: Address,
    pub selector: Selector,
}

impl Default for MatchTarget {
    fn default() -> Self {
        Self {
            address: WYVERN_EXCHANGE,
            selector: ATOMIC_MATCH_SELECTOR,
        }
    }
}

/// Filter applied to every transaction of every fetched block
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    target: MatchTarget,
}

impl TxFilter {
    pub fn new(target: MatchTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &MatchTarget {
        &self.target
    }

    /// Recipient of `tx` if it is a call to the target with the target selector
    pub fn matches(&self, tx: &Transaction) -> Option<Address> {
        // contract creations have no recipient
        let to = tx.to?;
        if to != self.target.address {
            return None;
        }
        match Selector::of(&tx.input) {
            Some(selector) if selector == self.target.selector => Some(to),
            _ => None,
        }
    }

    /// Append the block's matching transactions to `out`, in block order.
    /// Returns how many were appended.
    pub fn collect_matches(&self, block: &Block, out: &mut Vec<MatchedTransaction>) -> usize {
        let before = out.len();
        out.extend(
            block
                .transactions
                .iter()
                .filter_map(|tx| self.matches(tx).map(|to| MatchedTransaction::new(tx, to))),
        );
        out.len() - before
    }
}
