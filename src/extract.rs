//! Order target extraction from `atomicMatch_` call data
//!
//! The offsets are character offsets into the hex-encoded call data (selector
//! included), not byte offsets. Each window is one 32-byte ABI word; the
//! static target address sits in its last 20 bytes.

use crate::error::DecodeError;
use crate::types::MatchedTransaction;
use std::fmt;

/// Hex characters in one ABI word
pub const WORD_HEX_LEN: usize = 64;

/// Offset of the address inside a word (12 bytes of left padding)
pub const ADDRESS_TAIL_START: usize = 24;

/// A fixed word position in hex-encoded call data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWindow {
    pub start: usize,
}

impl WordWindow {
    pub const fn end(&self) -> usize {
        self.start + WORD_HEX_LEN
    }

    /// The 40 hex chars of the address held in this word
    pub fn address_hex<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start + ADDRESS_TAIL_START..self.end())
    }
}

/// Word holding the buy order's static target
pub const BUY_STATIC_TARGET: WordWindow = WordWindow { start: 328 };

/// Word holding the sell order's static target
pub const SELL_STATIC_TARGET: WordWindow = WordWindow { start: 776 };

/// Minimum hex length of call data that has both windows
pub const MIN_CALL_DATA_HEX_LEN: usize = SELL_STATIC_TARGET.end();

/// Static targets of the buy and sell orders in one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTargets {
    pub buy: String,
    pub sell: String,
}

impl fmt::Display for OrderTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buy order static target: {}   sell order static target: {}",
            self.buy, self.sell
        )
    }
}

/// Pull both static targets out of a matched transaction's call data
pub fn extract_order_targets(record: &MatchedTransaction) -> Result<OrderTargets, DecodeError> {
    let input = record.input.as_str();
    let malformed = || DecodeError::MalformedCallData {
        hash: record.hash,
        len: input.len(),
        required: MIN_CALL_DATA_HEX_LEN,
    };

    if input.len() < MIN_CALL_DATA_HEX_LEN {
        return Err(malformed());
    }

    let buy = BUY_STATIC_TARGET.address_hex(input).ok_or_else(malformed)?;
    let sell = SELL_STATIC_TARGET.address_hex(input).ok_or_else(malformed)?;

    Ok(OrderTargets {
        buy: buy.to_string(),
        sell: sell.to_string(),
    })
}
