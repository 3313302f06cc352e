//! RPC access to the node the blocks come from

mod client;

pub use client::{BlockSource, NodeClient};
