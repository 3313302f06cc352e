//! Block fetch loop and filter worker
//!
//! Blocks are fetched one at a time, in ascending order, and handed to a
//! filter task through a single-slot channel. The fetch loop waits whenever
//! the previous block has not been taken yet, so at most three blocks are in
//! memory: the one being filtered, the queued one, and the one just fetched
//! waiting for the slot. The filter task owns the list of matches and hands
//! it back through its join handle once the channel is closed and drained.

use crate::error::{Error, Result};
use crate::filter::TxFilter;
use crate::rpc::BlockSource;
use crate::types::{Block, MatchedTransaction};
use tokio::sync::mpsc;

/// Capacity of the fetch → filter queue
pub const QUEUE_CAPACITY: usize = 1;

/// Inclusive range of block numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: u64,
    pub end: u64,
}

impl BlockRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// The `depth` most recent blocks ending at `head`.
    ///
    /// Empty when `depth` reaches past the genesis block.
    pub fn from_head(head: u64, depth: u64) -> Self {
        match depth.checked_sub(1).and_then(|back| head.checked_sub(back)) {
            Some(start) => Self::new(start, head),
            None => Self::new(head.saturating_add(1), head),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of blocks in the range
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(FetchProgress) + Send + Sync>;

/// Fetch progress information
#[derive(Debug, Clone)]
pub struct FetchProgress {
    /// Block just handed to the filter
    pub current_block: u64,
    /// Blocks handed off so far
    pub blocks_done: u64,
    /// Total blocks to process
    pub total_blocks: u64,
    /// Percentage complete
    pub percent: f64,
}

/// Fetch every block of `range` in order and push it into `blocks`.
///
/// Stops at the first failed request. The queue is closed when `blocks` is
/// dropped on return, whether the range completed or not.
pub async fn fetch_blocks<S: BlockSource>(
    source: &S,
    range: BlockRange,
    blocks: mpsc::Sender<Block>,
    progress: Option<&ProgressCallback>,
) -> Result<()> {
    let total_blocks = range.len();
    let mut blocks_done = 0;

    for number in range.start..=range.end {
        let block = source.block_by_number(number).await?;

        blocks
            .send(block)
            .await
            .map_err(|_| Error::Worker("filter stopped receiving blocks".to_string()))?;

        blocks_done += 1;
        if let Some(cb) = progress {
            cb(FetchProgress {
                current_block: number,
                blocks_done,
                total_blocks,
                percent: (blocks_done as f64 / total_blocks as f64) * 100.0,
            });
        }
    }

    Ok(())
}

/// Drain `blocks` until the sender side closes, collecting matches
async fn filter_worker(
    filter: TxFilter,
    mut blocks: mpsc::Receiver<Block>,
) -> Vec<MatchedTransaction> {
    let mut matches = Vec::new();

    while let Some(block) = blocks.recv().await {
        let found = filter.collect_matches(&block, &mut matches);
        if found > 0 {
            tracing::info!("Block {}: {} matching transactions", block.number, found);
        } else {
            tracing::debug!(
                "Block {}: {} transactions, no matches",
                block.number,
                block.transactions.len()
            );
        }
    }

    matches
}

/// Fetch → filter pipeline over one block source
pub struct BlockPipeline<S> {
    source: S,
    filter: TxFilter,
    progress_callback: Option<ProgressCallback>,
}

impl<S: BlockSource> BlockPipeline<S> {
    pub fn new(source: S, filter: TxFilter) -> Self {
        Self {
            source,
            filter,
            progress_callback: None,
        }
    }

    /// Set progress callback
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(FetchProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve the `depth` most recent blocks against the current head
    pub async fn latest_range(&self, depth: u64) -> Result<BlockRange> {
        let head = self.source.block_number().await?;
        Ok(BlockRange::from_head(head, depth))
    }

    /// Run the pipeline over `range` and return the matches in
    /// (block number, transaction index) order
    pub async fn run(&self, range: BlockRange) -> Result<Vec<MatchedTransaction>> {
        tracing::info!(
            "Scanning blocks {} to {} ({} blocks)",
            range.start,
            range.end,
            range.len()
        );

        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let worker = tokio::spawn(filter_worker(self.filter.clone(), receiver));

        let fetched =
            fetch_blocks(&self.source, range, sender, self.progress_callback.as_ref()).await;

        if let Err(e) = fetched {
            worker.abort();
            return Err(e);
        }

        worker.await.map_err(|e| Error::Worker(e.to_string()))
    }
}
