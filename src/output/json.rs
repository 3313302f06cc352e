//! JSON output writer

use crate::error::Result;
use crate::extract::OrderTargets;
use crate::output::OutputWriter;
use crate::types::MatchedTransaction;
use serde::Serialize;
use std::io::Write;

/// One entry of the JSON array
#[derive(Serialize)]
struct MatchEntry<'a> {
    #[serde(flatten)]
    transaction: &'a MatchedTransaction,
    buy_static_target: &'a str,
    sell_static_target: &'a str,
}

/// JSON writer; buffers entries and writes a single array on finalize
pub struct JsonWriter<W: Write> {
    out: W,
    entries: Vec<serde_json::Value>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            entries: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_match(&mut self, record: &MatchedTransaction, targets: &OrderTargets) -> Result<()> {
        let entry = MatchEntry {
            transaction: record,
            buy_static_target: &targets.buy,
            sell_static_target: &targets.sell,
        };
        self.entries.push(serde_json::to_value(&entry)?);
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.entries)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
