//! CSV output writer

use crate::error::{OutputError, Result};
use crate::extract::OrderTargets;
use crate::output::OutputWriter;
use crate::types::MatchedTransaction;
use std::io::Write;

const HEADER: [&str; 6] = [
    "block_number",
    "transaction_index",
    "transaction_hash",
    "from",
    "buy_static_target",
    "sell_static_target",
];

/// CSV output writer
pub struct CsvWriter<W: Write> {
    /// CSV writer
    writer: csv::Writer<W>,
    /// Whether header has been written
    header_written: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| OutputError::CsvWrite(e.to_string()))?;
        self.header_written = true;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::CsvWrite(e.to_string()).into())
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_match(&mut self, record: &MatchedTransaction, targets: &OrderTargets) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }

        let row = [
            record.block_number.map(|n| n.to_string()).unwrap_or_default(),
            record
                .transaction_index
                .map(|i| i.to_string())
                .unwrap_or_default(),
            format!("{:#x}", record.hash),
            format!("{:#x}", record.from),
            targets.buy.clone(),
            targets.sell.clone(),
        ];

        self.writer
            .write_record(&row)
            .map_err(|e| OutputError::CsvWrite(e.to_string()))?;

        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        // header only, so an empty scan still yields a valid file
        if !self.header_written {
            self.write_header()?;
        }

        self.writer
            .flush()
            .map_err(|e| OutputError::CsvWrite(e.to_string()))?;

        Ok(())
    }
}
