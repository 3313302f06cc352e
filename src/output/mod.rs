//! Output writers for matched transactions

mod csv;
mod json;
mod text;

pub use self::csv::CsvWriter;
pub use json::JsonWriter;
pub use text::TextWriter;

use crate::config::OutputFormat;
use crate::error::{OutputError, Result};
use crate::extract::{extract_order_targets, OrderTargets};
use crate::types::MatchedTransaction;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Sink for decoded matches
pub trait OutputWriter {
    /// Write one match with its extracted targets
    fn write_match(&mut self, record: &MatchedTransaction, targets: &OrderTargets) -> Result<()>;

    /// Flush whatever is buffered
    fn finalize(&mut self) -> Result<()>;
}

/// Create a writer for `format`, to `path` or stdout
pub fn create_writer(format: OutputFormat, path: Option<&Path>) -> Result<Box<dyn OutputWriter>> {
    let output = open_output(path)?;
    Ok(match format {
        OutputFormat::Text => Box::new(TextWriter::new(output)),
        OutputFormat::Json => Box::new(JsonWriter::new(output)),
        OutputFormat::Csv => Box::new(CsvWriter::new(output)),
    })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match path {
        Some(p) => {
            let file = File::create(p)
                .map_err(|e| OutputError::FileCreate(format!("{}: {}", p.display(), e)))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

/// Outcome of writing a batch of matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub malformed: usize,
}

/// Extract and write every match in order.
///
/// Matches whose call data is too short for the target windows are logged
/// and skipped; they do not stop the rest of the output.
pub fn write_matches(
    writer: &mut dyn OutputWriter,
    matches: &[MatchedTransaction],
) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();

    for record in matches {
        match extract_order_targets(record) {
            Ok(targets) => {
                writer.write_match(record, &targets)?;
                summary.written += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping transaction: {}", e);
                summary.malformed += 1;
            }
        }
    }

    writer.finalize()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Transaction, TxSignature};
    use alloy::primitives::{Address, Bytes, B256, U256};

    #[derive(Default)]
    struct Collect {
        lines: Vec<String>,
        finalized: bool,
    }

    impl OutputWriter for Collect {
        fn write_match(&mut self, _: &MatchedTransaction, targets: &OrderTargets) -> Result<()> {
            self.lines.push(targets.to_string());
            Ok(())
        }

        fn finalize(&mut self) -> Result<()> {
            self.finalized = true;
            Ok(())
        }
    }

    pub(crate) fn sample_record(hash: u8, hex_len: usize) -> MatchedTransaction {
        let tx = Transaction {
            hash: B256::repeat_byte(hash),
            from: Address::repeat_byte(0x0f),
            input: Bytes::from(vec![0x11; hex_len / 2]),
            value: U256::from(1_000u64),
            nonce: 3,
            signature: TxSignature::default(),
            block_number: Some(12_000_000),
            transaction_index: Some(4),
            ..Default::default()
        };
        MatchedTransaction::new(&tx, Address::repeat_byte(0x7b))
    }

    #[test]
    fn test_malformed_records_skipped() {
        let matches = vec![
            sample_record(1, 840),
            sample_record(2, 838),
            sample_record(3, 900),
        ];

        let mut writer = Collect::default();
        let summary = write_matches(&mut writer, &matches).unwrap();

        assert_eq!(
            summary,
            WriteSummary {
                written: 2,
                malformed: 1
            }
        );
        assert_eq!(writer.lines.len(), 2);
        assert!(writer.finalized);
    }

    #[test]
    fn test_empty_matches() {
        let mut writer = Collect::default();
        let summary = write_matches(&mut writer, &[]).unwrap();
        assert_eq!(summary, WriteSummary::default());
        assert!(writer.finalized);
    }
}
