//! Plain text output, one line per match

use crate::error::Result;
use crate::extract::OrderTargets;
use crate::output::OutputWriter;
use crate::types::MatchedTransaction;
use std::io::Write;

/// Text writer
pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_match(&mut self, _record: &MatchedTransaction, targets: &OrderTargets) -> Result<()> {
        writeln!(self.out, "{}", targets)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
