// File: src/batch.rs
use crate::core::engine::Canonicalizer;
use crate::core::stats::FileTotals;
use crate::core::types::{FileProcessingStats, ProcessingStats};
use crate::error::{Error, Result};
use crate::persistence::write_atomically;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub preserve_case: bool,
    /// Canonicalize lines on the rayon pool. The whole input is held in memory.
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            preserve_case: true,
            parallel: false,
        }
    }
}

/// Canonicalizes files line by line.
///
/// Every input line yields exactly one `\n`-terminated output line, in
/// order. Line terminators (`\n` or `\r\n`) are stripped before processing
/// and a missing final terminator is added.
pub struct FileProcessor {
    canonicalizer: Canonicalizer,
    options: BatchOptions,
}

impl FileProcessor {
    pub fn new(canonicalizer: Canonicalizer, options: BatchOptions) -> Self {
        Self {
            canonicalizer,
            options,
        }
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Processes `input` into `output`, replacing `output` only on success.
    pub fn process_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<FileProcessingStats> {
        let (input, output) = (input.as_ref(), output.as_ref());
        debug!(input = %input.display(), output = %output.display(), parallel = self.options.parallel, "processing file");

        let file = File::open(input).map_err(|e| Error::read(input, e))?;
        let reader = BufReader::new(file);

        let totals = if self.options.parallel {
            self.process_parallel(reader, input, output)?
        } else {
            self.process_streaming(reader, input, output)?
        };

        let stats = totals.into_stats(&input.display().to_string(), &output.display().to_string());
        info!(
            lines = stats.total_lines,
            words = stats.total_words,
            replacements = stats.total_replacements,
            "file processed"
        );
        Ok(stats)
    }

    fn process_line(&self, line: &str) -> (String, ProcessingStats) {
        self.canonicalizer
            .process_text(line, self.options.preserve_case)
    }

    /// One line in flight at a time.
    fn process_streaming(
        &self,
        reader: BufReader<File>,
        input: &Path,
        output: &Path,
    ) -> Result<FileTotals> {
        let mut totals = FileTotals::new();
        write_atomically(output, |writer| {
            for line in reader.lines() {
                let line = line.map_err(|e| Error::read(input, e))?;
                let (processed, stats) = self.process_line(&line);
                totals.add_line(&stats);
                writeln!(writer, "{}", processed).map_err(|e| Error::write(output, e))?;
            }
            Ok(())
        })?;
        Ok(totals)
    }

    /// Reads every line, canonicalizes them in parallel, then writes and
    /// aggregates in input order.
    fn process_parallel(
        &self,
        reader: BufReader<File>,
        input: &Path,
        output: &Path,
    ) -> Result<FileTotals> {
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| Error::read(input, e))?;

        let processed: Vec<(String, ProcessingStats)> = lines
            .par_iter()
            .map(|line| self.process_line(line))
            .collect();

        let mut totals = FileTotals::new();
        write_atomically(output, |writer| {
            for (text, stats) in &processed {
                totals.add_line(stats);
                writeln!(writer, "{}", text).map_err(|e| Error::write(output, e))?;
            }
            Ok(())
        })?;
        Ok(totals)
    }
}
