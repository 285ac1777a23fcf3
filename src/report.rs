// File: src/report.rs
//! The plain-text statistics report printed by the `cvc` binary.
//!
//! Orchestration scripts parse these lines by label prefix, so the labels,
//! the `": "` separator and the two-decimal percentages with a trailing `%`
//! must not change.

use crate::core::types::{FileProcessingStats, VocabularyStats};
use crate::error::{Error, ReportError, Result};
use crate::persistence::write_atomically;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;

pub const TOTAL_LINES: &str = "Total lines";
pub const TOTAL_WORDS: &str = "Total words";
pub const REPLACEMENTS_MADE: &str = "Replacements made";
pub const REPLACEMENT_RATE: &str = "Replacement rate";
pub const ORIGINAL_VOCABULARY_SIZE: &str = "Original vocabulary size";
pub const PROCESSED_VOCABULARY_SIZE: &str = "Processed vocabulary size";
pub const VOCABULARY_REDUCTION: &str = "Vocabulary reduction";
pub const REDUCTION_RATE: &str = "Reduction rate";

/// `0.1234` -> `"12.34%"`
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub fn write_file_report<W: Write>(out: &mut W, stats: &FileProcessingStats) -> io::Result<()> {
    writeln!(out, "{}: {}", TOTAL_LINES, stats.total_lines)?;
    writeln!(out, "{}: {}", TOTAL_WORDS, stats.total_words)?;
    writeln!(out, "{}: {}", REPLACEMENTS_MADE, stats.total_replacements)?;
    writeln!(out, "{}: {}", REPLACEMENT_RATE, format_percent(stats.replacement_rate))
}

pub fn write_vocabulary_report<W: Write>(out: &mut W, stats: &VocabularyStats) -> io::Result<()> {
    writeln!(out, "{}: {}", ORIGINAL_VOCABULARY_SIZE, stats.original_vocabulary_size)?;
    writeln!(out, "{}: {}", PROCESSED_VOCABULARY_SIZE, stats.processed_vocabulary_size)?;
    writeln!(out, "{}: {}", VOCABULARY_REDUCTION, stats.vocabulary_reduction)?;
    writeln!(out, "{}: {}", REDUCTION_RATE, format_percent(stats.reduction_rate))
}

/// Structured counterpart of the text report, for `--json-report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub file: FileProcessingStats,
    pub vocabulary: Option<VocabularyStats>,
}

pub fn write_json_report(path: &Path, report: &JsonReport) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, report)
            .map_err(|e| Error::write(path, e.into()))?;
        writeln!(writer).map_err(|e| Error::write(path, e))
    })
}

/// Values recovered from a report. Labels absent from the text stay `None`;
/// rates are fractions (the `%` is stripped and divided by 100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub total_lines: Option<usize>,
    pub total_words: Option<usize>,
    pub total_replacements: Option<usize>,
    pub replacement_rate: Option<f64>,
    pub original_vocabulary_size: Option<usize>,
    pub processed_vocabulary_size: Option<usize>,
    pub vocabulary_reduction: Option<i64>,
    pub reduction_rate: Option<f64>,
}

/// Parses `Label: value` lines; unrelated lines are ignored.
pub fn parse_report(text: &str) -> std::result::Result<ParsedReport, ReportError> {
    let mut report = ParsedReport::default();

    for line in text.lines() {
        let Some((label, value)) = line.split_once(": ") else {
            continue;
        };
        let value = value.trim();
        match label {
            TOTAL_LINES => report.total_lines = Some(number(label, value)?),
            TOTAL_WORDS => report.total_words = Some(number(label, value)?),
            REPLACEMENTS_MADE => report.total_replacements = Some(number(label, value)?),
            REPLACEMENT_RATE => report.replacement_rate = Some(percent(label, value)?),
            ORIGINAL_VOCABULARY_SIZE => report.original_vocabulary_size = Some(number(label, value)?),
            PROCESSED_VOCABULARY_SIZE => report.processed_vocabulary_size = Some(number(label, value)?),
            VOCABULARY_REDUCTION => report.vocabulary_reduction = Some(number(label, value)?),
            REDUCTION_RATE => report.reduction_rate = Some(percent(label, value)?),
            _ => {}
        }
    }

    Ok(report)
}

fn number<T: std::str::FromStr>(label: &str, value: &str) -> std::result::Result<T, ReportError> {
    value.parse().map_err(|_| ReportError::InvalidValue {
        label: label.to_string(),
        value: value.to_string(),
    })
}

fn percent(label: &str, value: &str) -> std::result::Result<f64, ReportError> {
    let digits = value.strip_suffix('%').unwrap_or(value);
    number::<f64>(label, digits).map(|p| p / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_stats() -> FileProcessingStats {
        FileProcessingStats {
            input_file: "in.txt".to_string(),
            output_file: "out.txt".to_string(),
            total_lines: 42,
            total_words: 1000,
            total_replacements: 123,
            replacement_rate: 0.1234,
        }
    }

    #[test]
    fn test_file_report_format() {
        let mut out = Vec::new();
        write_file_report(&mut out, &file_stats()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total lines: 42\nTotal words: 1000\nReplacements made: 123\nReplacement rate: 12.34%\n"
        );
    }

    #[test]
    fn test_vocabulary_report_format() {
        let stats = VocabularyStats {
            original_vocabulary_size: 5,
            processed_vocabulary_size: 6,
            vocabulary_reduction: -1,
            reduction_rate: -0.2,
            total_words: 9,
        };
        let mut out = Vec::new();
        write_vocabulary_report(&mut out, &stats).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Original vocabulary size: 5\nProcessed vocabulary size: 6\nVocabulary reduction: -1\nReduction rate: -20.00%\n"
        );
    }

    #[test]
    fn test_zero_rate_formatting() {
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(1.0), "100.00%");
    }

    #[test]
    fn test_parse_full_cli_output() {
        let stdout = "Processing in.txt...\n\nProcessing complete!\nTotal lines: 42\nTotal words: 1000\n\
                      Replacements made: 123\nReplacement rate: 12.34%\n\nVocabulary Statistics:\n\
                      Original vocabulary size: 10\nProcessed vocabulary size: 8\n\
                      Vocabulary reduction: 2\nReduction rate: 20.00%\n";
        let report = parse_report(stdout).unwrap();
        assert_eq!(report.total_lines, Some(42));
        assert_eq!(report.total_words, Some(1000));
        assert_eq!(report.total_replacements, Some(123));
        assert!((report.replacement_rate.unwrap() - 0.1234).abs() < 1e-9);
        assert_eq!(report.original_vocabulary_size, Some(10));
        assert_eq!(report.processed_vocabulary_size, Some(8));
        assert_eq!(report.vocabulary_reduction, Some(2));
        assert!((report.reduction_rate.unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_parse_without_vocabulary_section() {
        let report = parse_report("Total lines: 3\nReplacement rate: 0.00%\n").unwrap();
        assert_eq!(report.total_lines, Some(3));
        assert_eq!(report.replacement_rate, Some(0.0));
        assert_eq!(report.vocabulary_reduction, None);
    }

    #[test]
    fn test_json_report_round_trips_through_serde() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = JsonReport { file: file_stats(), vocabulary: None };
        write_json_report(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["file"]["total_lines"], 42);
        assert_eq!(value["file"]["input_file"], "in.txt");
        assert!(value["vocabulary"].is_null());
    }

    #[test]
    fn test_parse_rejects_bad_value() {
        let err = parse_report("Total lines: many\n").unwrap_err();
        assert!(matches!(err, ReportError::InvalidValue { ref label, .. } if label == "Total lines"));
    }
}
