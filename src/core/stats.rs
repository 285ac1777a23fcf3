// File: src/core/stats.rs
use crate::core::types::{FileProcessingStats, ProcessingStats, Replacement};
use std::ops::AddAssign;

/// `numerator / denominator`, or 0 when there is nothing to divide by.
pub fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ProcessingStats {
    /// Every unit counts toward `total_words`, rewritable or not.
    pub fn from_records(total_words: usize, replacements: Vec<Replacement>) -> Self {
        let replacements_made = replacements.len();
        Self {
            total_words,
            replacements_made,
            replacement_rate: rate(replacements_made, total_words),
            replacements,
        }
    }
}

/// Running sums over the lines of a file.
///
/// Only counts are summed; the rate is derived from the sums at the end, so
/// short lines carry no extra weight. Addition is commutative, so partial
/// totals from parallel workers combine in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTotals {
    pub total_lines: usize,
    pub total_words: usize,
    pub total_replacements: usize,
}

impl FileTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one processed line.
    pub fn add_line(&mut self, stats: &ProcessingStats) {
        self.total_lines += 1;
        self.total_words += stats.total_words;
        self.total_replacements += stats.replacements_made;
    }

    pub fn replacement_rate(&self) -> f64 {
        rate(self.total_replacements, self.total_words)
    }

    pub fn into_stats(self, input_file: &str, output_file: &str) -> FileProcessingStats {
        FileProcessingStats {
            input_file: input_file.to_string(),
            output_file: output_file.to_string(),
            total_lines: self.total_lines,
            total_words: self.total_words,
            total_replacements: self.total_replacements,
            replacement_rate: self.replacement_rate(),
        }
    }
}

impl AddAssign for FileTotals {
    fn add_assign(&mut self, other: Self) {
        self.total_lines += other.total_lines;
        self.total_words += other.total_words;
        self.total_replacements += other.total_replacements;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(total_words: usize, replaced: usize) -> ProcessingStats {
        let records = (0..replaced)
            .map(|i| Replacement {
                position: i,
                original: "huge".to_string(),
                canonical: "big".to_string(),
            })
            .collect();
        ProcessingStats::from_records(total_words, records)
    }

    #[test]
    fn test_empty_text_rate_is_zero() {
        let stats = ProcessingStats::from_records(0, Vec::new());
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.replacements_made, 0);
        assert_eq!(stats.replacement_rate, 0.0);
    }

    #[test]
    fn test_rate_from_sums_not_average() {
        let mut totals = FileTotals::new();
        totals.add_line(&line(2, 1));
        totals.add_line(&line(3, 0));
        assert_eq!(totals.total_lines, 2);
        assert_eq!(totals.total_words, 5);
        assert_eq!(totals.total_replacements, 1);
        // An average of per-line rates would give 0.25.
        assert!((totals.replacement_rate() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_partial_totals_combine() {
        let mut a = FileTotals::new();
        a.add_line(&line(4, 2));
        let mut b = FileTotals::new();
        b.add_line(&line(6, 1));
        b.add_line(&line(0, 0));

        let mut merged = b;
        merged += a;
        assert_eq!(merged.total_lines, 3);
        assert_eq!(merged.total_words, 10);
        assert_eq!(merged.total_replacements, 3);

        let stats = merged.into_stats("in.txt", "out.txt");
        assert_eq!(stats.input_file, "in.txt");
        assert!((stats.replacement_rate - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_blank_lines_still_count_as_lines() {
        let mut totals = FileTotals::new();
        totals.add_line(&line(0, 0));
        assert_eq!(totals.total_lines, 1);
        assert_eq!(totals.replacement_rate(), 0.0);
    }
}
