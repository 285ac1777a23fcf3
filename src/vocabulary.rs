// File: src/vocabulary.rs
use crate::core::stats::rate;
use crate::core::tokenizer::word_runs;
use crate::core::types::VocabularyStats;
use std::collections::HashSet;

/// Distinct lowercase word forms in `text`, plus the number of word runs.
/// O(n) in the text length.
pub fn vocabulary(text: &str) -> (HashSet<String>, usize) {
    let mut words = HashSet::new();
    let mut total = 0;
    for run in word_runs(text) {
        total += 1;
        words.insert(run.to_lowercase());
    }
    (words, total)
}

/// Compares the vocabularies of a raw document and its canonicalized form.
///
/// Works on whole-document word sets, independent of any replacement records.
/// The reduction is negative when processing adds distinct forms.
pub fn analyze(original: &str, processed: &str) -> VocabularyStats {
    let (original_vocab, total_words) = vocabulary(original);
    let (processed_vocab, _) = vocabulary(processed);

    let original_size = original_vocab.len();
    let processed_size = processed_vocab.len();
    let reduction = original_size as i64 - processed_size as i64;
    let reduction_rate = if original_size == 0 {
        0.0
    } else {
        reduction as f64 / original_size as f64
    };

    VocabularyStats {
        original_vocabulary_size: original_size,
        processed_vocabulary_size: processed_size,
        vocabulary_reduction: reduction,
        reduction_rate,
        total_words,
    }
}

/// Share of the original vocabulary that survives processing.
pub fn retention_rate(stats: &VocabularyStats) -> f64 {
    rate(stats.processed_vocabulary_size, stats.original_vocabulary_size)
}
