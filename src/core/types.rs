// src/core/types.rs
use serde::{Deserialize, Serialize};

/// One synonym group of the mapping document.
/// `category` is the key the entry was stored under in `mappings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub category: String,
    pub canonical: String,
    pub synonyms: Vec<String>,
    pub frequency_rank: u32,
    pub domain: String,
}

/// Descriptive header of a mapping document. Every field is optional; the
/// engine never depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingMetadata {
    pub version: Option<String>,
    pub description: Option<String>,
    pub creation_date: Option<String>,
    pub total_mappings: Option<u64>,
    pub total_synonyms: Option<u64>,
    pub sources: Vec<String>,
}

/// A single substitution made by `process_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// 0-based index of the whitespace-delimited unit.
    pub position: usize,
    /// The core word as it appeared in the input.
    pub original: String,
    /// The replacement after case preservation.
    pub canonical: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub total_words: usize,
    pub replacements_made: usize,
    /// `replacements_made / total_words`, 0 for empty input.
    pub replacement_rate: f64,
    pub replacements: Vec<Replacement>,
}

/// Aggregate over every line of one batch-processed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProcessingStats {
    pub input_file: String,
    pub output_file: String,
    pub total_lines: usize,
    pub total_words: usize,
    pub total_replacements: usize,
    /// Recomputed from the sums, never an average of per-line rates.
    pub replacement_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub original_vocabulary_size: usize,
    pub processed_vocabulary_size: usize,
    /// `original - processed`; negative values are valid.
    pub vocabulary_reduction: i64,
    pub reduction_rate: f64,
    /// Number of word runs in the original text.
    pub total_words: usize,
}
