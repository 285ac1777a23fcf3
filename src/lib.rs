// src/lib.rs
//! Canonical vocabulary compression.
//!
//! Rewrites synonymous words to one canonical form taken from a curated
//! mapping, to shrink training vocabularies and to normalize user input at
//! inference time.
//!
//! ```rust,ignore
//! use cvc_core::Canonicalizer;
//!
//! let engine = Canonicalizer::from_mapping_file("mappings/synonym_to_canonical.json")?;
//! let (text, stats) = engine.process_text("The enormous building.", true);
//! assert_eq!(text, "The big building.");
//! assert_eq!(stats.replacements[0].position, 1);
//! ```

pub mod batch;
pub mod core;
pub mod error;
pub mod persistence;
pub mod report;
pub mod vocabulary;

pub use crate::batch::{BatchOptions, FileProcessor};
pub use crate::core::engine::Canonicalizer;
pub use crate::core::mapping::MappingTable;
pub use crate::core::types::{
    FileProcessingStats, MappingEntry, MappingMetadata, ProcessingStats, Replacement,
    VocabularyStats,
};
pub use crate::error::{Error, LoadError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mapping document used when none is given on the command line.
pub const DEFAULT_MAPPING_PATH: &str = "mappings/synonym_to_canonical.json";
