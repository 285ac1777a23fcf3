use crate::core::casing::preserve_case;
use crate::core::mapping::MappingTable;
use crate::core::tokenizer::{decompose, split_units, WordParts};
use crate::core::types::{ProcessingStats, Replacement, VocabularyStats};
use crate::error::{Error, Result};
use crate::persistence::load_mapping;
use crate::vocabulary;
use std::path::Path;
use std::sync::Arc;

// The canonicalizer owns nothing but a shared handle to the table, so clones
// are cheap and can be handed to parallel workers.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    table: Arc<MappingTable>,
}

impl Canonicalizer {
    pub fn new(table: Arc<MappingTable>) -> Self {
        Self { table }
    }

    pub fn from_mapping_file(path: impl AsRef<Path>) -> Result<Self> {
        let table = load_mapping(path.as_ref())?;
        Ok(Self::new(Arc::new(table)))
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// The replacement for a core word, cased when `keep_case` is set, or `None`
    /// when the table does not know it.
    pub fn canonicalize(&self, core: &str, keep_case: bool) -> Option<String> {
        let canonical = self.table.resolve_canonical(core)?;
        Some(if keep_case {
            preserve_case(core, canonical)
        } else {
            canonical.to_string()
        })
    }

    /// Rewrites every resolvable unit of `text` and reports what changed.
    ///
    /// Units are rejoined with single spaces. Units without a core word and
    /// unknown words pass through byte for byte.
    pub fn process_text(&self, text: &str, keep_case: bool) -> (String, ProcessingStats) {
        let mut processed = String::with_capacity(text.len());
        let mut replacements = Vec::new();
        let mut total_words = 0;

        for (position, unit) in split_units(text).enumerate() {
            total_words += 1;
            if position > 0 {
                processed.push(' ');
            }

            let rewrite = decompose(unit).and_then(|parts| {
                self.canonicalize(parts.core, keep_case)
                    .map(|cased| (parts, cased))
            });

            match rewrite {
                Some((WordParts { prefix, core, suffix }, cased)) => {
                    processed.push_str(prefix);
                    processed.push_str(&cased);
                    processed.push_str(suffix);
                    replacements.push(Replacement {
                        position,
                        original: core.to_string(),
                        canonical: cased,
                    });
                }
                None => processed.push_str(unit),
            }
        }

        (processed, ProcessingStats::from_records(total_words, replacements))
    }

    /// Vocabulary sizes of a document before and after canonicalization
    /// (case preserved).
    pub fn vocabulary_stats(&self, text_file: impl AsRef<Path>) -> Result<VocabularyStats> {
        let path = text_file.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let (processed, _) = self.process_text(&content, true);
        Ok(vocabulary::analyze(&content, &processed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Canonicalizer {
        let doc = r#"{
            "mappings": {
                "size_big": {"canonical": "big", "synonyms": ["large", "huge", "enormous"], "frequency_rank": 1, "domain": "general"},
                "emotion_happy": {"canonical": "happy", "synonyms": ["joyful", "glad"], "frequency_rank": 1, "domain": "general"}
            },
            "reverse_lookup": {"large": "big", "huge": "big", "enormous": "big", "joyful": "happy", "glad": "happy"}
        }"#;
        Canonicalizer::new(Arc::new(MappingTable::from_json_str(doc, "test").unwrap()))
    }

    #[test]
    fn test_basic_text_processing() {
        let (output, stats) = engine().process_text("The large building made me joyful.", true);
        assert_eq!(output, "The big building made me happy.");
        assert_eq!(stats.total_words, 6);
        assert_eq!(stats.replacements_made, 2);
        assert!((stats.replacement_rate - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_case_preservation() {
        let (output, _) = engine().process_text("The LARGE building made me Joyful.", true);
        assert_eq!(output, "The BIG building made me Happy.");
    }

    #[test]
    fn test_no_case_preservation() {
        let (output, stats) = engine().process_text("The LARGE building made me JOYFUL.", false);
        assert_eq!(output, "The big building made me happy.");
        assert_eq!(stats.replacements_made, 2);
    }

    #[test]
    fn test_replacement_record() {
        let (output, stats) = engine().process_text("The enormous building.", true);
        assert_eq!(output, "The big building.");
        assert_eq!(
            stats.replacements,
            vec![Replacement {
                position: 1,
                original: "enormous".to_string(),
                canonical: "big".to_string(),
            }]
        );
    }

    #[test]
    fn test_record_holds_cased_replacement() {
        let (_, stats) = engine().process_text("ENORMOUS", true);
        assert_eq!(stats.replacements[0].original, "ENORMOUS");
        assert_eq!(stats.replacements[0].canonical, "BIG");
    }

    #[test]
    fn test_punctuation_kept_around_replacement() {
        let (output, _) = engine().process_text("(huge), \"glad!\" ...", true);
        assert_eq!(output, "(big), \"happy!\" ...");
    }

    #[test]
    fn test_no_matches_pass_through() {
        let input = "The small house made me sad.";
        let (output, stats) = engine().process_text(input, true);
        assert_eq!(output, input);
        assert_eq!(stats.replacements_made, 0);
        assert!(stats.replacements.is_empty());
    }

    #[test]
    fn test_unsplittable_units_count_as_words() {
        let (output, stats) = engine().process_text("huge-ish -- don't huge", true);
        assert_eq!(output, "huge-ish -- don't big");
        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.replacements[0].position, 3);
    }

    #[test]
    fn test_empty_text() {
        let (output, stats) = engine().process_text("", true);
        assert_eq!(output, "");
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.replacements_made, 0);
        assert_eq!(stats.replacement_rate, 0.0);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let (output, _) = engine().process_text("  a\tlarge \n  b ", true);
        assert_eq!(output, "a big b");
    }

    #[test]
    fn test_idempotent() {
        let engine = engine();
        let (once, _) = engine.process_text("Huge, LARGE and enormous things made us glad.", true);
        let (twice, stats) = engine.process_text(&once, true);
        assert_eq!(once, twice);
        assert_eq!(stats.replacements_made, 0);
    }
}
