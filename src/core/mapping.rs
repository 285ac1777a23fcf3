// File: src/core/mapping.rs
use crate::core::types::{MappingEntry, MappingMetadata};
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Shape of one value under `mappings` in the source document.
#[derive(Deserialize)]
struct RawEntry {
    canonical: String,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    frequency_rank: u32,
    #[serde(default)]
    domain: String,
}

/// A lowercase key reached by authored synonyms that disagree on the canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub key: String,
    pub canonicals: Vec<String>,
}

/// Immutable synonym -> canonical lookup, built once and shared read-only.
///
/// Holds the authored `reverse_lookup` (exact case) and the derived
/// case-insensitive index. Nothing mutates a table after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    reverse_lookup: HashMap<String, String>,
    case_insensitive: HashMap<String, String>,
    metadata: MappingMetadata,
}

impl MappingTable {
    /// Parses a mapping document. `origin` names the source in errors.
    pub fn from_json_str(doc: &str, origin: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(doc).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_document(value, origin)
    }

    pub fn from_reader<R: std::io::Read>(reader: R, origin: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_reader(reader).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_document(value, origin)
    }

    /// Reads and builds the mapping document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Read {
            origin: origin.clone(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &origin)
    }

    /// Builds the table from an already-parsed document. `reverse_lookup` is
    /// authoritative; `mappings` is kept for introspection only.
    pub fn from_document(doc: Value, origin: &str) -> Result<Self, LoadError> {
        let invalid = |detail: String| LoadError::InvalidEntry {
            origin: origin.to_string(),
            detail,
        };

        let Value::Object(mut root) = doc else {
            return Err(invalid("top level is not an object".to_string()));
        };

        let reverse = match root.remove("reverse_lookup") {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(invalid(format!(
                    "`reverse_lookup` must be an object, found {}",
                    kind_of(&other)
                )))
            }
            None => {
                return Err(LoadError::MissingReverseLookup {
                    origin: origin.to_string(),
                })
            }
        };

        let mut pairs = Vec::with_capacity(reverse.len());
        for (synonym, canonical) in reverse {
            match canonical {
                Value::String(canonical) => pairs.push((synonym, canonical)),
                other => {
                    return Err(invalid(format!(
                        "reverse_lookup[{:?}] must be a string, found {}",
                        synonym,
                        kind_of(&other)
                    )))
                }
            }
        }

        let entries = match root.remove("mappings") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(map)) => parse_entries(map).map_err(invalid)?,
            Some(other) => {
                return Err(invalid(format!(
                    "`mappings` must be an object, found {}",
                    kind_of(&other)
                )))
            }
        };

        let metadata = match root.remove("metadata") {
            None | Some(Value::Null) => MappingMetadata::default(),
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(origin, error = %e, "ignoring metadata of unexpected shape");
                MappingMetadata::default()
            }),
        };

        Ok(Self::build(entries, pairs, metadata))
    }

    /// Builds the reverse lookup from the entries themselves: categories in
    /// order, then synonyms within each. A synonym claimed by two different
    /// canonicals keeps the last one and is reported with `warn!`.
    pub fn from_entries(entries: Vec<MappingEntry>, metadata: MappingMetadata) -> Self {
        let mut position: HashMap<String, usize> = HashMap::new();
        let mut pairs: Vec<(String, String)> = Vec::new();

        for entry in &entries {
            for synonym in &entry.synonyms {
                match position.get(synonym) {
                    Some(&i) => {
                        if pairs[i].1 != entry.canonical {
                            warn!(
                                synonym = %synonym,
                                previous = %pairs[i].1,
                                canonical = %entry.canonical,
                                category = %entry.category,
                                "synonym mapped to two canonicals, last entry wins"
                            );
                        }
                        pairs[i].1 = entry.canonical.clone();
                    }
                    None => {
                        position.insert(synonym.clone(), pairs.len());
                        pairs.push((synonym.clone(), entry.canonical.clone()));
                    }
                }
            }
        }

        Self::build(entries, pairs, metadata)
    }

    /// `pairs` must have unique keys, in the order the lowercase index should
    /// see them: the last lowercase-colliding key wins.
    fn build(
        entries: Vec<MappingEntry>,
        pairs: Vec<(String, String)>,
        metadata: MappingMetadata,
    ) -> Self {
        let mut reverse_lookup = HashMap::with_capacity(pairs.len());
        let mut case_insensitive = HashMap::with_capacity(pairs.len());

        for (synonym, canonical) in pairs {
            case_insensitive.insert(synonym.to_lowercase(), canonical.clone());
            reverse_lookup.insert(synonym, canonical);
        }

        debug!(
            categories = entries.len(),
            synonyms = reverse_lookup.len(),
            folded = case_insensitive.len(),
            "mapping table built"
        );

        Self {
            entries,
            reverse_lookup,
            case_insensitive,
            metadata,
        }
    }

    /// Exact-case lookup first, then the lowercase index.
    /// O(k) in the word length; no allocation on an exact hit.
    pub fn resolve_canonical(&self, word: &str) -> Option<&str> {
        if let Some(canonical) = self.reverse_lookup.get(word) {
            return Some(canonical.as_str());
        }
        self.case_insensitive
            .get(&word.to_lowercase())
            .map(String::as_str)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn entry(&self, category: &str) -> Option<&MappingEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    pub fn metadata(&self) -> &MappingMetadata {
        &self.metadata
    }

    /// Number of authored reverse-lookup keys.
    pub fn len(&self) -> usize {
        self.reverse_lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse_lookup.is_empty()
    }

    /// Distinct canonical targets, sorted.
    pub fn canonical_forms(&self) -> Vec<&str> {
        self.reverse_lookup
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Lowercase keys whose authored spellings map to different canonicals.
    /// Only the last of them is reachable through the case-insensitive index.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut by_key: HashMap<String, BTreeSet<&str>> = HashMap::new();
        for (synonym, canonical) in &self.reverse_lookup {
            by_key
                .entry(synonym.to_lowercase())
                .or_default()
                .insert(canonical);
        }

        let mut collisions: Vec<Collision> = by_key
            .into_iter()
            .filter(|(_, canonicals)| canonicals.len() > 1)
            .map(|(key, canonicals)| Collision {
                key,
                canonicals: canonicals.into_iter().map(str::to_string).collect(),
            })
            .collect();
        collisions.sort_by(|a, b| a.key.cmp(&b.key));
        collisions
    }
}

fn parse_entries(map: Map<String, Value>) -> Result<Vec<MappingEntry>, String> {
    map.into_iter()
        .map(|(category, value)| {
            let raw: RawEntry = serde_json::from_value(value)
                .map_err(|e| format!("mappings[{:?}]: {}", category, e))?;
            Ok(MappingEntry {
                category,
                canonical: raw.canonical,
                synonyms: raw.synonyms,
                frequency_rank: raw.frequency_rank,
                domain: raw.domain,
            })
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "metadata": {"version": "1.0", "total_mappings": 2, "sources": ["test"]},
        "mappings": {
            "size_big": {"canonical": "big", "synonyms": ["large", "huge"], "frequency_rank": 1, "domain": "general"},
            "emotion_happy": {"canonical": "happy", "synonyms": ["joyful", "glad"], "frequency_rank": 2, "domain": "general"}
        },
        "reverse_lookup": {"large": "big", "huge": "big", "joyful": "happy", "glad": "happy", "NASA": "agency"}
    }"#;

    fn entry(category: &str, canonical: &str, synonyms: &[&str]) -> MappingEntry {
        MappingEntry {
            category: category.to_string(),
            canonical: canonical.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            frequency_rank: 1,
            domain: "general".to_string(),
        }
    }

    #[test]
    fn test_exact_then_case_insensitive() {
        let table = MappingTable::from_json_str(DOC, "test").unwrap();
        assert_eq!(table.resolve_canonical("large"), Some("big"));
        assert_eq!(table.resolve_canonical("LARGE"), Some("big"));
        assert_eq!(table.resolve_canonical("Joyful"), Some("happy"));
        assert_eq!(table.resolve_canonical("nasa"), Some("agency"));
        assert_eq!(table.resolve_canonical("building"), None);
    }

    #[test]
    fn test_exact_match_beats_folded_key() {
        let doc = r#"{"reverse_lookup": {"Apple": "company", "apple": "fruit"}}"#;
        let table = MappingTable::from_json_str(doc, "test").unwrap();
        assert_eq!(table.resolve_canonical("Apple"), Some("company"));
        assert_eq!(table.resolve_canonical("apple"), Some("fruit"));
        // Only the folded index can answer this one; the later key wins.
        assert_eq!(table.resolve_canonical("APPLE"), Some("fruit"));
        assert_eq!(table.collisions().len(), 1);
        assert_eq!(table.collisions()[0].key, "apple");
    }

    #[test]
    fn test_metadata_and_entries() {
        let table = MappingTable::from_json_str(DOC, "test").unwrap();
        assert_eq!(table.metadata().version.as_deref(), Some("1.0"));
        assert_eq!(table.metadata().total_mappings, Some(2));
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.entries()[0].category, "size_big");
        assert_eq!(table.entry("emotion_happy").unwrap().synonyms, vec!["joyful", "glad"]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.canonical_forms(), vec!["agency", "big", "happy"]);
    }

    #[test]
    fn test_missing_reverse_lookup() {
        let err = MappingTable::from_json_str(r#"{"mappings": {}}"#, "doc.json").unwrap_err();
        assert!(matches!(err, LoadError::MissingReverseLookup { .. }));
        assert!(err.to_string().contains("doc.json"));
    }

    #[test]
    fn test_unparsable_document() {
        let err = MappingTable::from_json_str("{not json", "doc.json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_non_string_canonical_rejected() {
        let err = MappingTable::from_json_str(r#"{"reverse_lookup": {"large": 3}}"#, "t").unwrap_err();
        assert!(matches!(err, LoadError::InvalidEntry { .. }));
    }

    #[test]
    fn test_metadata_is_free_form() {
        let doc = r#"{"metadata": "anything", "reverse_lookup": {"large": "big"}}"#;
        let table = MappingTable::from_json_str(doc, "t").unwrap();
        assert_eq!(table.metadata(), &MappingMetadata::default());
        assert_eq!(table.resolve_canonical("large"), Some("big"));
    }

    #[test]
    fn test_from_entries_last_writer_wins() {
        let table = MappingTable::from_entries(
            vec![
                entry("size_big", "big", &["large", "grand"]),
                entry("quality_good", "good", &["grand", "fine"]),
            ],
            MappingMetadata::default(),
        );
        assert_eq!(table.resolve_canonical("grand"), Some("good"));
        assert_eq!(table.resolve_canonical("large"), Some("big"));
        assert_eq!(table.len(), 3);
    }
}
