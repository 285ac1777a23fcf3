// File: src/core/casing.rs

/// Reapplies the capitalization pattern of `original` to `canonical`.
///
/// - shouting (`ENORMOUS`, `A1`) -> `BIG`
/// - leading capital (`Enormous`, `McHuge`) -> `Big`
/// - anything else -> `big`
pub fn preserve_case(original: &str, canonical: &str) -> String {
    if is_shouting(original) {
        canonical.to_uppercase()
    } else if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(canonical)
    } else {
        canonical.to_lowercase()
    }
}

/// At least one cased character and no lowercase ones. Digits and
/// underscores neither make nor break it.
fn is_shouting(word: &str) -> bool {
    let mut has_upper = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        has_upper |= c.is_uppercase();
    }
    has_upper
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}
