//! Furnishing label normalisation.
//!
//! The published dataset describes furnishing with a free-text label
//! (`meuble_txt`) rather than a boolean. Labels are coerced once, at load
//! time, into the `furnished` flag carried by every record.
//!
//! # Vocabulary
//!
//! - French, as published by the Ville de Paris: "meublé", "non meublé"
//! - English: "furnished", "not furnished", "unfurnished"
//!
//! A label is furnished when it contains a positive token and no negation
//! token. Matching is case-insensitive and substring-based, so "Meublé",
//! "MEUBLE" and "logement meublé" all count as furnished.

/// Substrings marking a label as furnished.
pub const FURNISHED_TOKENS: &[&str] = &["meubl", "furnished"];

/// Substrings that cancel a positive match ("non meublé", "not furnished").
pub const NEGATION_TOKENS: &[&str] = &["non", "not", "unfurnished"];

/// Derive the furnished flag from a dataset furnishing label.
///
/// Labels that mention neither vocabulary are treated as unfurnished.
pub fn is_furnished(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    has_positive_token(&lower) && !has_negation_token(&lower)
}

/// Parse a user-supplied furnishing value.
///
/// Accepts dataset labels (coerced with [`is_furnished`]) as well as plain
/// booleans (`true`/`false`, `yes`/`no`, `oui`, `1`/`0`). Returns `None` for
/// anything else so callers can report the bad value.
pub fn parse_furnishing(value: &str) -> Option<bool> {
    let lower = value.trim().to_lowercase();
    match lower.as_str() {
        "true" | "yes" | "oui" | "1" => return Some(true),
        "false" | "no" | "non" | "0" => return Some(false),
        _ => {}
    }
    if has_positive_token(&lower) {
        Some(!has_negation_token(&lower))
    } else {
        None
    }
}

/// Display label for a furnished flag, in the dataset's vocabulary.
pub fn furnishing_label(furnished: bool) -> &'static str {
    if furnished { "meublé" } else { "non meublé" }
}

fn has_positive_token(lower: &str) -> bool {
    FURNISHED_TOKENS.iter().any(|t| lower.contains(t))
}

fn has_negation_token(lower: &str) -> bool {
    NEGATION_TOKENS.iter().any(|t| lower.contains(t))
}
