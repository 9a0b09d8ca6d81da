//! Auxiliary query extractors.
//!
//! Independent of date parsing: callers run these on the same query text
//! to pull out the patient a query is about, whether it asks for a count,
//! and whether it looks at the past or the future.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::types::QueryDirection;

const PAST_KEYWORDS: &[&str] = &["past", "previous", "last", "had", "completed"];
const FUTURE_KEYWORDS: &[&str] = &["upcoming", "next", "future", "scheduled"];
const COUNT_KEYWORDS: &[&str] = &["how many", "count", "number of", "total"];

fn patterns() -> &'static NamePatterns {
    static PATTERNS: OnceLock<NamePatterns> = OnceLock::new();
    PATTERNS.get_or_init(NamePatterns::new)
}

struct NamePatterns {
    // "for Sarah Connor"
    for_name: Regex,
    // "patient Sarah"
    patient_name: Regex,
    // "Sarah's appointments", "Sarah's schedule"
    possessive: Regex,
}

impl NamePatterns {
    fn new() -> Self {
        Self {
            for_name: Regex::new(r"\bfor\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap(),
            patient_name: Regex::new(r"\bpatient\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap(),
            possessive: Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)'s\s+(?:appointments|schedule)")
                .unwrap(),
        }
    }
}

/// Extract a patient name from query text.
///
/// Recognizes `"for <Name>"`, `"patient <Name>"`, and the possessive
/// `"<Name>'s appointments/schedule"`, in that order. A name is one or
/// more capitalized words.
#[must_use]
pub fn extract_patient_name(text: &str) -> Option<String> {
    let patterns = patterns();
    let caps = patterns
        .for_name
        .captures(text)
        .or_else(|| patterns.patient_name.captures(text))
        .or_else(|| patterns.possessive.captures(text))?;

    let name = caps[1].to_string();
    debug!(name = %name, "query: extracted patient name");
    Some(name)
}

/// Whether the query asks for a count rather than a listing.
#[must_use]
pub fn is_count_query(text: &str) -> bool {
    let lower = text.to_lowercase();
    COUNT_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether the query looks into the past, the future, or neither.
///
/// Past keywords are checked first; a query containing words from both
/// sets resolves as `Past`. This is precedence, not lexical exclusion.
#[must_use]
pub fn determine_query_direction(text: &str) -> QueryDirection {
    let lower = text.to_lowercase();
    if PAST_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return QueryDirection::Past;
    }
    if FUTURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return QueryDirection::Future;
    }
    QueryDirection::All
}
