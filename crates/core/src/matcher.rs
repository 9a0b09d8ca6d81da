//! Matcher trait definition.

use chrono::NaiveDate;

use crate::types::DateRange;

/// Metadata about a matcher for help/documentation.
#[derive(Debug, Clone)]
pub struct MatcherInfo {
    /// Unique identifier (e.g., "iso-date")
    pub id: &'static str,
    /// Human-readable name (e.g., "ISO Date")
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Example input strings
    pub examples: &'static [&'static str],
    /// Short aliases (e.g., "iso" for "iso-date")
    pub aliases: &'static [&'static str],
}

/// Trait implemented by every date-expression matcher.
///
/// Matchers are stateless; everything they need arrives through the input
/// text and the caller-supplied reference date. The reference date is an
/// explicit parameter so that relative expressions stay deterministic and
/// testable; no matcher reads the system clock.
pub trait Matcher: Send + Sync {
    /// Unique identifier for this matcher (e.g., "iso-date", "quarter").
    fn id(&self) -> &'static str;

    /// Human-readable name (e.g., "ISO Date").
    fn name(&self) -> &'static str;

    /// Get matcher metadata for help/documentation.
    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "",
            examples: &[],
            aliases: self.aliases(),
        }
    }

    /// Try to recognize a date expression in the input.
    ///
    /// Returns `None` when the input contains nothing this matcher
    /// understands; that is the normal outcome, not an error.
    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange>;

    /// Short aliases for this matcher (e.g., "wom" for "week-of-month").
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check if the given name matches this matcher's id or any alias.
    fn matches_name(&self, name: &str) -> bool {
        self.id() == name || self.aliases().contains(&name)
    }
}
