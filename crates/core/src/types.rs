//! Core types for whenspan.
//!
//! These types represent the parsed output that all matchers produce.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classifies what kind of period a parsed range describes.
///
/// The kind is a presentation hint for callers (a calendar UI renders a
/// `Month` differently from an arbitrary `Range`); it does not affect the
/// range arithmetic itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeKind {
    /// A single calendar day (`start == end`).
    Specific,
    /// A period anchored to the reference date ("last week", "next 30 days").
    Relative,
    /// An arbitrary span, typically from an explicit "between A and B".
    Range,
    /// Reserved for repeating schedules; no matcher currently produces it.
    Recurring,
    /// A whole calendar month.
    Month,
    /// A whole calendar quarter.
    Quarter,
    /// A whole calendar year.
    Year,
}

impl RangeKind {
    /// Returns the kind name as a lowercase string.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Relative => "relative",
            Self::Range => "range",
            Self::Recurring => "recurring",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for RangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved date range with metadata about how it was recognized.
///
/// This is an immutable value: matchers build it once and nothing mutates
/// it afterwards. `start` and `end` are both inclusive calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: RangeKind,
    /// The exact substring of the input that was recognized, kept verbatim
    /// so callers can highlight it or audit what the parser keyed on.
    pub original_expression: String,
    /// Heuristic priority signal in `[0.0, 1.0]`, not a probability.
    /// Explicit ISO dates score 0.99; inferred bare months score 0.90.
    pub confidence: f32,
}

impl DateRange {
    /// Number of days the range covers, both endpoints included.
    ///
    /// Can be non-positive for an inverted range taken verbatim from an
    /// explicit "between A and B" expression.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

/// Whether a query asks about past, future, or all appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryDirection {
    Past,
    Future,
    All,
}

impl QueryDirection {
    /// Returns the direction name as a lowercase string.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Future => "future",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for QueryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
