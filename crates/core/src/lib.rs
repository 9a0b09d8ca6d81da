//! Whenspan Core
//!
//! Turns free-text date expressions (`last month`, `Q4 2025`,
//! `between 2025-01-01 and 2025-03-31`) into concrete calendar date
//! ranges with confidence metadata.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use whenspan_core::{parse_temporal_expression, RangeKind};
//!
//! let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
//! let range = parse_temporal_expression("visits last month", reference).unwrap();
//!
//! assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
//! assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
//! assert_eq!(range.kind, RangeKind::Relative);
//! assert_eq!(range.original_expression, "last month");
//! ```
//!
//! # Inspecting Every Candidate
//!
//! ```
//! use chrono::NaiveDate;
//! use whenspan_core::{RangeKind, TemporalParser};
//!
//! let parser = TemporalParser::new();
//! let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
//!
//! // "Q4 2025" also carries a bare year; candidates surfaces both,
//! // highest confidence first
//! let candidates = parser.candidates("Q4 2025", reference);
//! assert_eq!(candidates[0].kind, RangeKind::Quarter);
//! assert_eq!(candidates[1].kind, RangeKind::Year);
//! ```

pub mod calendar;
pub mod matcher;
pub mod matchers;
pub mod query;
pub mod types;

pub use matcher::{Matcher, MatcherInfo};
pub use query::{determine_query_direction, extract_patient_name, is_count_query};
pub use types::*;

use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use matchers::{
    ExplicitRangeMatcher, IsoDateMatcher, MonthMatcher, QuarterMatcher, RelativeDateMatcher,
    WeekOfMonthMatcher, YearMatcher,
};

/// Longest query, in bytes, the parser will look at.
///
/// Anything longer is noise (a pasted document, junk input) and is
/// refused before any pattern runs against it.
pub const MAX_QUERY_LEN: usize = 512;

/// Main entry point - a configured parser instance.
pub struct TemporalParser {
    matchers: Vec<Box<dyn Matcher>>,
}

impl TemporalParser {
    /// Create a new parser with all built-in matchers.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use whenspan_core::TemporalParser;
    ///
    /// let parser = TemporalParser::new();
    /// let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    /// assert!(parser.parse("tomorrow", reference).is_some());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            matchers: Self::create_matcher_list(),
        }
    }

    /// Create the prioritized list of built-in matchers.
    ///
    /// Order is load-bearing: [`parse`](Self::parse) hands the win to the
    /// first matcher that claims the input.
    fn create_matcher_list() -> Vec<Box<dyn Matcher>> {
        vec![
            // High-specificity matchers first
            Box::new(ExplicitRangeMatcher),
            Box::new(IsoDateMatcher),
            Box::new(QuarterMatcher),
            // Year before month; the year matcher defers bare years that
            // sit next to a month name ("October 2025")
            Box::new(YearMatcher),
            Box::new(MonthMatcher),
            Box::new(WeekOfMonthMatcher),
            Box::new(RelativeDateMatcher),
        ]
    }

    /// Parse input and return the highest-priority match, if any.
    ///
    /// The first matcher in priority order that recognizes the input wins;
    /// later matchers never run. Inputs longer than [`MAX_QUERY_LEN`] bytes
    /// return `None` without being scanned. Never panics: a matcher failure
    /// is downgraded to a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use whenspan_core::TemporalParser;
    ///
    /// let parser = TemporalParser::new();
    /// let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    ///
    /// let range = parser.parse("Q4 2025", reference).unwrap();
    /// assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    /// assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    /// ```
    #[must_use]
    pub fn parse(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        if input.len() > MAX_QUERY_LEN {
            warn!(len = input.len(), "parse: query exceeds length cap, refusing");
            return None;
        }
        // A matcher bug must read as "no date found" to the caller, never
        // as a crash. Matchers hold no state, so nothing is left broken
        // behind the unwind boundary.
        match panic::catch_unwind(AssertUnwindSafe(|| self.first_match(input, reference))) {
            Ok(result) => result,
            Err(_) => {
                warn!("parse: matcher panicked, treating as no match");
                None
            }
        }
    }

    /// Run the cascade without the panic guard.
    ///
    /// Split out so nested resolution (range endpoint clauses) re-enters
    /// here and any panic still surfaces at the single outer guard in
    /// [`parse`](Self::parse).
    pub(crate) fn first_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let result = self.matchers.iter().find_map(|m| {
            let matched = m.try_match(trimmed, reference);
            if let Some(range) = &matched {
                debug!(
                    matcher = m.id(),
                    start = %range.start,
                    end = %range.end,
                    confidence = range.confidence,
                    "dispatcher: matched"
                );
            }
            matched
        });
        if result.is_none() {
            trace!("dispatcher: no matcher claimed the input");
        }
        result
    }

    /// Run every matcher and return all claims, highest confidence first.
    ///
    /// Confidence ties keep priority order (the sort is stable), so the
    /// matcher that would win [`parse`](Self::parse) sorts ahead of an
    /// equal-confidence rival. This is how readings the cascade shadows
    /// stay reachable, such as the week reading of "first week of october".
    #[must_use]
    pub fn candidates(&self, input: &str, reference: NaiveDate) -> Vec<DateRange> {
        self.candidates_filtered(input, reference, &[])
    }

    /// Run only the named matchers (by id or alias), all claims sorted by
    /// confidence. An empty filter selects every matcher.
    #[must_use]
    pub fn candidates_filtered(
        &self,
        input: &str,
        reference: NaiveDate,
        matcher_filter: &[String],
    ) -> Vec<DateRange> {
        if input.len() > MAX_QUERY_LEN {
            warn!(len = input.len(), "candidates: query exceeds length cap, refusing");
            return Vec::new();
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.collect_matches(trimmed, reference, matcher_filter)
        }));
        match outcome {
            Ok(results) => results,
            Err(_) => {
                warn!("candidates: matcher panicked, returning no candidates");
                Vec::new()
            }
        }
    }

    fn collect_matches(
        &self,
        trimmed: &str,
        reference: NaiveDate,
        matcher_filter: &[String],
    ) -> Vec<DateRange> {
        let mut results: Vec<DateRange> = self
            .matchers
            .iter()
            .filter(|m| {
                matcher_filter.is_empty()
                    || matcher_filter.iter().any(|name| m.matches_name(name))
            })
            .filter_map(|m| m.try_match(trimmed, reference))
            .collect();
        // Sort by confidence, highest first
        results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        results
    }

    /// Get info about all registered matchers (for help/documentation).
    #[must_use]
    pub fn matcher_infos(&self) -> Vec<MatcherInfo> {
        self.matchers.iter().map(|m| m.info()).collect()
    }

    /// Get a list of all valid matcher names (ids only, not aliases).
    #[must_use]
    pub fn matcher_ids(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.id()).collect()
    }

    /// Check if a matcher name (id or alias) is valid.
    #[must_use]
    pub fn is_valid_matcher(&self, name: &str) -> bool {
        self.matchers.iter().any(|m| m.matches_name(name))
    }
}

impl Default for TemporalParser {
    fn default() -> Self {
        Self::new()
    }
}

fn shared() -> &'static TemporalParser {
    static SHARED: OnceLock<TemporalParser> = OnceLock::new();
    SHARED.get_or_init(TemporalParser::new)
}

/// Parse a free-text date expression against a reference date.
///
/// Convenience wrapper over a process-wide [`TemporalParser`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use whenspan_core::parse_temporal_expression;
///
/// let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// let range = parse_temporal_expression("yesterday", reference).unwrap();
/// assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
/// assert_eq!(range.end, range.start);
/// ```
#[must_use]
pub fn parse_temporal_expression(input: &str, reference: NaiveDate) -> Option<DateRange> {
    shared().parse(input, reference)
}

/// Resolve a sub-expression through the full cascade.
///
/// Used by the explicit-range matcher on each endpoint clause. Bypasses
/// the panic guard so a failure inside a nested clause still surfaces at
/// the single guard in [`TemporalParser::parse`].
pub(crate) fn resolve(input: &str, reference: NaiveDate) -> Option<DateRange> {
    shared().first_match(input, reference)
}
