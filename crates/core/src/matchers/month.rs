//! Month-name matching, including the year-inference heuristic.
//!
//! Recognizes full and abbreviated English month names:
//! - With an explicit year: `October 2025` (unambiguous)
//! - Bare: `October` (the year is inferred from the reference date and
//!   any "last"/"next" wording in the input)
//!
//! When several month names appear, the leftmost textual match wins; the
//! scan order is deterministic, never map iteration order.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::calendar::month_range;
use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

use super::MONTH_NAMES;

pub struct MonthMatcher;

fn patterns() -> &'static MonthPatterns {
    static PATTERNS: OnceLock<MonthPatterns> = OnceLock::new();
    PATTERNS.get_or_init(MonthPatterns::new)
}

struct MonthPatterns {
    // "october 2025", "next october 2025"
    month_year: Regex,
    // "october", "last october"
    month_bare: Regex,
}

impl MonthPatterns {
    fn new() -> Self {
        Self {
            month_year: Regex::new(&format!(
                r"(?i)\b(?:(last|next)\s+)?({MONTH_NAMES})\s+(\d{{4}})\b"
            ))
            .unwrap(),
            month_bare: Regex::new(&format!(r"(?i)\b(?:(last|next)\s+)?({MONTH_NAMES})\b"))
                .unwrap(),
        }
    }
}

/// Convert a month name or abbreviation to its 1-based number.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    match lower.as_str() {
        s if s.starts_with("jan") => Some(1),
        s if s.starts_with("feb") => Some(2),
        s if s.starts_with("mar") => Some(3),
        s if s.starts_with("apr") => Some(4),
        "may" => Some(5),
        s if s.starts_with("jun") => Some(6),
        s if s.starts_with("jul") => Some(7),
        s if s.starts_with("aug") => Some(8),
        s if s.starts_with("sep") => Some(9),
        s if s.starts_with("oct") => Some(10),
        s if s.starts_with("nov") => Some(11),
        s if s.starts_with("dec") => Some(12),
        _ => None,
    }
}

impl MonthMatcher {
    /// Infer the year for a bare month mention.
    ///
    /// Decision table, first matching row wins:
    /// - month before the reference month, input contains "last" → reference year
    /// - month before the reference month, no "next" in input → reference year
    ///   (most recent occurrence, possibly already past)
    /// - month after the reference month, input contains "next" → reference year + 1
    /// - otherwise → reference year
    ///
    /// The first two rows and the fallback all land on the reference year;
    /// they are kept separate because each encodes a distinct intent and
    /// only the third row ever moves the year.
    fn infer_year(month: u32, input: &str, reference: NaiveDate) -> i32 {
        let lower = input.to_lowercase();
        let current = reference.month();

        if month < current && lower.contains("last") {
            return reference.year();
        }
        if month < current && !lower.contains("next") {
            return reference.year();
        }
        if month > current && lower.contains("next") {
            return reference.year() + 1;
        }
        reference.year()
    }
}

impl Matcher for MonthMatcher {
    fn id(&self) -> &'static str {
        "month"
    }

    fn name(&self) -> &'static str {
        "Month"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "Month names, with or without a year (October 2025, march)",
            examples: &["October 2025", "march", "next september"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let patterns = patterns();

        // Month+year is collected before any bare-month hit, so an explicit
        // year is never ignored in favor of inference
        if let Some(caps) = patterns.month_year.captures(input) {
            let month = month_number(&caps[2])?;
            let year: i32 = caps[3].parse().ok()?;
            let (start, end) = month_range(year, month);
            debug!(month, year, confidence = 0.98, "month: matched with explicit year");
            return Some(DateRange {
                start,
                end,
                kind: RangeKind::Month,
                original_expression: caps[0].to_string(),
                confidence: 0.98,
            });
        }

        if let Some(caps) = patterns.month_bare.captures(input) {
            let month = month_number(&caps[2])?;
            let year = Self::infer_year(month, input, reference);
            let (start, end) = month_range(year, month);
            trace!(month, year, "month: inferred year for bare month name");
            debug!(month, year, confidence = 0.90, "month: matched bare month name");
            return Some(DateRange {
                start,
                end,
                kind: RangeKind::Month,
                // Includes an adjacent "last"/"next" qualifier when present,
                // so reparsing this substring reproduces the inference
                original_expression: caps[0].to_string(),
                confidence: 0.90,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 2025-06-15: June, so months 1-5 are "before" and 7-12 "after"
    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_with_explicit_year() {
        let result = MonthMatcher.try_match("October 2025", reference()).unwrap();
        assert_eq!(result.start, date(2025, 10, 1));
        assert_eq!(result.end, date(2025, 10, 31));
        assert_eq!(result.kind, RangeKind::Month);
        assert_eq!(result.original_expression, "October 2025");
        assert_eq!(result.confidence, 0.98);
    }

    #[test]
    fn test_abbreviated_month_with_year() {
        let result = MonthMatcher.try_match("oct 2025", reference()).unwrap();
        assert_eq!(result.start, date(2025, 10, 1));
        assert_eq!(result.confidence, 0.98);
    }

    #[test]
    fn test_explicit_year_beats_bare_month_position() {
        // The bare "march" sits earlier in the text, but the explicit year
        // match is collected first
        let result = MonthMatcher
            .try_match("march or january 2026", reference())
            .unwrap();
        assert_eq!(result.start, date(2026, 1, 1));
        assert_eq!(result.original_expression, "january 2026");
    }

    #[test]
    fn test_bare_future_month_uses_reference_year() {
        let result = MonthMatcher.try_match("October", reference()).unwrap();
        assert_eq!(result.start, date(2025, 10, 1));
        assert_eq!(result.end, date(2025, 10, 31));
        assert_eq!(result.confidence, 0.90);
        assert_eq!(result.original_expression, "October");
    }

    #[test]
    fn test_bare_past_month_stays_in_reference_year() {
        // "most recent occurrence, possibly already past"
        let result = MonthMatcher.try_match("january", reference()).unwrap();
        assert_eq!(result.start, date(2025, 1, 1));
    }

    #[test]
    fn test_last_with_past_month() {
        let result = MonthMatcher.try_match("last february", reference()).unwrap();
        assert_eq!(result.start, date(2025, 2, 1));
        assert_eq!(result.end, date(2025, 2, 28));
        assert_eq!(result.original_expression, "last february");
    }

    #[test]
    fn test_next_with_future_month_moves_to_next_year() {
        let result = MonthMatcher.try_match("next september", reference()).unwrap();
        assert_eq!(result.start, date(2026, 9, 1));
        assert_eq!(result.end, date(2026, 9, 30));
        assert_eq!(result.original_expression, "next september");
    }

    #[test]
    fn test_next_with_past_month_keeps_reference_year() {
        // The inference keys on month order relative to the reference, not
        // on the qualifier's direction: January is before June, so "next"
        // never fires the year bump
        let result = MonthMatcher.try_match("next january", reference()).unwrap();
        assert_eq!(result.start, date(2025, 1, 1));
    }

    #[test]
    fn test_current_month_bare() {
        let result = MonthMatcher.try_match("june", reference()).unwrap();
        assert_eq!(result.start, date(2025, 6, 1));
        assert_eq!(result.end, date(2025, 6, 30));
    }

    #[test]
    fn test_leftmost_month_wins() {
        let result = MonthMatcher.try_match("march or april", reference()).unwrap();
        assert_eq!(result.start, date(2025, 3, 1));
        assert_eq!(result.original_expression, "march");
    }

    #[test]
    fn test_sept_abbreviation() {
        let result = MonthMatcher.try_match("sept", reference()).unwrap();
        assert_eq!(result.start, date(2025, 9, 1));
        assert_eq!(result.original_expression, "sept");
    }

    #[test]
    fn test_no_match_inside_words() {
        assert_eq!(MonthMatcher.try_match("mayhem decline", reference()), None);
        assert_eq!(MonthMatcher.try_match("marching band", reference()), None);
    }

    #[test]
    fn test_no_match_on_plain_text() {
        assert_eq!(MonthMatcher.try_match("how many visits", reference()), None);
    }

    #[test]
    fn test_month_number_vocabulary() {
        assert_eq!(month_number("january"), Some(1));
        assert_eq!(month_number("Sept"), Some(9));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("mayo"), None);
        assert_eq!(month_number("smarch"), None);
    }
}
