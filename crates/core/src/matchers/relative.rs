//! Reference-anchored relative expressions.
//!
//! A flat, ordered list of checks; the first hit wins. Ordering matters
//! because the phrases are not mutually exclusive in free text: "next week
//! and last month" resolves as "last month" because the month checks come
//! first. Single-day forms (`today`, `yesterday`, `tomorrow`) produce
//! `Specific` ranges; everything else is `Relative`.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::calendar::{month_range, week_bounds};
use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

pub struct RelativeDateMatcher;

/// Upper bound for the "last/next N days" capture. Zero-day and
/// multi-millennium spans both fall through to no match.
const MAX_DAY_SPAN: i64 = 3650;

fn patterns() -> &'static RelativePatterns {
    static PATTERNS: OnceLock<RelativePatterns> = OnceLock::new();
    PATTERNS.get_or_init(RelativePatterns::new)
}

struct RelativePatterns {
    // "last 7 days", "past 30 days"
    last_n_days: Regex,
    // "next 30 days"
    next_n_days: Regex,
}

impl RelativePatterns {
    fn new() -> Self {
        Self {
            last_n_days: Regex::new(r"(?i)\b(?:last|past)\s+(\d+)\s+days?\b").unwrap(),
            next_n_days: Regex::new(r"(?i)\bnext\s+(\d+)\s+days?\b").unwrap(),
        }
    }
}

impl RelativeDateMatcher {
    /// The calendar month `offset_months` away from the reference month.
    fn month_span(reference: NaiveDate, offset_months: i32, phrase: &str) -> DateRange {
        let mut year = reference.year();
        let mut month = reference.month() as i32 + offset_months;
        if month < 1 {
            month += 12;
            year -= 1;
        }
        if month > 12 {
            month -= 12;
            year += 1;
        }
        let (start, end) = month_range(year, month as u32);
        debug!(start = %start, end = %end, phrase, "relative-date: matched month span");
        DateRange {
            start,
            end,
            kind: RangeKind::Relative,
            original_expression: phrase.to_string(),
            confidence: 0.95,
        }
    }

    /// The Sunday-based week `offset_days` away from the reference week.
    fn week_span(reference: NaiveDate, offset_days: i64, phrase: &str) -> DateRange {
        let (start, end) = week_bounds(reference + Duration::days(offset_days));
        debug!(start = %start, end = %end, phrase, "relative-date: matched week span");
        DateRange {
            start,
            end,
            kind: RangeKind::Relative,
            original_expression: phrase.to_string(),
            confidence: 0.95,
        }
    }

    fn single_day(date: NaiveDate, phrase: &str) -> DateRange {
        debug!(date = %date, phrase, "relative-date: matched single day");
        DateRange {
            start: date,
            end: date,
            kind: RangeKind::Specific,
            original_expression: phrase.to_string(),
            confidence: 0.98,
        }
    }

    /// An N-day window ending (direction < 0) or starting (direction > 0)
    /// at the reference date, both endpoints inclusive.
    fn day_window(
        caps: &regex::Captures<'_>,
        reference: NaiveDate,
        direction: i64,
    ) -> Option<DateRange> {
        let n: i64 = caps[1].parse().ok()?;
        if !(1..=MAX_DAY_SPAN).contains(&n) {
            trace!(days = n, "relative-date: day count out of bounds");
            return None;
        }
        let (start, end) = if direction < 0 {
            (reference - Duration::days(n), reference)
        } else {
            (reference, reference + Duration::days(n))
        };
        debug!(days = n, start = %start, end = %end, "relative-date: matched day window");
        Some(DateRange {
            start,
            end,
            kind: RangeKind::Relative,
            original_expression: caps[0].to_string(),
            confidence: 0.95,
        })
    }
}

impl Matcher for RelativeDateMatcher {
    fn id(&self) -> &'static str {
        "relative-date"
    }

    fn name(&self) -> &'static str {
        "Relative Date"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "Expressions anchored to the reference date (last month, today, next 30 days)",
            examples: &["last month", "this week", "yesterday", "last 7 days"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let lower = input.to_lowercase();

        if lower.contains("last month") {
            return Some(Self::month_span(reference, -1, "last month"));
        }
        if lower.contains("this month") {
            return Some(Self::month_span(reference, 0, "this month"));
        }
        if lower.contains("current month") {
            return Some(Self::month_span(reference, 0, "current month"));
        }
        if lower.contains("next month") {
            return Some(Self::month_span(reference, 1, "next month"));
        }
        if lower.contains("last week") {
            return Some(Self::week_span(reference, -7, "last week"));
        }
        if lower.contains("this week") {
            return Some(Self::week_span(reference, 0, "this week"));
        }
        if lower.contains("current week") {
            return Some(Self::week_span(reference, 0, "current week"));
        }
        if lower.contains("next week") {
            return Some(Self::week_span(reference, 7, "next week"));
        }
        if lower.contains("yesterday") {
            return Some(Self::single_day(reference - Duration::days(1), "yesterday"));
        }
        if lower.contains("tomorrow") {
            return Some(Self::single_day(reference + Duration::days(1), "tomorrow"));
        }
        if lower.contains("today") {
            return Some(Self::single_day(reference, "today"));
        }

        let patterns = patterns();
        if let Some(caps) = patterns.last_n_days.captures(input) {
            if let Some(range) = Self::day_window(&caps, reference, -1) {
                return Some(range);
            }
        }
        if let Some(caps) = patterns.next_n_days.captures(input) {
            if let Some(range) = Self::day_window(&caps, reference, 1) {
                return Some(range);
            }
        }

        None
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["relative", "rel"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 2025-06-15 is a Sunday, so it starts its own week
    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_month() {
        let result = RelativeDateMatcher.try_match("last month", reference()).unwrap();
        assert_eq!(result.start, date(2025, 5, 1));
        assert_eq!(result.end, date(2025, 5, 31));
        assert_eq!(result.kind, RangeKind::Relative);
        assert_eq!(result.original_expression, "last month");
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn test_this_and_current_month() {
        let this = RelativeDateMatcher.try_match("this month", reference()).unwrap();
        assert_eq!(this.start, date(2025, 6, 1));
        assert_eq!(this.end, date(2025, 6, 30));

        let current = RelativeDateMatcher
            .try_match("the current month", reference())
            .unwrap();
        assert_eq!(current.start, this.start);
        assert_eq!(current.original_expression, "current month");
    }

    #[test]
    fn test_next_month() {
        let result = RelativeDateMatcher.try_match("next month", reference()).unwrap();
        assert_eq!(result.start, date(2025, 7, 1));
        assert_eq!(result.end, date(2025, 7, 31));
    }

    #[test]
    fn test_month_rollover_backward() {
        let january = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let result = RelativeDateMatcher.try_match("last month", january).unwrap();
        assert_eq!(result.start, date(2024, 12, 1));
        assert_eq!(result.end, date(2024, 12, 31));
    }

    #[test]
    fn test_month_rollover_forward() {
        let december = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        let result = RelativeDateMatcher.try_match("next month", december).unwrap();
        assert_eq!(result.start, date(2026, 1, 1));
        assert_eq!(result.end, date(2026, 1, 31));
    }

    #[test]
    fn test_week_spans_are_sunday_based() {
        let last = RelativeDateMatcher.try_match("last week", reference()).unwrap();
        assert_eq!(last.start, date(2025, 6, 8));
        assert_eq!(last.end, date(2025, 6, 14));

        let this = RelativeDateMatcher.try_match("this week", reference()).unwrap();
        assert_eq!(this.start, date(2025, 6, 15));
        assert_eq!(this.end, date(2025, 6, 21));

        let next = RelativeDateMatcher.try_match("next week", reference()).unwrap();
        assert_eq!(next.start, date(2025, 6, 22));
        assert_eq!(next.end, date(2025, 6, 28));
    }

    #[test]
    fn test_single_days() {
        let yesterday = RelativeDateMatcher.try_match("yesterday", reference()).unwrap();
        assert_eq!(yesterday.start, date(2025, 6, 14));
        assert_eq!(yesterday.end, yesterday.start);
        assert_eq!(yesterday.kind, RangeKind::Specific);
        assert_eq!(yesterday.confidence, 0.98);

        let tomorrow = RelativeDateMatcher.try_match("tomorrow", reference()).unwrap();
        assert_eq!(tomorrow.start, date(2025, 6, 16));

        let today = RelativeDateMatcher.try_match("today", reference()).unwrap();
        assert_eq!(today.start, date(2025, 6, 15));
    }

    #[test]
    fn test_last_n_days() {
        let result = RelativeDateMatcher.try_match("last 7 days", reference()).unwrap();
        assert_eq!(result.start, date(2025, 6, 8));
        assert_eq!(result.end, date(2025, 6, 15));
        assert_eq!(result.kind, RangeKind::Relative);
        assert_eq!(result.original_expression, "last 7 days");
    }

    #[test]
    fn test_past_n_days() {
        let result = RelativeDateMatcher
            .try_match("visits in the past 30 days", reference())
            .unwrap();
        assert_eq!(result.start, date(2025, 5, 16));
        assert_eq!(result.end, date(2025, 6, 15));
        assert_eq!(result.original_expression, "past 30 days");
    }

    #[test]
    fn test_next_n_days() {
        let result = RelativeDateMatcher
            .try_match("next 14 days", reference())
            .unwrap();
        assert_eq!(result.start, date(2025, 6, 15));
        assert_eq!(result.end, date(2025, 6, 29));
    }

    #[test]
    fn test_day_window_bounds() {
        assert_eq!(RelativeDateMatcher.try_match("last 0 days", reference()), None);
        assert_eq!(
            RelativeDateMatcher.try_match("last 99999 days", reference()),
            None
        );
        // A capture too large for i64 falls through instead of panicking
        assert_eq!(
            RelativeDateMatcher.try_match("next 99999999999999999999 days", reference()),
            None
        );
    }

    #[test]
    fn test_check_order_is_first_match_wins() {
        // "last month" is checked before "next week"
        let result = RelativeDateMatcher
            .try_match("next week and last month", reference())
            .unwrap();
        assert_eq!(result.original_expression, "last month");
    }

    #[test]
    fn test_no_match_on_plain_text() {
        assert_eq!(RelativeDateMatcher.try_match("October 2025", reference()), None);
        assert_eq!(RelativeDateMatcher.try_match("hello world", reference()), None);
    }
}
