//! Ordinal week-of-month matching.
//!
//! Recognizes `"(first|second|third|fourth|last) week of <month>"`. The
//! month always resolves in the reference year; there is no year
//! inference here, unlike the month matcher. Windows are flat 7-day
//! spans anchored to the month, not ISO calendar weeks:
//! - first = days 1-7, second/third/fourth = days 8-14/15-21/22-28
//! - last = the final 7 days, back-counted from the true last day

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::calendar::month_range;
use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

use super::month::month_number;
use super::MONTH_NAMES;

pub struct WeekOfMonthMatcher;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // "first week of october"
        Regex::new(&format!(
            r"(?i)\b(first|second|third|fourth|last)\s+week\s+of\s+({MONTH_NAMES})\b"
        ))
        .unwrap()
    })
}

impl Matcher for WeekOfMonthMatcher {
    fn id(&self) -> &'static str {
        "week-of-month"
    }

    fn name(&self) -> &'static str {
        "Week of Month"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "Ordinal weeks within a month (first week of October)",
            examples: &["first week of October", "last week of march"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let caps = pattern().captures(input)?;
        let ordinal = caps[1].to_lowercase();
        let month = month_number(&caps[2])?;

        // Reference year always; "first week of january" in December still
        // means January of the current year
        let (first, last) = month_range(reference.year(), month);

        let (start, end) = match ordinal.as_str() {
            "first" => (first, first + Duration::days(6)),
            "last" => (last - Duration::days(6), last),
            "second" => (first + Duration::days(7), first + Duration::days(13)),
            "third" => (first + Duration::days(14), first + Duration::days(20)),
            "fourth" => (first + Duration::days(21), first + Duration::days(27)),
            _ => return None,
        };

        debug!(ordinal = %ordinal, month, start = %start, end = %end, "week-of-month: matched");
        Some(DateRange {
            start,
            end,
            kind: RangeKind::Range,
            original_expression: caps[0].to_string(),
            confidence: 0.90,
        })
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["wom"]
    }
}
