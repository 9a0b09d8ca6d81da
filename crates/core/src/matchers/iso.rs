//! ISO-style numeric date matching.
//!
//! Recognizes:
//! - Full dates: `2025-10-15` → that single day
//! - Year-month: `2025-10` → the whole month
//!
//! The full-date pattern is tried first so `2025-10-15` never degrades to
//! a month match on its `2025-10` prefix.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::calendar::month_range;
use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

pub struct IsoDateMatcher;

fn patterns() -> &'static IsoPatterns {
    static PATTERNS: OnceLock<IsoPatterns> = OnceLock::new();
    PATTERNS.get_or_init(IsoPatterns::new)
}

struct IsoPatterns {
    // 2025-10-15
    full_date: Regex,
    // 2025-10
    year_month: Regex,
}

impl IsoPatterns {
    fn new() -> Self {
        Self {
            full_date: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap(),
            year_month: Regex::new(r"\b(\d{4})-(\d{2})\b").unwrap(),
        }
    }
}

impl IsoDateMatcher {
    /// Parse a full `YYYY-MM-DD` token into a single-day range.
    ///
    /// A token that looks like a full date but has out-of-range components
    /// (e.g. `2025-02-30`) is rejected outright rather than reinterpreted
    /// as a year-month; the text clearly attempted a full date.
    fn parse_full_date(input: &str) -> Option<DateRange> {
        let caps = patterns().full_date.captures(input)?;
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;

        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            trace!(year, month, day, "iso-date: out-of-range full date rejected");
            return None;
        };

        debug!(date = %date, confidence = 0.99, "iso-date: matched full date");
        Some(DateRange {
            start: date,
            end: date,
            kind: RangeKind::Specific,
            original_expression: caps[0].to_string(),
            confidence: 0.99,
        })
    }

    /// Parse a `YYYY-MM` token into the full month it names.
    fn parse_year_month(input: &str) -> Option<DateRange> {
        let caps = patterns().year_month.captures(input)?;
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;

        if !(1..=12).contains(&month) {
            trace!(year, month, "iso-date: out-of-range year-month rejected");
            return None;
        }

        let (start, end) = month_range(year, month);
        debug!(start = %start, end = %end, confidence = 0.95, "iso-date: matched year-month");
        Some(DateRange {
            start,
            end,
            kind: RangeKind::Month,
            original_expression: caps[0].to_string(),
            confidence: 0.95,
        })
    }
}

impl Matcher for IsoDateMatcher {
    fn id(&self) -> &'static str {
        "iso-date"
    }

    fn name(&self) -> &'static str {
        "ISO Date"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "ISO dates (2025-10-15) and year-months (2025-10)",
            examples: &["2025-10-15", "2025-10"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, _reference: NaiveDate) -> Option<DateRange> {
        // Full dates take priority over the shorter year-month shape
        if patterns().full_date.is_match(input) {
            return Self::parse_full_date(input);
        }
        Self::parse_year_month(input)
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["iso"]
    }
}
