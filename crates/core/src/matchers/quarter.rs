//! Calendar quarter matching.
//!
//! Recognizes `Q1`..`Q4` with an optional explicit year: `Q4 2025` is
//! unambiguous, a bare `Q1` resolves in the reference year.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::calendar::quarter_range;
use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

pub struct QuarterMatcher;

fn patterns() -> &'static QuarterPatterns {
    static PATTERNS: OnceLock<QuarterPatterns> = OnceLock::new();
    PATTERNS.get_or_init(QuarterPatterns::new)
}

struct QuarterPatterns {
    // "Q4 2025"
    with_year: Regex,
    // "Q4"
    bare: Regex,
}

impl QuarterPatterns {
    fn new() -> Self {
        Self {
            with_year: Regex::new(r"(?i)\bq([1-4])\s+(\d{4})\b").unwrap(),
            bare: Regex::new(r"(?i)\bq([1-4])\b").unwrap(),
        }
    }
}

impl Matcher for QuarterMatcher {
    fn id(&self) -> &'static str {
        "quarter"
    }

    fn name(&self) -> &'static str {
        "Quarter"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "Calendar quarters (Q4 2025, q1)",
            examples: &["Q4 2025", "q1"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let patterns = patterns();

        // Quarter-with-year first, so the year token is consumed together
        // with the quarter instead of being left for the year matcher
        if let Some(caps) = patterns.with_year.captures(input) {
            let quarter: u32 = caps[1].parse().ok()?;
            let year: i32 = caps[2].parse().ok()?;
            let (start, end) = quarter_range(year, quarter);
            debug!(quarter, year, confidence = 0.98, "quarter: matched with explicit year");
            return Some(DateRange {
                start,
                end,
                kind: RangeKind::Quarter,
                original_expression: caps[0].to_string(),
                confidence: 0.98,
            });
        }

        if let Some(caps) = patterns.bare.captures(input) {
            let quarter: u32 = caps[1].parse().ok()?;
            let year = reference.year();
            let (start, end) = quarter_range(year, quarter);
            debug!(quarter, year, confidence = 0.95, "quarter: matched in reference year");
            return Some(DateRange {
                start,
                end,
                kind: RangeKind::Quarter,
                original_expression: caps[0].to_string(),
                confidence: 0.95,
            });
        }

        None
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["q"]
    }
}
