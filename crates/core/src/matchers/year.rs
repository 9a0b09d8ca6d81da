//! Calendar-year matching.
//!
//! Recognizes relative years ("this year", "last year", "next year") and
//! bare four-digit years from 2000 through 2099.
//!
//! A bare year sitting next to a month name is not claimed here: in
//! "October 2025" the year token belongs to the month matcher, which runs
//! later in the cascade and produces the tighter month range. Declining
//! keeps that range reachable.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::calendar::year_range;
use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

use super::MONTH_NAMES;

pub struct YearMatcher;

fn patterns() -> &'static YearPatterns {
    static PATTERNS: OnceLock<YearPatterns> = OnceLock::new();
    PATTERNS.get_or_init(YearPatterns::new)
}

struct YearPatterns {
    // 2025
    bare_year: Regex,
    // any word-bounded month name; bare years defer when one is present
    month_guard: Regex,
}

impl YearPatterns {
    fn new() -> Self {
        Self {
            bare_year: Regex::new(r"\b(20\d{2})\b").unwrap(),
            month_guard: Regex::new(&format!(r"(?i)\b(?:{MONTH_NAMES})\b")).unwrap(),
        }
    }
}

impl YearMatcher {
    fn relative_year(reference: NaiveDate, offset: i32, phrase: &str) -> DateRange {
        let (start, end) = year_range(reference.year() + offset);
        debug!(year = start.year(), confidence = 0.98, "year: matched relative year");
        DateRange {
            start,
            end,
            kind: RangeKind::Year,
            original_expression: phrase.to_string(),
            confidence: 0.98,
        }
    }
}

impl Matcher for YearMatcher {
    fn id(&self) -> &'static str {
        "year"
    }

    fn name(&self) -> &'static str {
        "Year"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "Calendar years (this year, 2025)",
            examples: &["this year", "last year", "2025"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let lower = input.to_lowercase();

        if lower.contains("this year") {
            return Some(Self::relative_year(reference, 0, "this year"));
        }
        if lower.contains("last year") {
            return Some(Self::relative_year(reference, -1, "last year"));
        }
        if lower.contains("next year") {
            return Some(Self::relative_year(reference, 1, "next year"));
        }

        let caps = patterns().bare_year.captures(input)?;
        if patterns().month_guard.is_match(input) {
            trace!("year: bare year accompanies a month name, deferring");
            return None;
        }

        let year: i32 = caps[1].parse().ok()?;
        let (start, end) = year_range(year);
        debug!(year, confidence = 0.95, "year: matched bare year");
        Some(DateRange {
            start,
            end,
            kind: RangeKind::Year,
            original_expression: caps[0].to_string(),
            confidence: 0.95,
        })
    }
}
