//! Explicit "between A and B" / "from A to B" range matching.
//!
//! `A` and `B` are full temporal sub-expressions, resolved by recursively
//! running the whole dispatcher on them. Recursion terminates because a
//! sub-expression is always strictly shorter than the enclosing phrase.
//!
//! The endpoints are taken verbatim: clause A's start and clause B's end,
//! with no reordering. Clauses given out of order produce an inverted
//! range, matching the long-standing behavior callers already handle.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::matcher::{Matcher, MatcherInfo};
use crate::types::{DateRange, RangeKind};

pub struct ExplicitRangeMatcher;

fn patterns() -> &'static RangePatterns {
    static PATTERNS: OnceLock<RangePatterns> = OnceLock::new();
    PATTERNS.get_or_init(RangePatterns::new)
}

struct RangePatterns {
    // "between <A> and <B>"
    between: Regex,
    // "from <A> to <B>"
    from_to: Regex,
}

impl RangePatterns {
    fn new() -> Self {
        // Clause B runs to the next comma, period, or semicolon (or end of
        // string) so trailing clauses are not consumed
        Self {
            between: Regex::new(r"(?i)\bbetween\s+(.+?)\s+and\s+([^,.;]+)").unwrap(),
            from_to: Regex::new(r"(?i)\bfrom\s+(.+?)\s+to\s+([^,.;]+)").unwrap(),
        }
    }
}

impl ExplicitRangeMatcher {
    fn try_pattern(pattern: &Regex, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let caps = pattern.captures(input)?;
        let first_clause = caps[1].trim().to_string();
        let second_clause = caps[2].trim().to_string();

        let Some(first) = crate::resolve(&first_clause, reference) else {
            trace!(clause = %first_clause, "explicit-range: first clause did not resolve");
            return None;
        };
        let Some(second) = crate::resolve(&second_clause, reference) else {
            trace!(clause = %second_clause, "explicit-range: second clause did not resolve");
            return None;
        };

        debug!(
            start = %first.start,
            end = %second.end,
            "explicit-range: resolved both clauses"
        );
        Some(DateRange {
            start: first.start,
            end: second.end,
            kind: RangeKind::Range,
            original_expression: caps[0].trim_end().to_string(),
            confidence: 0.95,
        })
    }
}

impl Matcher for ExplicitRangeMatcher {
    fn id(&self) -> &'static str {
        "explicit-range"
    }

    fn name(&self) -> &'static str {
        "Explicit Range"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            id: self.id(),
            name: self.name(),
            description: "Spans with explicit endpoints (between A and B, from A to B)",
            examples: &["between 2025-01-01 and 2025-03-31", "from june to august"],
            aliases: self.aliases(),
        }
    }

    fn try_match(&self, input: &str, reference: NaiveDate) -> Option<DateRange> {
        let patterns = patterns();
        Self::try_pattern(&patterns.between, input, reference)
            .or_else(|| Self::try_pattern(&patterns.from_to, input, reference))
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["between", "range"]
    }
}
