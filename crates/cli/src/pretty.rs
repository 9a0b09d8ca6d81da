//! Pretty-printing for parse results.
//!
//! Color conventions:
//! - Dates: green
//! - Kind labels: yellow
//! - Confidence: cyan
//! - Matched text echo: dimmed
//! - Query facets (direction, patient): magenta

use colored::{Color, Colorize};
use whenspan_core::{DateRange, QueryDirection};

/// Configuration for pretty printing.
#[derive(Debug, Clone, Copy)]
pub struct PrettyConfig {
    /// Enable colored output.
    pub color: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Render the winning range as a detail block.
///
/// ```text
/// 2025-06-08 → 2025-06-15  (8 days)
///   kind        relative
///   matched     "last 7 days"
///   confidence  95%
/// ```
pub fn render_range(range: &DateRange, config: &PrettyConfig) -> String {
    let mut output = String::new();

    output.push_str(&render_span(range, config));
    output.push_str(&format!("  ({})", day_count(range)));
    output.push('\n');

    output.push_str(&format!(
        "  {:<12}{}\n",
        "kind",
        colorize(range.kind.label(), Color::Yellow, config.color)
    ));
    output.push_str(&format!(
        "  {:<12}{}\n",
        "matched",
        echo(&range.original_expression, config)
    ));
    output.push_str(&format!(
        "  {:<12}{}",
        "confidence",
        colorize(&confidence_pct(range.confidence), Color::Cyan, config.color)
    ));

    output
}

/// Render every candidate as a numbered list, one line each.
///
/// Candidates arrive already sorted by confidence; the numbering here is
/// presentation only.
pub fn render_candidates(candidates: &[DateRange], config: &PrettyConfig) -> String {
    let mut output = String::new();

    for (i, range) in candidates.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        // Pad before coloring; ANSI escapes would break the column widths.
        let kind = format!("{:<13}", range.kind.label());
        output.push_str(&format!(
            "{:>3}. {} {} {}  {}",
            i + 1,
            wide_span(range, config),
            colorize(&kind, Color::Yellow, config.color),
            colorize(&confidence_pct(range.confidence), Color::Cyan, config.color),
            echo(&range.original_expression, config),
        ));
    }

    output
}

/// Render auxiliary query facets, one line per facet that carries signal.
///
/// Returns an empty string for a plain date expression with no direction
/// keyword, no count phrasing, and no patient name.
pub fn render_facets(
    direction: QueryDirection,
    count_query: bool,
    patient: Option<&str>,
    config: &PrettyConfig,
) -> String {
    let mut lines = Vec::new();

    if direction != QueryDirection::All {
        lines.push(format!(
            "  {:<12}{}",
            "direction",
            colorize(direction.label(), Color::Magenta, config.color)
        ));
    }
    if count_query {
        lines.push(format!(
            "  {:<12}{}",
            "count query",
            colorize("yes", Color::Magenta, config.color)
        ));
    }
    if let Some(name) = patient {
        lines.push(format!(
            "  {:<12}{}",
            "patient",
            colorize(name, Color::Magenta, config.color)
        ));
    }

    lines.join("\n")
}

/// Span header: single date for one-day ranges, `start → end` otherwise.
fn render_span(range: &DateRange, config: &PrettyConfig) -> String {
    let start = colorize(&range.start.to_string(), Color::Green, config.color);
    if range.start == range.end {
        start
    } else {
        let end = colorize(&range.end.to_string(), Color::Green, config.color);
        format!("{} → {}", start, end)
    }
}

/// Span for list rows: always `start → end` so the columns line up.
fn wide_span(range: &DateRange, config: &PrettyConfig) -> String {
    format!(
        "{} → {}",
        colorize(&range.start.to_string(), Color::Green, config.color),
        colorize(&range.end.to_string(), Color::Green, config.color)
    )
}

fn day_count(range: &DateRange) -> String {
    let days = range.days();
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn confidence_pct(confidence: f32) -> String {
    format!("{:.0}%", confidence * 100.0)
}

fn echo(original: &str, config: &PrettyConfig) -> String {
    let quoted = format!("\"{}\"", original);
    if config.color {
        quoted.dimmed().to_string()
    } else {
        quoted
    }
}

fn colorize(s: &str, color: Color, enabled: bool) -> String {
    if enabled {
        s.color(color).to_string()
    } else {
        s.to_string()
    }
}
