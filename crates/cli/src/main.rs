mod config;
mod pretty;

use config::Config;

use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::{control::set_override, Colorize};
use serde::Serialize;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use whenspan_core::{
    determine_query_direction, extract_patient_name, is_count_query, DateRange, QueryDirection,
    TemporalParser,
};

use crate::pretty::PrettyConfig;

const LONG_ABOUT: &str = r##"
Whenspan turns free-text date expressions into concrete calendar ranges.

Give it a phrase and it prints the resolved date range, the kind of
expression it matched, and a confidence score. Relative expressions
resolve against a reference date (today unless you pin one with -d).

SUPPORTED EXPRESSIONS:
  ISO dates:   2025-10-15, 2025-10 (whole month)
  Months:      October 2025, oct 2025, march, next september
  Quarters:    Q4 2025, q3 (reference year)
  Years:       this year, last year, 2025
  Weeks:       first week of october, last week of february
  Relative:    today, yesterday, last week, next month, past 30 days
  Ranges:      from june to august, between 2025-01-01 and 2025-03-31

EXAMPLES:
  wspan "last month"                   Previous calendar month
  wspan "Q4 2025"                      Fourth quarter of 2025
  wspan "from june to august"          Explicit range
  wspan "visits in the past 30 days"   Trailing day window
  wspan -d 2025-06-15 "next week"      Pin the reference date
  wspan -a "first week of october"     Show every candidate reading
  wspan -j "2025-10-15"                JSON output for scripting

OUTPUT:
  Matchers run in priority order and the first match wins; use -a to
  see all candidate readings ranked by confidence, and --matchers to
  see the cascade itself.

  Alongside the range, wspan reports query facets it can read from the
  surrounding words: whether the phrase looks backward or forward,
  whether it asks for a count, and any patient name it mentions.

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting   | CLI flag        | Env var         | Default
  ----------|-----------------|-----------------|--------
  reference | -d, --reference | WSPAN_REFERENCE | today
  all       | -a, --all       | WSPAN_ALL       | false
  no_color  | -C, --no-color  | WSPAN_NO_COLOR  | false

  Config file location: wspan --config-path
  Generate default config: wspan --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)

EXIT CODES:
  0  a date expression was found
  1  no date expression in the input
  2  usage or configuration error"##;

#[derive(Parser)]
#[command(name = "wspan")]
#[command(version)]
#[command(about = "Turn free-text date expressions into calendar date ranges")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = "For more information, visit: https://github.com/whenspan/whenspan")]
struct Cli {
    /// The date expression to parse
    ///
    /// Free text is fine: the parser picks the date expression out of
    /// surrounding words ("how many visits in the last 7 days").
    /// Quote multi-word expressions so the shell passes them as one
    /// argument.
    #[arg(value_name = "EXPRESSION")]
    input: Option<String>,

    /// Reference date for relative expressions (YYYY-MM-DD)
    ///
    /// "last month", "next week" and friends resolve against this date.
    /// Defaults to today.
    #[arg(long, short = 'd', value_name = "DATE")]
    reference: Option<String>,

    /// Show every candidate interpretation, ranked by confidence
    ///
    /// The normal output shows only the winning match. Ambiguous input
    /// ("first week of october") can carry several readings.
    #[arg(long, short = 'a')]
    all: bool,

    /// Only use specific matchers (comma-separated, supports aliases)
    ///
    /// Examples: --only iso,quarter  or  -o rel
    /// Use --matchers to see available matcher ids and aliases.
    #[arg(long, short = 'o', value_delimiter = ',')]
    only: Option<Vec<String>>,

    /// List all matchers in priority order
    #[arg(long)]
    matchers: bool,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why an expression was or wasn't matched.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

/// Input errors reported before the parser runs.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid reference date '{0}' (expected YYYY-MM-DD)")]
    BadReference(String),
    #[error("unknown matcher '{0}'; use --matchers to see available ids")]
    UnknownMatcher(String),
}

/// Full analysis of one query, shaped for `--json`.
#[derive(Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<Vec<DateRange>>,
    direction: QueryDirection,
    count_query: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient: Option<String>,
}

fn print_matchers() {
    let parser = TemporalParser::new();

    println!("{}", "Matchers".bold().underline());
    println!();
    println!("Priority order; the first matcher to claim an expression wins.");
    println!();

    for info in parser.matcher_infos() {
        print!("{} {}", "▶".blue(), info.id.yellow());
        if !info.aliases.is_empty() {
            print!(" ({})", info.aliases.join(", ").cyan());
        }
        if !info.description.is_empty() {
            print!(" - {}", info.description);
        }
        println!();
        if !info.examples.is_empty() {
            let examples: Vec<_> = info
                .examples
                .iter()
                .take(3)
                .map(|e| e.green().to_string())
                .collect();
            println!("    {}", format!("e.g. {}", examples.join(", ")).dimmed());
        }
    }
}

fn exit_usage_error(err: &CliError) -> ! {
    eprintln!("{}: {}", "error".red().bold(), err);
    std::process::exit(2);
}

fn exit_no_match(input: &str) -> ! {
    eprintln!(
        "{}: no date expression found in \"{}\"",
        "no match".yellow().bold(),
        input
    );
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!(
                    "{}: Cannot determine config directory",
                    "error".red().bold()
                );
                std::process::exit(2);
            }
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(2);
            }
        }
        return;
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let no_color = if cli.no_color {
        tracing::debug!("no_color = true (from CLI)");
        true
    } else {
        let nc = file_config.no_color();
        if nc {
            let source = if std::env::var("NO_COLOR").is_ok() {
                "env NO_COLOR"
            } else if std::env::var("WSPAN_NO_COLOR").is_ok() {
                "env WSPAN_NO_COLOR"
            } else {
                "config file"
            };
            tracing::debug!("no_color = true (from {})", source);
        }
        nc
    };
    if no_color {
        set_override(false);
    }

    if cli.matchers {
        print_matchers();
        return;
    }

    let all = if cli.all {
        tracing::debug!("all = true (from CLI)");
        true
    } else {
        let a = file_config.all();
        if a {
            let source = if std::env::var("WSPAN_ALL").is_ok() {
                "env WSPAN_ALL"
            } else {
                "config file"
            };
            tracing::debug!("all = true (from {})", source);
        }
        a
    };

    let reference_str = if let Some(ref d) = cli.reference {
        tracing::debug!("reference = {} (from CLI)", d);
        Some(d.clone())
    } else {
        let r = file_config.reference();
        if let Some(ref d) = r {
            let source = if std::env::var("WSPAN_REFERENCE").is_ok() {
                "env WSPAN_REFERENCE"
            } else {
                "config file"
            };
            tracing::debug!("reference = {} (from {})", d, source);
        }
        r
    };

    let reference = match reference_str {
        Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => exit_usage_error(&CliError::BadReference(s)),
        },
        None => {
            let today = Local::now().date_naive();
            tracing::debug!("reference = {} (today)", today);
            today
        }
    };

    let Some(input) = cli.input else {
        // No input provided
        eprintln!("{}: No expression provided", "error".red().bold());
        eprintln!();
        eprintln!("Usage: {} <EXPRESSION>", "wspan".bold());
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  wspan \"last month\"                 Previous calendar month");
        eprintln!("  wspan \"Q4 2025\"                    Fourth quarter of 2025");
        eprintln!("  wspan \"from june to august\"        Explicit range");
        eprintln!("  wspan -d 2025-06-15 \"next week\"    Pin the reference date");
        eprintln!();
        eprintln!("Run {} for more information.", "wspan --help".bold());
        std::process::exit(2);
    };

    let only = cli.only.unwrap_or_default();
    let parser = TemporalParser::new();

    for name in &only {
        if !parser.is_valid_matcher(name) {
            exit_usage_error(&CliError::UnknownMatcher(name.clone()));
        }
    }

    let direction = determine_query_direction(&input);
    let count_query = is_count_query(&input);
    let patient = extract_patient_name(&input);

    let pretty_config = PrettyConfig { color: !no_color };

    if all {
        let candidates = parser.candidates_filtered(&input, reference, &only);
        if candidates.is_empty() {
            exit_no_match(&input);
        }

        if cli.json {
            let report = Report {
                range: None,
                candidates: Some(candidates),
                direction,
                count_query,
                patient,
            };
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        } else {
            let count = candidates.len();
            let reading = if count == 1 { "reading" } else { "readings" };
            println!("{} {} of \"{}\":", count, reading, input);
            println!("{}", pretty::render_candidates(&candidates, &pretty_config));
            let facets = pretty::render_facets(
                direction,
                count_query,
                patient.as_deref(),
                &pretty_config,
            );
            if !facets.is_empty() {
                println!("{}", facets);
            }
        }
        return;
    }

    // With a matcher filter the winner is the best filtered candidate;
    // without one it is the cascade's first match.
    let range = if only.is_empty() {
        parser.parse(&input, reference)
    } else {
        parser
            .candidates_filtered(&input, reference, &only)
            .into_iter()
            .next()
    };

    let Some(range) = range else {
        exit_no_match(&input);
    };

    if cli.json {
        let report = Report {
            range: Some(range),
            candidates: None,
            direction,
            count_query,
            patient,
        };
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!("{}", pretty::render_range(&range, &pretty_config));
        let facets =
            pretty::render_facets(direction, count_query, patient.as_deref(), &pretty_config);
        if !facets.is_empty() {
            println!("{}", facets);
        }
    }
}
