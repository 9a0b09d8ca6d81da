//! Built-in matcher implementations.

mod explicit_range;
mod iso;
mod month;
mod quarter;
mod relative;
mod week_of_month;
mod year;

pub use explicit_range::ExplicitRangeMatcher;
pub use iso::IsoDateMatcher;
pub use month::MonthMatcher;
pub use quarter::QuarterMatcher;
pub use relative::RelativeDateMatcher;
pub use week_of_month::WeekOfMonthMatcher;
pub use year::YearMatcher;

/// Month-name alternation shared by the month, week-of-month, and year
/// matchers. The optional suffix groups are greedy, so a word-bounded
/// match consumes "september" whole instead of settling for "sep".
pub(crate) const MONTH_NAMES: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";
