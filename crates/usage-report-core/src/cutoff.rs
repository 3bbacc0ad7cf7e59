//! Report scope to cutoff date resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};

use crate::error::{CoreError, Result};

/// The only date format accepted in backups and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How far back a report reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffMode {
    /// Users activated since yesterday.
    Daily,
    /// Users activated in the last 7 days.
    Weekly,
    /// Users activated in the last 30 days.
    Monthly,
    /// Every user, regardless of activation date.
    AllTime,
    /// Users activated on or after a given date.
    Explicit(NaiveDate),
}

impl CutoffMode {
    /// Resolve the cutoff date relative to `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        let back = |days| today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        match self {
            Self::Daily => back(1),
            Self::Weekly => back(7),
            Self::Monthly => back(30),
            Self::AllTime => NaiveDate::MIN,
            Self::Explicit(date) => date,
        }
    }

    /// Resolve the cutoff date relative to the local calendar date.
    #[must_use]
    pub fn resolve_now(self) -> NaiveDate {
        self.resolve(Local::now().date_naive())
    }

    /// Parse an explicit-date scope.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateFormat` if `input` is not `YYYY-MM-DD`.
    pub fn explicit(input: &str) -> Result<Self> {
        parse_date(input).map(Self::Explicit)
    }
}

impl fmt::Display for CutoffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Weekly => f.write_str("weekly"),
            Self::Monthly => f.write_str("monthly"),
            Self::AllTime => f.write_str("all-time"),
            Self::Explicit(date) => write!(f, "since {}", date.format(DATE_FORMAT)),
        }
    }
}

impl FromStr for CutoffMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "all" | "all-time" => Ok(Self::AllTime),
            _ => Err(CoreError::UnknownScope(s.to_string())),
        }
    }
}

/// Parse a `YYYY-MM-DD` date typed by an operator.
///
/// Surrounding whitespace (such as a trailing newline) is ignored.
///
/// # Errors
///
/// Returns `CoreError::InvalidDateFormat` if the input does not parse.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| CoreError::InvalidDateFormat {
        input: trimmed.to_string(),
    })
}
