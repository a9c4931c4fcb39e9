// Creation-date stamping for task cards

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use mockable::Clock;
use std::fmt::{self, Write};
use thiserror::Error;

/// Default `createdAt` format, matching an en-US locale date (e.g. 10/17/2026)
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A format string that cannot render a calendar date
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid date format '{format}': {reason}")]
pub struct DateFormatError {
    pub format: String,
    pub reason: &'static str,
}

/// Renders the creation date shown on task cards.
///
/// The format is checked on construction, so stamping never fails.
#[derive(Debug, Clone)]
pub struct DateStamp {
    format: String,
}

impl DateStamp {
    /// Accepts only formats that render from a date alone (no time or timezone fields)
    pub fn new(format: impl Into<String>) -> Result<Self, DateFormatError> {
        let format = format.into();
        let reject = |reason| DateFormatError {
            format: format.clone(),
            reason,
        };

        if format.trim().is_empty() {
            return Err(reject("format must not be empty"));
        }
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(reject("unknown or malformed specifier"));
        }
        if render(NaiveDate::default(), &format).is_err() {
            return Err(reject("needs a time or timezone, but only a date is available"));
        }

        Ok(Self { format })
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Today's date per `clock`, rendered with this stamp's format
    pub fn stamp(&self, clock: &dyn Clock) -> String {
        let today = clock.local().date_naive();
        render(today, &self.format).unwrap_or_else(|_| today.to_string())
    }
}

impl Default for DateStamp {
    fn default() -> Self {
        Self {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

fn render(date: NaiveDate, format: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))?;
    Ok(out)
}

/// Clock pinned to noon on a single day
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn local(&self) -> chrono::DateTime<chrono::Local> {
        use chrono::TimeZone;
        chrono::Local
            .from_local_datetime(&self.0.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
    }

    fn utc(&self) -> chrono::DateTime<chrono::Utc> {
        use chrono::TimeZone;
        chrono::Utc.from_utc_datetime(&self.0.and_hms_opt(12, 0, 0).unwrap())
    }
}
