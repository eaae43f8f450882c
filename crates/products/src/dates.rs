//! Release / revision calendar rules.
//!
//! All dates are calendar dates with no time zone: "today" means the local
//! calendar day, and comparisons ignore time-of-day entirely.

use chrono::{Datelike, Local, Months, NaiveDate};

use catalog_core::{DomainError, DomainResult};

use crate::validation::FieldError;

/// Parse a `YYYY-MM-DD` date. Anything after the first ten characters
/// (a time part) is ignored.
pub fn parse_iso_date(value: &str) -> DomainResult<NaiveDate> {
    let trimmed = value.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| DomainError::invalid_date(format!("{trimmed:?}: {e}")))
}

/// Revision date for a release: twelve calendar months later.
///
/// A 29 February release rolls over to 1 March of the following year.
pub fn revision_for(release: NaiveDate) -> DomainResult<NaiveDate> {
    let out_of_range = || DomainError::invalid_date(format!("{release}: revision out of range"));
    if release.month() == 2 && release.day() == 29 {
        return NaiveDate::from_ymd_opt(release.year() + 1, 3, 1).ok_or_else(out_of_range);
    }
    release.checked_add_months(Months::new(12)).ok_or_else(out_of_range)
}

/// A release date may be today or later, never in the past.
pub fn validate_release(release: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    if release < today {
        Err(FieldError::ReleaseInPast)
    } else {
        Ok(())
    }
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}
