//! Input validation for dates and contact details.
//!
//! Date parsing here is shared with the deadline calculation, which treats
//! anything [`parse_iso_date`] rejects as an unknown date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Error types for date entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateInputError {
    /// Nothing was entered
    #[error("Date is required")]
    Required,

    /// The text is not a calendar date
    #[error("Invalid date format")]
    InvalidFormat,

    /// The date is after today
    #[error("Date cannot be in the future")]
    InFuture,
}

/// Error types for legal advisor contact details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// No field was filled in
    #[error("At least one contact detail is required")]
    Empty,

    /// Email does not look like an address
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// Parse an ISO 8601 date, accepting the forms a browser date input or a
/// stored timestamp can take.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// date-times; only the calendar date is kept.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

/// Strict check: exactly `YYYY-MM-DD` and a real calendar day.
pub fn is_valid_date(input: &str) -> bool {
    input.len() == 10 && NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
}

/// Validate a date typed into the intake form.
pub fn validate_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate, DateInputError> {
    if input.trim().is_empty() {
        return Err(DateInputError::Required);
    }

    let date = parse_iso_date(input).ok_or(DateInputError::InvalidFormat)?;
    if date > today {
        return Err(DateInputError::InFuture);
    }

    Ok(date)
}

/// Loose email shape check: something@something.something, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() {
        return false;
    }

    match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
        Ok(re) => re.is_match(email),
        Err(e) => {
            tracing::error!(error = %e, "Email pattern failed to compile");
            false
        }
    }
}
