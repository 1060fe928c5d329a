//! Date utilities: today's local date and parsing of CLI date arguments.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a mandatory `YYYY-MM-DD` argument.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse an optional `YYYY-MM-DD` argument.
pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    if let Some(s) = input {
        Ok(Some(require_date(s)?))
    } else {
        Ok(None)
    }
}

/// Like [`parse_optional_date`], but an explicit empty string (`--presentation ""`)
/// means "clear the field" → `Some(None)`.
pub fn parse_clearable_date(input: Option<&String>) -> AppResult<Option<Option<NaiveDate>>> {
    match input {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(Some(None)),
        Some(s) => Ok(Some(Some(require_date(s)?))),
    }
}
