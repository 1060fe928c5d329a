// src/export/excel_date.rs

use chrono::{Datelike, NaiveDate};

/// Days from 0001-01-01 to the Excel epoch (1899-12-30).
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

pub(crate) const EXCEL_DATE_FORMAT: &str = "yyyy-mm-dd";

/// Excel serial number of a calendar date (1900 date system).
pub(crate) fn excel_serial(d: NaiveDate) -> f64 {
    f64::from(d.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE)
}

/// Interpreta una cella come data `YYYY-MM-DD`, se lo è.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<f64> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(excel_serial)
}
