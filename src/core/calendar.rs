//! Google Calendar "add event" deep links.

use super::timeline::EventKind;
use crate::errors::{AppError, AppResult};
use crate::models::OfficerRecord;
use url::Url;

const CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";
const EVENT_LOCATION: &str = "FMC Umuahia, Department of Internal Medicine";

/// All-day event link for one record.
///
/// A presentation link needs a presentation date: without it this fails with
/// [`AppError::NoDateSet`] instead of producing a link with no date.
pub fn calendar_link(rec: &OfficerRecord, kind: EventKind) -> AppResult<String> {
    let date = kind.target_date(rec).ok_or_else(|| AppError::NoDateSet {
        name: rec.full_name.clone(),
        kind: kind.as_str(),
    })?;

    let (title, details) = match kind {
        EventKind::Presentation => (
            format!("Clinical Presentation - {}", rec.full_name),
            format!(
                "House Officer: {}\nUnit: {}\nTopic: {}\nGender: {}",
                rec.full_name,
                rec.unit_assigned,
                rec.topic_or_default(),
                rec.gender
            ),
        ),
        EventKind::Signout => (
            format!("Sign Out - {}", rec.full_name),
            format!(
                "House Officer: {}\nUnit: {}\nExpected Sign Out Date (12 weeks from sign-in)\nGender: {}",
                rec.full_name, rec.unit_assigned, rec.gender
            ),
        ),
    };

    // all-day event: start == end
    let day = date.format("%Y%m%d").to_string();
    let dates = format!("{day}/{day}");

    let mut url = Url::parse(CALENDAR_BASE).map_err(|e| AppError::Validation(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &title)
        .append_pair("dates", &dates)
        .append_pair("details", &details)
        .append_pair("location", EVENT_LOCATION);

    Ok(url.into())
}

/// Links for many records: the presentation when it has a date, the sign-out always.
pub fn calendar_links(records: &[OfficerRecord]) -> Vec<(String, EventKind, String)> {
    let mut out = Vec::new();
    for rec in records {
        for kind in [EventKind::Presentation, EventKind::Signout] {
            if let Ok(link) = calendar_link(rec, kind) {
                out.push((rec.full_name.clone(), kind, link));
            }
        }
    }
    out
}
