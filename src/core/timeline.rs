use super::dates::{TimelineBand, days_until, timeline_progress};
use crate::models::OfficerRecord;
use chrono::NaiveDate;
use clap::ValueEnum;

/// Which target date a timeline or calendar event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventKind {
    Presentation,
    #[value(alias = "sign-out")]
    Signout,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Presentation => "presentation",
            EventKind::Signout => "sign-out",
        }
    }

    pub fn target_date(&self, rec: &OfficerRecord) -> Option<NaiveDate> {
        match self {
            EventKind::Presentation => rec.clinical_presentation_date,
            EventKind::Signout => Some(rec.expected_sign_out_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub id: String,
    pub full_name: String,
    pub target: NaiveDate,
    pub days_until: i64,
    pub band: TimelineBand,
    /// Elapsed share of sign-in → target, in [0, 100]
    pub progress: f64,
}

/// Timeline for `kind`, soonest first. Records without the date are skipped.
pub fn build_timeline(
    records: &[OfficerRecord],
    kind: EventKind,
    today: NaiveDate,
) -> Vec<TimelineEntry> {
    let mut out: Vec<TimelineEntry> = records
        .iter()
        .filter_map(|r| {
            let target = kind.target_date(r)?;
            let days = days_until(target, today);
            Some(TimelineEntry {
                id: r.id.clone(),
                full_name: r.full_name.clone(),
                target,
                days_until: days,
                band: TimelineBand::from_days(days),
                progress: timeline_progress(r.date_signed_in, target, today),
            })
        })
        .collect();

    out.sort_by_key(|e| e.days_until);
    out
}
