//! Filtered / sorted view of the record set and the statistics shown on top of it.

use super::dates::is_upcoming;
use crate::models::{Gender, OfficerRecord, Unit};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortField {
    #[default]
    #[value(name = "fullName", alias = "name")]
    FullName,
    #[value(name = "dateSignedIn", alias = "signed-in")]
    DateSignedIn,
    #[value(name = "clinicalPresentationDate", alias = "presentation")]
    ClinicalPresentationDate,
    #[value(name = "expectedSignOutDate", alias = "signout")]
    ExpectedSignOutDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Every `None` field matches everything.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub unit: Option<Unit>,
    pub gender: Option<Gender>,
    pub search_term: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl FilterOptions {
    pub fn matches(&self, rec: &OfficerRecord) -> bool {
        if self.unit.is_some_and(|u| u != rec.unit_assigned) {
            return false;
        }
        if self.gender.is_some_and(|g| g != rec.gender) {
            return false;
        }

        match self.search_term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                rec.full_name.to_lowercase().contains(&needle)
                    || rec
                        .clinical_presentation_topic
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Filter then sort into a fresh vector; `records` is left untouched.
///
/// The sort is stable and `Desc` reverses the comparison, not the result,
/// so ties keep their input order in both directions.
pub fn apply_filters(records: &[OfficerRecord], opts: &FilterOptions) -> Vec<OfficerRecord> {
    let mut out: Vec<OfficerRecord> = records
        .iter()
        .filter(|r| opts.matches(r))
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let ord = compare_by(a, b, opts.sort_by);
        match opts.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    out
}

fn compare_by(a: &OfficerRecord, b: &OfficerRecord, field: SortField) -> Ordering {
    match field {
        // case-insensitive first, raw bytes only to break exact ties
        SortField::FullName => a
            .full_name
            .to_lowercase()
            .cmp(&b.full_name.to_lowercase())
            .then_with(|| a.full_name.cmp(&b.full_name)),
        SortField::DateSignedIn => a.date_signed_in.cmp(&b.date_signed_in),
        // unset dates sort first, like an empty string would
        SortField::ClinicalPresentationDate => a
            .clinical_presentation_date
            .cmp(&b.clinical_presentation_date),
        SortField::ExpectedSignOutDate => a.expected_sign_out_date.cmp(&b.expected_sign_out_date),
    }
}

/// Keep only the records whose id is in `ids`, in view order.
/// An empty id list selects everything.
pub fn select_ids(view: &[OfficerRecord], ids: &[String]) -> Vec<OfficerRecord> {
    if ids.is_empty() {
        return view.to_vec();
    }
    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    view.iter()
        .filter(|r| wanted.contains(r.id.as_str()))
        .cloned()
        .collect()
}

/// Dashboard counters, always computed on the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub upcoming_presentations: usize,
    pub upcoming_sign_outs: usize,
    pub by_unit: BTreeMap<Unit, usize>,
}

impl DashboardStats {
    pub fn compute(filtered: &[OfficerRecord], today: NaiveDate, window_days: u32) -> Self {
        let mut stats = DashboardStats {
            total: filtered.len(),
            male: 0,
            female: 0,
            upcoming_presentations: 0,
            upcoming_sign_outs: 0,
            by_unit: BTreeMap::new(),
        };

        for r in filtered {
            if r.gender.is_male() {
                stats.male += 1;
            } else {
                stats.female += 1;
            }
            if r
                .clinical_presentation_date
                .is_some_and(|d| is_upcoming(d, today, window_days))
            {
                stats.upcoming_presentations += 1;
            }
            if is_upcoming(r.expected_sign_out_date, today, window_days) {
                stats.upcoming_sign_outs += 1;
            }
            *stats.by_unit.entry(r.unit_assigned).or_insert(0) += 1;
        }

        stats
    }

    /// Units with at least one officer, most populated first.
    pub fn unit_distribution(&self) -> Vec<(Unit, usize)> {
        let mut v: Vec<(Unit, usize)> = self.by_unit.iter().map(|(u, n)| (*u, *n)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }
}
