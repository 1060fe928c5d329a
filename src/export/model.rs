// src/export/model.rs

use crate::core::dates::format_optional_date;
use crate::models::OfficerRecord;
use serde::Serialize;

/// Flat row for the CSV / JSON / XLSX exports.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficerExport {
    pub id: String,
    pub full_name: String,
    pub gender: String,
    pub unit_assigned: String,
    pub date_signed_in: String,
    pub clinical_presentation_topic: String,
    pub clinical_presentation_date: String,
    pub expected_sign_out_date: String,
}

impl From<&OfficerRecord> for OfficerExport {
    fn from(r: &OfficerRecord) -> Self {
        Self {
            id: r.id.clone(),
            full_name: r.full_name.clone(),
            gender: r.gender.to_string(),
            unit_assigned: r.unit_assigned.to_string(),
            date_signed_in: iso(r.date_signed_in),
            clinical_presentation_topic: r.clinical_presentation_topic.clone().unwrap_or_default(),
            clinical_presentation_date: r.clinical_presentation_date.map(iso).unwrap_or_default(),
            expected_sign_out_date: iso(r.expected_sign_out_date),
        }
    }
}

fn iso(d: chrono::NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Header per CSV / XLSX (same order as the serialized fields)
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "fullName",
        "gender",
        "unitAssigned",
        "dateSignedIn",
        "clinicalPresentationTopic",
        "clinicalPresentationDate",
        "expectedSignOutDate",
    ]
}

pub(crate) fn officer_to_row(e: &OfficerExport) -> Vec<String> {
    vec![
        e.id.clone(),
        e.full_name.clone(),
        e.gender.clone(),
        e.unit_assigned.clone(),
        e.date_signed_in.clone(),
        e.clinical_presentation_topic.clone(),
        e.clinical_presentation_date.clone(),
        e.expected_sign_out_date.clone(),
    ]
}

/// Headers of the PDF table (human readable).
pub(crate) fn report_headers() -> Vec<&'static str> {
    vec!["Name", "Gender", "Unit", "Sign In", "Presentation", "Sign Out"]
}

/// PDF table row: display dates, `-` for a missing presentation.
pub(crate) fn report_row(r: &OfficerRecord) -> Vec<String> {
    vec![
        r.full_name.clone(),
        r.gender.to_string(),
        r.unit_assigned.to_string(),
        format_optional_date(Some(r.date_signed_in)),
        format_optional_date(r.clinical_presentation_date),
        format_optional_date(Some(r.expected_sign_out_date)),
    ]
}
