// src/export/report.rs

use crate::core::dates::format_date;
use crate::core::query::DashboardStats;
use crate::export::model::{report_headers, report_row};
use crate::export::pdf::PdfManager;
use crate::models::OfficerRecord;
use chrono::NaiveDate;

pub const REPORT_HEADER: [&str; 3] = [
    "FMC UMUAHIA, ABIA STATE",
    "DEPARTMENT OF INTERNAL MEDICINE",
    "HOUSE OFFICERS CLINICAL FLOW",
];

pub const ATTRIBUTION: &str = "Built by Dr. Onyemachi Joseph, copyright 2025";

/// Inputs of the PDF report. `view` is the filtered (and possibly
/// selected) record set, `stats` its dashboard counters.
pub struct ReportInput<'a> {
    pub view: &'a [OfficerRecord],
    pub stats: &'a DashboardStats,
    pub signer: &'a str,
    pub generated_on: NaiveDate,
    pub window_days: u32,
}

/// Render the whole report in memory.
pub fn render_report(input: &ReportInput) -> Vec<u8> {
    let mut pdf = PdfManager::new();

    //
    // 1. Header
    //
    for line in REPORT_HEADER {
        pdf.centered_line(line, 15.0, true);
    }
    pdf.gap(10.0);
    pdf.line(
        &format!("Generated on: {}", format_date(input.generated_on)),
        10.0,
        false,
    );
    pdf.line(&format!("Downloaded by: {}", input.signer), 10.0, false);

    //
    // 2. Summary statistics
    //
    let s = input.stats;
    pdf.heading("Summary");
    pdf.line(&format!("Total officers: {}", s.total), 10.0, false);
    pdf.line(
        &format!("Male: {}    Female: {}", s.male, s.female),
        10.0,
        false,
    );
    pdf.line(
        &format!(
            "Upcoming presentations (next {} days): {}",
            input.window_days, s.upcoming_presentations
        ),
        10.0,
        false,
    );
    pdf.line(
        &format!(
            "Upcoming sign-outs (next {} days): {}",
            input.window_days, s.upcoming_sign_outs
        ),
        10.0,
        false,
    );

    //
    // 3. Per-unit distribution
    //
    let distribution: Vec<(String, usize)> = s
        .unit_distribution()
        .into_iter()
        .map(|(u, n)| (u.to_string(), n))
        .collect();

    if !distribution.is_empty() {
        pdf.heading("Unit Distribution");
        pdf.bar_chart(&distribution);
    }

    //
    // 4. Records
    //
    pdf.heading("House Officers Details");
    if input.view.is_empty() {
        pdf.line("No officers match the current filters.", 10.0, false);
    } else {
        let rows: Vec<Vec<String>> = input.view.iter().map(report_row).collect();
        pdf.table(&report_headers(), &rows);
    }

    //
    // 5. Appendix: presentation topics
    //
    let with_topic: Vec<&OfficerRecord> = input
        .view
        .iter()
        .filter(|r| r.clinical_presentation_topic.is_some())
        .collect();

    if !with_topic.is_empty() {
        pdf.heading("Clinical Presentation Topics");
        for r in with_topic {
            let when = r
                .clinical_presentation_date
                .map(format_date)
                .unwrap_or_else(|| "date not set".to_string());
            pdf.paragraph(
                &format!(
                    "{} ({}, {}): {}",
                    r.full_name,
                    r.unit_assigned,
                    when,
                    r.topic_or_default()
                ),
                9.0,
            );
            pdf.gap(3.0);
        }
    }

    pdf.finish(ATTRIBUTION)
}
