// src/export/logic.rs

use crate::core::query::DashboardStats;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{ensure_writable, write_atomic};
use crate::export::json_csv::{render_csv, render_json};
use crate::export::report::{ReportInput, render_report};
use crate::export::xlsx::render_xlsx;
use crate::export::{ExportFormat, OfficerExport, notify_export_success};
use crate::models::OfficerRecord;
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Everything an export needs besides the records.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub file: PathBuf,
    /// Free-text name printed as "Downloaded by"; mandatory for PDF.
    pub signer: Option<String>,
    pub force: bool,
    pub today: NaiveDate,
    pub window_days: u32,
}

impl ExportRequest {
    /// Guard clauses, run before anything touches the filesystem.
    pub fn validate(&self) -> AppResult<()> {
        if self.format == ExportFormat::Pdf && self.signer().is_none() {
            return Err(AppError::Validation(
                "Please enter your name before downloading the report (--signer)".into(),
            ));
        }

        if !self.file.is_absolute() {
            return Err(AppError::Validation(format!(
                "Output file path must be absolute: {}",
                self.file.display()
            )));
        }

        Ok(())
    }

    fn signer(&self) -> Option<&str> {
        self.signer
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export `view` (already filtered / selected) as requested.
    ///
    /// The output is rendered in memory and written atomically: on error no
    /// file is created and an existing one is left untouched. Returns
    /// `false` when there was nothing to export.
    pub fn export(view: &[OfficerRecord], req: &ExportRequest) -> AppResult<bool> {
        req.validate()?;

        if view.is_empty() {
            warning("No officers match the selected filters: nothing exported.");
            return Ok(false);
        }

        let path: &Path = &req.file;
        ensure_writable(path, req.force)?;

        info(format!(
            "Exporting {} officer(s) to {}: {}",
            view.len(),
            req.format.as_str().to_uppercase(),
            path.display()
        ));

        let bytes = Self::render(view, req)?;
        write_atomic(path, &bytes)?;

        notify_export_success(&req.format.as_str().to_uppercase(), path);
        Ok(true)
    }

    pub fn render(view: &[OfficerRecord], req: &ExportRequest) -> AppResult<Vec<u8>> {
        let rows: Vec<OfficerExport> = view.iter().map(OfficerExport::from).collect();

        match req.format {
            ExportFormat::Csv => render_csv(&rows),
            ExportFormat::Json => render_json(&rows),
            ExportFormat::Xlsx => render_xlsx(&rows),
            ExportFormat::Pdf => {
                let stats = DashboardStats::compute(view, req.today, req.window_days);
                Ok(render_report(&ReportInput {
                    view,
                    stats: &stats,
                    signer: req.signer().unwrap_or_default(),
                    generated_on: req.today,
                    window_days: req.window_days,
                }))
            }
        }
    }
}

/// Default output name, e.g. `House_Officers_Clinical_Flow_2025-03-26.pdf`.
pub fn default_file_name(format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "House_Officers_Clinical_Flow_{}.{}",
        today.format("%Y-%m-%d"),
        format.as_str()
    )
}
