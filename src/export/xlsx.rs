// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::OfficerExport;
use crate::export::excel_date::{EXCEL_DATE_FORMAT, parse_to_excel_date};
use crate::export::model::{get_headers, officer_to_row};
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

/// Workbook con styling e auto-larghezza colonne, as bytes.
pub(crate) fn render_xlsx(rows: &[OfficerExport]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("House Officers").map_err(to_export_error)?;

    // ---------------------------
    // Caso dataset vuoto
    // ---------------------------
    if rows.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_export_error)?;
        return workbook.save_to_buffer().map_err(to_export_error);
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x1E3A8A))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEFF6FF);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Righe
    // ---------------------------
    for (row_index, officer) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in officer_to_row(officer).iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band_color)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save_to_buffer().map_err(to_export_error)
}

/// Dates become real Excel dates, everything else stays text
/// (ids look numeric for legacy rows and must not be converted).
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some(serial) = parse_to_excel_date(s) {
        let fmt = base.set_num_format(EXCEL_DATE_FORMAT);
        ws.write_with_format(row, col, serial, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    ws.write_with_format(row, col, s, &base)
        .map_err(to_export_error)?;
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}
