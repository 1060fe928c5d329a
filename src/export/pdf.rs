// src/export/pdf.rs

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Average Helvetica glyph width, as a share of the font size.
const AVG_GLYPH: f32 = 0.52;

/// Flowing A4 document: content is appended top to bottom and pages are
/// opened as needed. Pages are kept in memory until [`PdfManager::finish`],
/// which stamps every footer once the page count is known.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_font_id: Ref,
    next_id: i32,

    pages: Vec<Content>,
    cursor_y: f32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    footer_h: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // ID gestiti a mano
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        // WinAnsi so that Latin-1 names (accents) render as written
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_font_id,
            next_id: 5,

            pages: Vec::new(),
            cursor_y: 0.0,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            footer_h: 30.0,
            row_h: 18.0,

            font_size: 9.0,
            header_font_size: 9.5,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn content_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) {
        self.pages.push(Content::new());
        self.cursor_y = self.page_h - self.margin;
    }

    /// Open a new page unless `h` points still fit above the footer.
    fn ensure_space(&mut self, h: f32) {
        if self.pages.is_empty() || self.cursor_y - h < self.margin + self.footer_h {
            self.new_page();
        }
    }

    fn page(&mut self) -> &mut Content {
        if self.pages.is_empty() {
            self.new_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn gap(&mut self, h: f32) {
        self.cursor_y -= h;
    }

    /// One line of text at the left margin.
    pub fn line(&mut self, text: &str, size: f32, bold: bool) {
        let lead = size * 1.45;
        self.ensure_space(lead);
        self.cursor_y -= lead;

        let (x, y) = (self.margin, self.cursor_y);
        draw_text(self.page(), font(bold), x, y, size, text);
    }

    pub fn centered_line(&mut self, text: &str, size: f32, bold: bool) {
        let lead = size * 1.45;
        self.ensure_space(lead);
        self.cursor_y -= lead;

        let x = ((self.page_w - text_width(text, size)) / 2.0).max(self.margin);
        let y = self.cursor_y;
        draw_text(self.page(), font(bold), x, y, size, text);
    }

    pub fn heading(&mut self, text: &str) {
        self.gap(8.0);
        // keep a heading together with at least two rows of what follows
        self.ensure_space(12.0 * 1.45 + 2.0 * self.row_h);
        self.line(text, 12.0, true);
        self.gap(4.0);
    }

    /// Free text wrapped to the content width.
    pub fn paragraph(&mut self, text: &str, size: f32) {
        let max_chars = (self.content_width() / (size * AVG_GLYPH)) as usize;
        for l in textwrap::wrap(text, max_chars.max(10)) {
            self.line(&l, size, false);
        }
    }

    /// Horizontal bar chart, one bar per `(label, value)`.
    pub fn bar_chart(&mut self, items: &[(String, usize)]) {
        let max = items.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
        let label_w = 160.0;
        let bar_max = self.content_width() - label_w - 40.0;
        let bar_h = 12.0;

        for (label, value) in items {
            self.ensure_space(self.row_h);
            self.cursor_y -= self.row_h;

            let y = self.cursor_y;
            let x0 = self.margin;
            let w = bar_max * (*value as f32) / (max as f32);
            let size = self.font_size;
            let content = self.page();

            draw_text(content, REGULAR, x0, y + 3.0, size, label);

            content.save_state();
            content.set_fill_rgb(0.12, 0.23, 0.54);
            content.rect(x0 + label_w, y, w, bar_h);
            content.fill_nonzero();
            content.restore_state();

            draw_text(content, BOLD, x0 + label_w + w + 6.0, y + 3.0, size, &value.to_string());
        }
    }

    /// Calcola larghezza colonne in base a header + contenuto e le adatta alla pagina
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let char_w = self.font_size * AVG_GLYPH;
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.len() as f32 * char_w + 10.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count() as f32 * char_w + 10.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.content_width();
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn table_row(&mut self, widths: &[f32], row: &[String], bold: bool, fill: Option<f32>) {
        self.cursor_y -= self.row_h;
        let y = self.cursor_y;
        let x0 = self.margin;
        let size = if bold { self.header_font_size } else { self.font_size };
        let row_h = self.row_h;
        let total_w: f32 = widths.iter().sum();
        let content = self.page();

        if let Some(grey) = fill {
            content.save_state();
            content.set_fill_rgb(grey, grey, grey + 0.03);
            content.rect(x0, y, total_w, row_h);
            content.fill_nonzero();
            content.restore_state();
        }

        let mut x = x0;
        for (text, w) in row.iter().zip(widths) {
            let fitted = fit_text(text, *w - 8.0, size);
            draw_text(content, font(bold), x + 4.0, y + 5.0, size, &fitted);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Table across as many pages as needed; the header row repeats on each.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let widths = self.compute_col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        self.ensure_space(2.0 * self.row_h);
        self.table_row(&widths, &header_row, true, Some(0.85));

        for (i, row) in rows.iter().enumerate() {
            if self.cursor_y - self.row_h < self.margin + self.footer_h {
                self.new_page();
                self.table_row(&widths, &header_row, true, Some(0.85));
            }
            // zebra stripe
            let fill = (i % 2 == 0).then_some(0.96);
            self.table_row(&widths, row, false, fill);
        }
    }

    /// Stamp footers, build the page tree and serialize.
    pub fn finish(mut self, attribution: &str) -> Vec<u8> {
        if self.pages.is_empty() {
            self.new_page();
        }

        let total = self.pages.len();
        let pages = std::mem::take(&mut self.pages);
        let mut page_refs = Vec::with_capacity(total);

        for (idx, mut content) in pages.into_iter().enumerate() {
            let footer_y = self.margin - 20.0;
            let size = 8.0;

            let x = ((self.page_w - text_width(attribution, size)) / 2.0).max(self.margin);
            draw_text(&mut content, REGULAR, x, footer_y, size, attribution);

            let pg = format!("Page {} of {}", idx + 1, total);
            let px = self.page_w - self.margin - text_width(&pg, size);
            draw_text(&mut content, REGULAR, px, footer_y, size, &pg);

            let page_id = self.fresh_ref();
            let content_id = self.fresh_ref();
            page_refs.push(page_id);

            {
                let mut page = self.pdf.page(page_id);
                page.parent(self.pages_id)
                    .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                    .contents(content_id);

                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                fonts.pair(REGULAR, self.font_id);
                fonts.pair(BOLD, self.bold_font_id);
            }

            self.pdf.stream(content_id, &content.finish());
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(total as i32)
            .kids(page_refs);

        self.pdf.finish()
    }
}

fn font(bold: bool) -> Name<'static> {
    if bold { BOLD } else { REGULAR }
}

fn draw_text(content: &mut Content, font: Name, x: f32, y: f32, size: f32, text: &str) {
    let bytes = pdf_text(text);
    content.begin_text();
    content.set_font(font, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&bytes));
    content.end_text();
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH
}

/// Truncate with `...` so the text fits in `max_w` points.
fn fit_text(text: &str, max_w: f32, size: f32) -> String {
    let max_chars = (max_w / (size * AVG_GLYPH)).floor().max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut s: String = text.chars().take(max_chars - 3).collect();
    s.push_str("...");
    s
}

/// WinAnsi covers Latin-1: anything else becomes `?`.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            n @ 0x20..=0x7E => n as u8,
            n @ 0xA0..=0xFF => n as u8,
            _ => b'?',
        })
        .collect()
}
