//! Report Renderer — lays out candidate metadata and evaluation sections
//! into a paginated PDF.
//!
//! Rendering is two-phase so the document is fully constructed in memory
//! before anything touches the filesystem: `compose` builds a pure
//! `ReportDocument` element list, and `write_pdf` paginates it, serializes
//! the whole PDF to bytes, and performs exactly one write. A failed run
//! never leaves a half-written report behind.

pub mod font_metrics;

use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use thiserror::Error;
use tracing::debug;

use crate::schema::EvaluationResult;
use crate::transcript::InterviewRecord;

pub use font_metrics::PageConfig;
use font_metrics::{metrics, FontFace};

pub const REPORT_TITLE: &str = "AI-Based Interview Evaluation Report";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF construction failed: {0}")]
    Pdf(String),

    #[error("failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// How the candidate-information block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStyle {
    /// Labeled plain-text lines.
    Plain,
    /// Two-column table with a styled header row.
    Table,
}

/// One laid-out piece of the report, in render order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Title(String),
    CandidateLines(Vec<(String, String)>),
    CandidateTable(Vec<(String, String)>),
    ScoreLine(String),
    SectionHeading(String),
    BodyText(String),
}

/// The fully composed report, ready for pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub elements: Vec<Element>,
}

/// Derives the output filename from the candidate's name: whitespace runs
/// become underscores, extension is fixed.
pub fn report_filename(name: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Interview_Report_{stem}.pdf")
}

/// Composes the report elements in fixed order: title, candidate block,
/// performance score, then every narrative section in schema order.
/// Pure function of its inputs.
pub fn compose(
    record: &InterviewRecord,
    evaluation: &EvaluationResult,
    style: LayoutStyle,
) -> ReportDocument {
    let candidate_rows = vec![
        ("Candidate Name".to_string(), record.name.clone()),
        ("Email".to_string(), record.email.clone()),
        ("Role".to_string(), record.role.clone()),
        ("Interview Date".to_string(), record.date.clone()),
    ];

    let mut elements = vec![
        Element::Title(REPORT_TITLE.to_string()),
        match style {
            LayoutStyle::Plain => Element::CandidateLines(candidate_rows),
            LayoutStyle::Table => Element::CandidateTable(candidate_rows),
        },
        Element::ScoreLine(format!(
            "Performance Score: {} / 10",
            format_score(evaluation.performance_score)
        )),
    ];

    for (heading, body) in evaluation.sections() {
        elements.push(Element::SectionHeading(heading.to_string()));
        elements.push(Element::BodyText(body.to_string()));
    }

    ReportDocument { elements }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score:.1}")
    }
}

/// Paginates the composed document and writes it to `path` in a single
/// filesystem operation. Overwrites any existing file at that path.
pub fn write_pdf(
    report: &ReportDocument,
    path: &Path,
    config: &PageConfig,
) -> Result<(), RenderError> {
    let bytes = render_bytes(report, config)?;
    debug!(bytes = bytes.len(), "report serialized");
    std::fs::write(path, bytes)?;
    Ok(())
}

fn render_bytes(report: &ReportDocument, config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        REPORT_TITLE,
        Mm(config.width_mm),
        Mm(config.height_mm),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut cursor = PageCursor {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        regular: &regular,
        bold: &bold,
        config,
        y_mm: config.height_mm - config.margin_mm,
    };
    for element in &report.elements {
        cursor.emit(element);
    }
    drop(cursor);

    doc.save_to_bytes().map_err(pdf_error)
}

fn pdf_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(e.to_string())
}

const HEADER_FILL: (f32, f32, f32) = (0.15, 0.24, 0.42);
const RULE_GRAY: (f32, f32, f32) = (0.70, 0.70, 0.70);
const LABEL_COLUMN_MM: f32 = 55.0;

/// Tracks the write position on the current page and breaks to a fresh page
/// when an element would cross the bottom margin.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    config: &'a PageConfig,
    y_mm: f32,
}

impl PageCursor<'_> {
    fn emit(&mut self, element: &Element) {
        match element {
            Element::Title(text) => {
                self.centered_line(text, self.config.title_size_pt);
                self.advance(6.0);
            }
            Element::CandidateLines(rows) => {
                for (label, value) in rows {
                    self.labeled_line(label, value);
                }
                self.advance(4.0);
            }
            Element::CandidateTable(rows) => {
                self.candidate_table(rows);
                self.advance(4.0);
            }
            Element::ScoreLine(text) => {
                self.line(text, FontFace::Bold, self.config.body_size_pt);
                self.advance(2.0);
            }
            Element::SectionHeading(text) => {
                self.advance(2.0);
                // Keep the heading with at least one body line.
                self.ensure_room(
                    self.config.line_height_mm(self.config.heading_size_pt)
                        + self.config.line_height_mm(self.config.body_size_pt),
                );
                self.line(text, FontFace::Bold, self.config.heading_size_pt);
            }
            Element::BodyText(text) => {
                let size = self.config.body_size_pt;
                let max_em = self.config.text_width_em(size);
                for line in metrics(FontFace::Regular).wrap_words(text, max_em) {
                    self.line(&line, FontFace::Regular, size);
                }
                self.advance(2.0);
            }
        }
    }

    fn font_ref(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => self.regular,
            FontFace::Bold => self.bold,
        }
    }

    fn break_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.config.width_mm),
            Mm(self.config.height_mm),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y_mm = self.config.height_mm - self.config.margin_mm;
    }

    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y_mm - needed_mm < self.config.margin_mm {
            self.break_page();
        }
    }

    /// Inter-element spacing. Never breaks the page on its own; the next
    /// `ensure_room` does.
    fn advance(&mut self, mm: f32) {
        self.y_mm -= mm;
    }

    fn line(&mut self, text: &str, face: FontFace, size_pt: f32) {
        let lh = self.config.line_height_mm(size_pt);
        self.ensure_room(lh);
        self.y_mm -= lh;
        self.layer.use_text(
            text,
            size_pt,
            Mm(self.config.margin_mm),
            Mm(self.y_mm),
            self.font_ref(face),
        );
    }

    fn centered_line(&mut self, text: &str, size_pt: f32) {
        let lh = self.config.line_height_mm(size_pt);
        self.ensure_room(lh);
        self.y_mm -= lh;
        let text_mm = metrics(FontFace::Bold).measure_mm(text, size_pt);
        let x = ((self.config.width_mm - text_mm) / 2.0).max(self.config.margin_mm);
        self.layer
            .use_text(text, size_pt, Mm(x), Mm(self.y_mm), self.bold);
    }

    /// Bold label and regular value on one baseline.
    fn labeled_line(&mut self, label: &str, value: &str) {
        let size = self.config.body_size_pt;
        let lh = self.config.line_height_mm(size);
        self.ensure_room(lh);
        self.y_mm -= lh;

        let label_text = format!("{label}:");
        self.layer.use_text(
            &label_text,
            size,
            Mm(self.config.margin_mm),
            Mm(self.y_mm),
            self.bold,
        );
        let label_mm = metrics(FontFace::Bold).measure_mm(&label_text, size) + 2.0;
        self.layer.use_text(
            value,
            size,
            Mm(self.config.margin_mm + label_mm),
            Mm(self.y_mm),
            self.regular,
        );
    }

    /// Two-column table: shaded header row, one rule under each data row.
    fn candidate_table(&mut self, rows: &[(String, String)]) {
        let size = self.config.body_size_pt;
        let row_h = self.config.line_height_mm(size) + 2.0;
        let x0 = self.config.margin_mm;
        let x1 = self.config.width_mm - self.config.margin_mm;
        let value_x = x0 + LABEL_COLUMN_MM;
        let pad = 1.5;

        // Header row never splits from the first data row.
        self.ensure_room(row_h * 2.0);

        let top = self.y_mm;
        self.set_fill(HEADER_FILL);
        self.fill_rect(x0, top - row_h, x1, top);
        self.set_fill((1.0, 1.0, 1.0));
        self.y_mm -= row_h;
        let baseline = self.y_mm + pad;
        self.layer
            .use_text("Field", size, Mm(x0 + pad), Mm(baseline), self.bold);
        self.layer
            .use_text("Value", size, Mm(value_x + pad), Mm(baseline), self.bold);
        self.set_fill((0.0, 0.0, 0.0));

        for (label, value) in rows {
            self.ensure_room(row_h);
            self.y_mm -= row_h;
            let baseline = self.y_mm + pad;
            self.layer
                .use_text(label, size, Mm(x0 + pad), Mm(baseline), self.regular);
            self.layer
                .use_text(value, size, Mm(value_x + pad), Mm(baseline), self.regular);
            self.rule(x0, x1, self.y_mm);
        }
    }

    fn set_fill(&self, (r, g, b): (f32, f32, f32)) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn fill_rect(&self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                (Point::new(Mm(x0), Mm(y0)), false),
                (Point::new(Mm(x1), Mm(y0)), false),
                (Point::new(Mm(x1), Mm(y1)), false),
                (Point::new(Mm(x0), Mm(y1)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn rule(&self, x0: f32, x1: f32, y: f32) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(RULE_GRAY.0, RULE_GRAY.1, RULE_GRAY.2, None)));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x0), Mm(y)), false),
                (Point::new(Mm(x1), Mm(y)), false),
            ],
            is_closed: false,
        });
    }
}
