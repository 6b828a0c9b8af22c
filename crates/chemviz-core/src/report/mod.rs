//! Printable dataset reports
//!
//! A report is computed in two steps: [`layout_report`] places every line on
//! A4 pages through a [`PageLayout`], and [`pdf::write_pdf`] serializes the
//! pages. Only the second step knows about PDF.

pub mod layout;
pub mod pdf;

pub use layout::{Font, Page, PageLayout, TextLine};

use crate::error::CoreResult;
use crate::models::EquipmentDataset;
use uuid::Uuid;

pub const REPORT_TITLE: &str = "Chemical Equipment Parameter Report";

const LEFT: i64 = 50;
const INDENT: i64 = 60;
const TITLE_SIZE: i64 = 16;
const HEADING_SIZE: i64 = 14;
const BODY_SIZE: i64 = 12;
const LINE_ADVANCE: i64 = 20;
const HEADING_ADVANCE: i64 = 25;
const DISTRIBUTION_ADVANCE: i64 = 18;
const SECTION_GAP: i64 = 20;

/// Download name for a dataset's report
pub fn report_filename(id: &Uuid) -> String {
    format!("equipment_report_{}.pdf", id)
}

/// Place every line of the report for `dataset`.
pub fn layout_report(dataset: &EquipmentDataset) -> Vec<Page> {
    let summary = &dataset.summary;
    let mut layout = PageLayout::new();

    layout.emit_line(LEFT, Font::HelveticaBold, TITLE_SIZE, REPORT_TITLE, 30);

    let uploaded_at = dataset.created_at.format("%Y-%m-%d %H:%M:%S");
    for line in [
        format!("Dataset Name: {}", dataset.name),
        format!("Original File: {}", dataset.original_filename),
        format!("Uploaded At: {}", uploaded_at),
    ] {
        layout.emit_line(LEFT, Font::Helvetica, BODY_SIZE, line, LINE_ADVANCE);
    }
    layout.skip(SECTION_GAP);

    layout.emit_line(LEFT, Font::HelveticaBold, HEADING_SIZE, "Summary Statistics", HEADING_ADVANCE);
    for line in [
        format!("Total Equipment Count: {}", summary.total_count),
        format!("Average Flowrate: {:.2}", summary.avg_flowrate),
        format!("Average Pressure: {:.2}", summary.avg_pressure),
        format!("Average Temperature: {:.2}", summary.avg_temperature),
    ] {
        layout.emit_line(INDENT, Font::Helvetica, BODY_SIZE, line, LINE_ADVANCE);
    }
    layout.skip(SECTION_GAP);

    layout.emit_line(
        LEFT,
        Font::HelveticaBold,
        HEADING_SIZE,
        "Equipment Type Distribution",
        HEADING_ADVANCE,
    );
    for (label, count) in summary.ranked_types() {
        layout.emit_line(
            INDENT,
            Font::Helvetica,
            BODY_SIZE,
            format!("{}: {}", label, count),
            DISTRIBUTION_ADVANCE,
        );
    }

    layout.finish()
}

/// Render the PDF report for `dataset`. Same record, same bytes.
pub fn render_report(dataset: &EquipmentDataset) -> CoreResult<Vec<u8>> {
    pdf::write_pdf(&layout_report(dataset))
}
