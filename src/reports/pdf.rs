//! PDF rendering for the report card and attendance report.
//!
//! Plain canvas drawing: a heading block, a ruled line, then one row per
//! subject. Standing is color-coded the same way the printed report
//! always was (red for recovery, green for approved).

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};

use crate::modules::dashboards::model::{AttendanceReport, ReportCard};
use crate::utils::aggregates::GradeStanding;
use crate::utils::errors::AppError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const ROW_STEP_MM: f32 = 7.0;

struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas {
    fn text(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.regular);
    }

    fn text_bold(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.bold);
    }

    fn set_color(&self, r: f32, g: f32, b: f32) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn reset_color(&self) {
        self.set_color(0.0, 0.0, 0.0);
    }
}

fn new_canvas(title: &str) -> Result<(printpdf::PdfDocumentReference, Canvas), AppError> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(anyhow::anyhow!("PDF font error: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(anyhow::anyhow!("PDF font error: {}", e)))?;

    let layer = doc.get_page(page).get_layer(layer);
    Ok((
        doc,
        Canvas {
            layer,
            regular,
            bold,
        },
    ))
}

fn standing_label(standing: GradeStanding) -> &'static str {
    match standing {
        GradeStanding::Approved => "Approved",
        GradeStanding::Recovery => "Recovery",
        GradeStanding::InProgress => "In progress",
    }
}

/// Render the student report card as a PDF.
pub fn render_report_card(report: &ReportCard) -> Result<Vec<u8>, AppError> {
    let (doc, canvas) = new_canvas("Report Card - Nexus")?;

    let mut y = PAGE_HEIGHT_MM - 25.0;
    canvas.text_bold("Report Card - Nexus", 16.0, MARGIN_MM, y);
    y -= 9.0;
    canvas.text(&format!("Student: {}", report.student_name), 12.0, MARGIN_MM, y);
    y -= 6.0;
    canvas.text(
        &format!("Enrollment: {}", report.enrollment_number),
        12.0,
        MARGIN_MM,
        y,
    );
    y -= 6.0;
    canvas.text(
        &format!(
            "Class: {}",
            report.class_code.as_deref().unwrap_or("No class")
        ),
        12.0,
        MARGIN_MM,
        y,
    );

    y -= 10.0;
    canvas.text_bold("SUBJECT", 10.0, MARGIN_MM, y);
    canvas.text_bold("AVERAGE", 10.0, 110.0, y);
    canvas.text_bold("STANDING", 10.0, 150.0, y);
    y -= ROW_STEP_MM;

    for row in &report.rows {
        canvas.text(&row.subject, 10.0, MARGIN_MM, y);
        canvas.text(&row.average.to_string(), 10.0, 110.0, y);

        match row.standing {
            GradeStanding::Recovery => canvas.set_color(0.8, 0.0, 0.0),
            GradeStanding::Approved => canvas.set_color(0.0, 0.5, 0.0),
            GradeStanding::InProgress => canvas.reset_color(),
        }
        canvas.text(standing_label(row.standing), 10.0, 150.0, y);
        canvas.reset_color();

        y -= ROW_STEP_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to render PDF: {}", e)))
}

/// Render the attendance report as a PDF.
pub fn render_attendance_report(report: &AttendanceReport) -> Result<Vec<u8>, AppError> {
    let (doc, canvas) = new_canvas("Attendance Report - Nexus")?;

    let mut y = PAGE_HEIGHT_MM - 25.0;
    canvas.text_bold("Attendance Report - Nexus", 16.0, MARGIN_MM, y);
    y -= 9.0;
    canvas.text(&format!("Student: {}", report.student_name), 12.0, MARGIN_MM, y);

    y -= 12.0;
    canvas.text_bold("SUBJECT", 10.0, MARGIN_MM, y);
    canvas.text_bold("ABSENCES", 10.0, 110.0, y);
    canvas.text_bold("% PRESENT", 10.0, 150.0, y);
    y -= ROW_STEP_MM;

    for row in &report.rows {
        canvas.text(&row.subject, 10.0, MARGIN_MM, y);
        canvas.text(&row.absences.to_string(), 10.0, 110.0, y);
        canvas.text(&format!("{}%", row.percentage), 10.0, 150.0, y);
        y -= ROW_STEP_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to render PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::aggregates::AttendanceStanding;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn report_card_renders_nonempty_pdf() {
        let report = ReportCard {
            student_name: "Maria Souza".to_string(),
            enrollment_number: "202400001".to_string(),
            class_code: Some("INF-1A".to_string()),
            rows: vec![crate::modules::dashboards::model::ReportCardRow {
                subject_id: Uuid::new_v4(),
                subject: "Mathematics".to_string(),
                grades: vec![Decimal::new(80, 1)],
                average: Decimal::new(80, 1),
                standing: GradeStanding::Approved,
            }],
        };

        let bytes = render_report_card(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn attendance_report_renders_nonempty_pdf() {
        let report = AttendanceReport {
            student_name: "Maria Souza".to_string(),
            enrollment_number: "202400001".to_string(),
            rows: vec![crate::modules::dashboards::model::AttendanceRow {
                subject_id: Uuid::new_v4(),
                subject: "History".to_string(),
                total_lessons: 10,
                absences: 2,
                percentage: 80,
                standing: AttendanceStanding::Regular,
            }],
        };

        let bytes = render_attendance_report(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
