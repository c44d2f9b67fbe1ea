//! Excel export of the attendance report.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::modules::dashboards::model::AttendanceReport;
use crate::utils::aggregates::AttendanceStanding;
use crate::utils::errors::AppError;

fn standing_label(standing: AttendanceStanding) -> &'static str {
    match standing {
        AttendanceStanding::Excellent => "Excellent",
        AttendanceStanding::Regular => "Regular",
        AttendanceStanding::Warning => "Warning",
    }
}

fn build_sheet(worksheet: &mut Worksheet, report: &AttendanceReport) -> Result<(), XlsxError> {
    let header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let cell = Format::new().set_border(FormatBorder::Thin);

    worksheet.set_name("Attendance")?;
    worksheet.set_column_width(0, 30)?;
    worksheet.set_column_width(4, 12)?;

    let titles = ["Subject", "Total lessons", "Absences", "% Present", "Standing"];
    for (col, title) in titles.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string_with_format(r, 0, &row.subject, &cell)?;
        worksheet.write_number_with_format(r, 1, row.total_lessons as f64, &cell)?;
        worksheet.write_number_with_format(r, 2, row.absences as f64, &cell)?;
        worksheet.write_string_with_format(r, 3, format!("{}%", row.percentage), &cell)?;
        worksheet.write_string_with_format(r, 4, standing_label(row.standing), &cell)?;
    }

    Ok(())
}

/// Build the attendance worksheet and return the serialized workbook.
pub fn attendance_workbook(report: &AttendanceReport) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    build_sheet(worksheet, report)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build workbook: {}", e)))?;

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to serialize workbook: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::dashboards::model::AttendanceRow;
    use uuid::Uuid;

    #[test]
    fn workbook_is_a_zip_container() {
        let report = AttendanceReport {
            student_name: "Maria Souza".to_string(),
            enrollment_number: "202400001".to_string(),
            rows: vec![AttendanceRow {
                subject_id: Uuid::new_v4(),
                subject: "Mathematics".to_string(),
                total_lessons: 10,
                absences: 2,
                percentage: 80,
                standing: AttendanceStanding::Regular,
            }],
        };

        let bytes = attendance_workbook(&report).unwrap();
        // XLSX is a zip archive; check the magic bytes.
        assert_eq!(&bytes[..2], b"PK");
    }
}
