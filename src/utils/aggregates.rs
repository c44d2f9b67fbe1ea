//! Grade and attendance arithmetic shared by the student report card,
//! the dashboards and the file exports.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Passing threshold on the 0..=10 grade scale.
const PASSING_AVERAGE: Decimal = Decimal::from_parts(60, 0, 0, false, 1);

/// Attendance percentage below which a student is flagged.
const ATTENDANCE_WARNING_THRESHOLD: i32 = 75;

/// Arithmetic mean of the given grade values, rounded to one decimal
/// place. A student with no grades averages 0 — not an error, not null.
pub fn average_grade(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    (sum / Decimal::from(values.len() as i64)).round_dp(1)
}

/// Number of absences among the given presence flags.
pub fn absence_count(present_flags: &[bool]) -> i64 {
    present_flags.iter().filter(|present| !**present).count() as i64
}

/// Share of attended lessons, floored to an integer percentage.
///
/// Defined as 100 when no lessons were recorded. That is a division-by-zero
/// guard, not a claim of full attendance.
pub fn attendance_percentage(total: i64, absences: i64) -> i32 {
    if total <= 0 {
        return 100;
    }
    ((total - absences) * 100 / total) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GradeStanding {
    InProgress,
    Approved,
    Recovery,
}

/// Report-card standing for one subject: no grades yet means the subject
/// is still in progress, otherwise the average decides.
pub fn grade_standing(values: &[Decimal]) -> GradeStanding {
    if values.is_empty() {
        return GradeStanding::InProgress;
    }
    if average_grade(values) >= PASSING_AVERAGE {
        GradeStanding::Approved
    } else {
        GradeStanding::Recovery
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStanding {
    Excellent,
    Regular,
    Warning,
}

pub fn attendance_standing(percentage: i32) -> AttendanceStanding {
    if percentage == 100 {
        AttendanceStanding::Excellent
    } else if percentage < ATTENDANCE_WARNING_THRESHOLD {
        AttendanceStanding::Warning
    } else {
        AttendanceStanding::Regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn average_of_no_grades_is_zero() {
        assert_eq!(average_grade(&[]), Decimal::ZERO);
    }

    #[test]
    fn average_is_exact_mean_rounded_to_one_place() {
        let grades = [dec(70, 1), dec(80, 1), dec(90, 1)];
        assert_eq!(average_grade(&grades), dec(80, 1));

        // 7.0 and 8.5 average to 7.75, which rounds to 7.8.
        let grades = [dec(70, 1), dec(85, 1)];
        assert_eq!(average_grade(&grades), dec(78, 1));
    }

    #[test]
    fn absence_count_only_counts_misses() {
        assert_eq!(absence_count(&[]), 0);
        assert_eq!(absence_count(&[true, true, false, true, false]), 2);
    }

    #[test]
    fn attendance_percentage_with_no_lessons_is_full() {
        assert_eq!(attendance_percentage(0, 0), 100);
    }

    #[test]
    fn attendance_percentage_floors() {
        assert_eq!(attendance_percentage(10, 2), 80);
        // 2/3 attended -> 66.66..% -> 66
        assert_eq!(attendance_percentage(3, 1), 66);
        assert_eq!(attendance_percentage(8, 8), 0);
    }

    #[test]
    fn standing_thresholds() {
        assert_eq!(grade_standing(&[]), GradeStanding::InProgress);
        assert_eq!(grade_standing(&[dec(60, 1)]), GradeStanding::Approved);
        assert_eq!(
            grade_standing(&[dec(50, 1), dec(65, 1)]),
            GradeStanding::Recovery
        );

        assert_eq!(attendance_standing(100), AttendanceStanding::Excellent);
        assert_eq!(attendance_standing(75), AttendanceStanding::Regular);
        assert_eq!(attendance_standing(74), AttendanceStanding::Warning);
    }
}
