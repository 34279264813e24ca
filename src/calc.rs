use serde::Serialize;

/// Letter grades, best to worst. `letter_grade` only ever returns one of these.
#[allow(dead_code)]
pub const GRADE_LABELS: [&str; 5] = ["A+", "A", "B", "C", "Fail"];

/// One-decimal display rounding for attendance percentages.
pub fn round_off_1_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn subject_average(maths: f64, science: f64, english: f64) -> f64 {
    (maths + science + english) / 3.0
}

/// Step function over the subject average. Total over all of f64: NaN fails
/// every comparison and lands on "Fail", which is the accepted behavior for
/// non-numeric marks input.
pub fn letter_grade(avg: f64) -> &'static str {
    if avg >= 90.0 {
        "A+"
    } else if avg >= 80.0 {
        "A"
    } else if avg >= 70.0 {
        "B"
    } else if avg >= 60.0 {
        "C"
    } else {
        "Fail"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceBand {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: u64,
    pub absent: u64,
    pub total: u64,
    pub percent: f64,
    pub band: AttendanceBand,
}

/// Zero recorded days is 0%, which deliberately lands in the critical band.
pub fn attendance_summary(present: u64, absent: u64) -> AttendanceSummary {
    let total = present + absent;
    let percent = if total == 0 {
        0.0
    } else {
        round_off_1_decimal(present as f64 / total as f64 * 100.0)
    };
    let band = if percent >= 75.0 {
        AttendanceBand::Good
    } else if percent >= 50.0 {
        AttendanceBand::Warning
    } else {
        AttendanceBand::Critical
    };
    AttendanceSummary {
        present,
        absent,
        total,
        percent,
        band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_band_boundaries() {
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.9), "A");
        assert_eq!(letter_grade(80.0), "A");
        assert_eq!(letter_grade(70.0), "B");
        assert_eq!(letter_grade(60.0), "C");
        assert_eq!(letter_grade(59.9), "Fail");
        assert_eq!(letter_grade(0.0), "Fail");
    }

    #[test]
    fn grade_is_always_one_of_the_fixed_labels() {
        for avg in [-5.0, 0.0, 42.5, 60.0, 74.99, 88.0, 100.0, 1000.0] {
            assert!(GRADE_LABELS.contains(&letter_grade(avg)));
        }
    }

    #[test]
    fn nan_average_falls_through_to_fail() {
        assert_eq!(letter_grade(f64::NAN), "Fail");
        assert_eq!(letter_grade(subject_average(95.0, f64::NAN, 90.0)), "Fail");
    }

    #[test]
    fn marks_scenario_average_90_is_a_plus() {
        let avg = subject_average(95.0, 85.0, 90.0);
        assert_eq!(avg, 90.0);
        assert_eq!(letter_grade(avg), "A+");
    }

    #[test]
    fn zero_total_attendance_is_critical_at_zero_percent() {
        let s = attendance_summary(0, 0);
        assert_eq!(s.total, 0);
        assert_eq!(s.percent, 0.0);
        assert_eq!(s.band, AttendanceBand::Critical);
    }

    #[test]
    fn attendance_band_thresholds() {
        // 3 of 4 days: exactly 75.0, the lower edge of "good".
        let s = attendance_summary(3, 1);
        assert_eq!(s.total, 4);
        assert_eq!(s.percent, 75.0);
        assert_eq!(s.band, AttendanceBand::Good);

        assert_eq!(attendance_summary(1, 1).band, AttendanceBand::Warning);
        assert_eq!(attendance_summary(1, 2).band, AttendanceBand::Critical);
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        // 2 of 3 days = 66.666... -> 66.7
        assert_eq!(attendance_summary(2, 1).percent, 66.7);
        assert_eq!(round_off_1_decimal(33.333), 33.3);
        assert_eq!(round_off_1_decimal(33.35), 33.4);
    }
}
