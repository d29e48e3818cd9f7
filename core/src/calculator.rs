//! Health metric formulas. Pure functions, no I/O.

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::validate::parse_date;

/// Days subtracted from the last menstrual period before the week is added back.
pub const DUE_DATE_BACK_DAYS: i64 = 90;
pub const DUE_DATE_FORWARD_DAYS: i64 = 7;

/// Estimated due date from the first day of the last menstrual period.
///
/// Computed as LMP - 90 days + 7 days, in that order. This is not the usual
/// LMP + 280 days rule and may be a domain bug, but stored due dates depend on
/// it, so the two steps stay as they are.
///
/// Fails with [`Error::InvalidInput`] when either step leaves the range chrono
/// can represent.
pub fn estimate_due_date(last_menstrual_period: NaiveDate) -> Result<NaiveDate> {
    last_menstrual_period
        .checked_sub_signed(Duration::days(DUE_DATE_BACK_DAYS))
        .and_then(|d| d.checked_add_signed(Duration::days(DUE_DATE_FORWARD_DAYS)))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "last menstrual period {last_menstrual_period} is out of range"
            ))
        })
}

/// Parse a `dd.mm.yyyy` string and estimate the due date from it.
pub fn estimate_due_date_str(last_menstrual_period: &str) -> Result<NaiveDate> {
    estimate_due_date(parse_date(last_menstrual_period)?)
}

/// Body mass index, rounded to two decimals.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "height must be greater than 0 cm (got {height_cm})"
        )));
    }
    if !weight_kg.is_finite() {
        return Err(Error::InvalidInput(format!(
            "weight must be a finite number (got {weight_kg})"
        )));
    }
    let height_m = height_cm / 100.0;
    Ok(round2(weight_kg / (height_m * height_m)))
}

/// Maximal target heart rate, `220 - age`.
///
/// No clamping: any age is accepted, including 0 and negative values.
/// Range checks belong to [`crate::validate::ValidationPolicy`].
#[must_use]
pub fn target_heart_rate(age: i64) -> i64 {
    220 - age
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_date_two_step() {
        // 01.01.2024 - 90 days = 03.10.2023, + 7 days = 10.10.2023
        assert_eq!(
            estimate_due_date(date(2024, 1, 1)).unwrap(),
            date(2023, 10, 10)
        );
    }

    #[test]
    fn test_due_date_is_not_naive_280_days() {
        let lmp = date(2024, 1, 1);
        assert_ne!(estimate_due_date(lmp).unwrap(), lmp + Duration::days(280));
    }

    #[test]
    fn test_due_date_crosses_leap_day() {
        // 2024-05-29 - 90 days = 2024-02-29
        assert_eq!(
            estimate_due_date(date(2024, 5, 29)).unwrap(),
            date(2024, 3, 7)
        );
    }

    #[test]
    fn test_due_date_from_string() {
        assert_eq!(
            estimate_due_date_str("01.01.2024").unwrap(),
            date(2023, 10, 10)
        );
    }

    #[test]
    fn test_due_date_from_bad_string() {
        for bad in ["2024-01-01", "32.01.2024", "", "01/01/2024", "tomorrow"] {
            assert!(
                matches!(estimate_due_date_str(bad), Err(Error::InvalidDateFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_due_date_near_min_date_is_an_error() {
        assert!(matches!(
            estimate_due_date(NaiveDate::MIN),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            estimate_due_date_str("01.01.-262143"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bmi() {
        assert!((compute_bmi(70.0, 170.0).unwrap() - 24.22).abs() < 1e-9);
        assert!((compute_bmi(55.0, 165.0).unwrap() - 20.2).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_is_deterministic() {
        let a = compute_bmi(82.3, 168.5).unwrap();
        let b = compute_bmi(82.3, 168.5).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_bmi_zero_height() {
        assert!(matches!(compute_bmi(70.0, 0.0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_bmi_negative_or_nan_height() {
        assert!(matches!(compute_bmi(70.0, -170.0), Err(Error::InvalidInput(_))));
        assert!(matches!(compute_bmi(70.0, f64::NAN), Err(Error::InvalidInput(_))));
        assert!(matches!(
            compute_bmi(f64::INFINITY, 170.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_target_heart_rate() {
        assert_eq!(target_heart_rate(30), 190);
        assert_eq!(target_heart_rate(0), 220);
    }

    #[test]
    fn test_target_heart_rate_no_clamping() {
        assert_eq!(target_heart_rate(250), -30);
        assert_eq!(target_heart_rate(-5), 225);
    }
}
