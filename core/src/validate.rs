//! String-to-typed coercion for everything the shell collects from the user.
//!
//! Form fields arrive as raw text. They are parsed here, once, before any core
//! operation runs. Optional physiological range checks live in
//! [`ValidationPolicy`]; by default no range is enforced.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{DATE_FORMAT, NewFoodEntry, NewMeasurement, NewProfile};

/// Parse a `dd.mm.yyyy` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDateFormat(s.to_string()))
}

pub fn parse_int(field: &str, s: &str) -> Result<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("{field}: '{s}' is not a whole number")))
}

pub fn parse_real(field: &str, s: &str) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidInput(format!("{field}: '{s}' is not a number"))),
    }
}

/// Accepts yes/no, y/n, true/false, 1/0 in any case.
pub fn parse_flag(field: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        other => Err(Error::InvalidInput(format!(
            "{field}: '{other}' is not yes/no"
        ))),
    }
}

// --- Forms ---

/// Raw health-profile form.
#[derive(Debug, Clone, Copy)]
pub struct ProfileForm<'a> {
    pub last_period: &'a str,
    pub age: &'a str,
    pub weight_kg: &'a str,
    pub height_cm: &'a str,
}

impl ProfileForm<'_> {
    pub fn parse(&self) -> Result<NewProfile> {
        Ok(NewProfile {
            last_menstrual_period: parse_date(self.last_period)?,
            age: parse_int("age", self.age)?,
            weight_kg: parse_real("weight", self.weight_kg)?,
            height_cm: parse_real("height", self.height_cm)?,
        })
    }
}

/// Raw vitals form.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementForm<'a> {
    pub date: &'a str,
    pub systolic_bp: &'a str,
    pub diastolic_bp: &'a str,
    pub pulse: &'a str,
    pub water_ml: &'a str,
    pub activity: &'a str,
}

impl MeasurementForm<'_> {
    pub fn parse(&self) -> Result<NewMeasurement> {
        Ok(NewMeasurement {
            date: parse_date(self.date)?,
            systolic_bp: parse_int("systolic", self.systolic_bp)?,
            diastolic_bp: parse_int("diastolic", self.diastolic_bp)?,
            pulse: parse_int("pulse", self.pulse)?,
            water_ml: parse_int("water", self.water_ml)?,
            activity: parse_flag("activity", self.activity)?,
        })
    }
}

/// Raw food-diary form.
#[derive(Debug, Clone, Copy)]
pub struct FoodForm<'a> {
    pub date: &'a str,
    pub product_name: &'a str,
    pub grams: &'a str,
}

impl FoodForm<'_> {
    pub fn parse(&self) -> Result<NewFoodEntry> {
        let grams = self.grams.trim();
        // "200g" is how people write it
        let grams = grams.strip_suffix('g').unwrap_or(grams);
        Ok(NewFoodEntry {
            date: parse_date(self.date)?,
            product_name: self.product_name.to_string(),
            grams: parse_int("grams", grams)?,
        })
    }
}

// --- Range policy ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Type coercion only. No physiological range checks.
    #[default]
    Permissive,
    /// Reject values outside the configured inclusive ranges.
    Physiological,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Permissive => f.write_str("permissive"),
            ValidationMode::Physiological => f.write_str("physiological"),
        }
    }
}

/// Opt-in range checks for age and vitals.
///
/// Out-of-range values are rejected with [`Error::InvalidInput`], never
/// clamped. Ranges are inclusive `(min, max)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub mode: ValidationMode,
    pub age: (i64, i64),
    pub systolic: (i64, i64),
    pub diastolic: (i64, i64),
    pub pulse: (i64, i64),
    pub water_ml: (i64, i64),
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Permissive,
            age: (12, 60),
            systolic: (60, 250),
            diastolic: (30, 150),
            pulse: (30, 220),
            water_ml: (0, 10_000),
        }
    }
}

impl ValidationPolicy {
    #[must_use]
    pub fn permissive() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn physiological() -> Self {
        Self {
            mode: ValidationMode::Physiological,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_enforced(&self) -> bool {
        self.mode == ValidationMode::Physiological
    }

    pub fn check_profile(&self, profile: &NewProfile) -> Result<()> {
        if !self.is_enforced() {
            return Ok(());
        }
        check_range("age", profile.age, self.age)
    }

    pub fn check_measurement(&self, m: &NewMeasurement) -> Result<()> {
        if !self.is_enforced() {
            return Ok(());
        }
        check_range("systolic", m.systolic_bp, self.systolic)?;
        check_range("diastolic", m.diastolic_bp, self.diastolic)?;
        check_range("pulse", m.pulse, self.pulse)?;
        check_range("water", m.water_ml, self.water_ml)
    }

    /// Reject policies whose ranges are inverted.
    pub fn validate(&self) -> Result<()> {
        for (name, (lo, hi)) in [
            ("age", self.age),
            ("systolic", self.systolic),
            ("diastolic", self.diastolic),
            ("pulse", self.pulse),
            ("water_ml", self.water_ml),
        ] {
            if lo > hi {
                return Err(Error::InvalidInput(format!(
                    "validation range for {name} is inverted ({lo} > {hi})"
                )));
            }
        }
        Ok(())
    }
}

fn check_range(field: &str, value: i64, (min, max): (i64, i64)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        tracing::warn!(field, value, min, max, "value rejected by validation policy");
        Err(Error::InvalidInput(format!(
            "{field} {value} is outside the accepted range {min}..={max}"
        )))
    }
}
