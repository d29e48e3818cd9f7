use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day-granularity date format used for storage and display (`31.12.2024`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Serialize `NaiveDate` fields as `dd.mm.yyyy` strings.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(super::DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDate::parse_from_str(&s, super::DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// --- Profile ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub uuid: String,
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(with = "date_format")]
    pub pregnancy_due_date: NaiveDate,
    pub created_at: String,
}

/// Input for a profile save. The last menstrual period is only used to derive
/// the due date and is never stored.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub last_menstrual_period: NaiveDate,
}

// --- Vitals ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    pub uuid: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub systolic_bp: i64,
    pub diastolic_bp: i64,
    pub pulse: i64,
    pub water_ml: i64,
    pub activity: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub date: NaiveDate,
    pub systolic_bp: i64,
    pub diastolic_bp: i64,
    pub pulse: i64,
    pub water_ml: i64,
    pub activity: bool,
}

// --- Food diary ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDiaryEntry {
    pub id: i64,
    pub uuid: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub product_name: String,
    pub grams: i64,
    pub calories: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodEntry {
    pub date: NaiveDate,
    pub product_name: String,
    pub grams: i64,
}

/// Row to append once calories have been resolved against the catalog.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedFoodEntry<'a> {
    pub date: NaiveDate,
    pub product_name: &'a str,
    pub grams: i64,
    pub calories: f64,
}

// --- Derived views ---

/// Everything recorded for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyDiary {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub measurements: Vec<Measurement>,
    pub food_entries: Vec<FoodDiaryEntry>,
    pub total_calories: f64,
    pub total_water_ml: i64,
}

impl DailyDiary {
    #[must_use]
    pub fn new(
        date: NaiveDate,
        measurements: Vec<Measurement>,
        food_entries: Vec<FoodDiaryEntry>,
    ) -> Self {
        let total_calories = food_entries.iter().map(|e| e.calories).sum();
        let total_water_ml = measurements
            .iter()
            .fold(0_i64, |acc, m| acc.saturating_add(m.water_ml));
        Self {
            date,
            measurements,
            food_entries,
            total_calories,
            total_water_ml,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty() && self.food_entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub profile_id: i64,
    pub target_heart_rate: i64,
    pub bmi: f64,
    #[serde(with = "date_format")]
    pub pregnancy_due_date: NaiveDate,
}
