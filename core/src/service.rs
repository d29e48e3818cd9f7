use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::calculator::estimate_due_date;
use crate::catalog::FoodCatalog;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{
    DailyDiary, FoodDiaryEntry, Measurement, NewFoodEntry, NewMeasurement, NewProfile,
    Recommendations, ResolvedFoodEntry, UserProfile,
};
use crate::validate::ValidationPolicy;

/// Everything the shell may call.
///
/// Owns the database handle and a shared, read-only food catalog. Both are
/// built once at start-up and passed in.
pub struct GdmService {
    db: Database,
    catalog: Arc<FoodCatalog>,
    policy: ValidationPolicy,
}

impl GdmService {
    #[must_use]
    pub fn new(db: Database, catalog: Arc<FoodCatalog>, policy: ValidationPolicy) -> Self {
        Self {
            db,
            catalog,
            policy,
        }
    }

    pub fn open(
        db_path: &Path,
        catalog: Arc<FoodCatalog>,
        policy: ValidationPolicy,
    ) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self::new(db, catalog, policy))
    }

    pub fn new_in_memory(catalog: Arc<FoodCatalog>) -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::new(db, catalog, ValidationPolicy::default()))
    }

    #[must_use]
    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    // --- Profile ---

    /// Derive the due date and append a new profile row.
    pub fn save_profile(&self, profile: &NewProfile) -> Result<UserProfile> {
        if profile.age < 0 {
            return Err(Error::InvalidInput(format!(
                "age must not be negative (got {})",
                profile.age
            )));
        }
        if !(profile.weight_kg.is_finite() && profile.weight_kg > 0.0) {
            return Err(Error::InvalidInput(format!(
                "weight must be greater than 0 kg (got {})",
                profile.weight_kg
            )));
        }
        if !(profile.height_cm.is_finite() && profile.height_cm > 0.0) {
            return Err(Error::InvalidInput(format!(
                "height must be greater than 0 cm (got {})",
                profile.height_cm
            )));
        }
        self.policy.check_profile(profile)?;

        let due = estimate_due_date(profile.last_menstrual_period)?;
        self.db
            .insert_profile(profile.age, profile.weight_kg, profile.height_cm, due)
    }

    pub fn latest_profile(&self) -> Result<UserProfile> {
        self.db
            .latest_profile()?
            .ok_or_else(|| Error::NotFound("Profile".to_string()))
    }

    /// Saved profiles, newest first.
    pub fn profile_history(&self, limit: Option<i64>) -> Result<Vec<UserProfile>> {
        self.db.get_profile_history(limit)
    }

    // --- Diary ---

    pub fn record_measurement(&self, measurement: &NewMeasurement) -> Result<Measurement> {
        self.policy.check_measurement(measurement)?;
        self.db.insert_measurement(measurement)
    }

    /// Resolve calories against the catalog and append a food entry.
    pub fn record_food_entry(&self, entry: &NewFoodEntry) -> Result<FoodDiaryEntry> {
        if entry.grams <= 0 {
            return Err(Error::InvalidInput(format!(
                "grams must be greater than 0 (got {})",
                entry.grams
            )));
        }
        let per_100g = self.catalog.lookup(&entry.product_name)?;
        #[allow(clippy::cast_precision_loss)]
        let calories = per_100g * entry.grams as f64 / 100.0;

        self.db.insert_food_entry(&ResolvedFoodEntry {
            date: entry.date,
            product_name: &entry.product_name,
            grams: entry.grams,
            calories,
        })
    }

    pub fn get_measurement(&self, id: i64) -> Result<Measurement> {
        self.db.get_measurement(id)
    }

    pub fn measurements_on(&self, date: NaiveDate) -> Result<Vec<Measurement>> {
        self.db.get_measurements_for_date(date)
    }

    pub fn food_entries_on(&self, date: NaiveDate) -> Result<Vec<FoodDiaryEntry>> {
        self.db.get_food_entries_for_date(date)
    }

    pub fn daily_diary(&self, date: NaiveDate) -> Result<DailyDiary> {
        let measurements = self.db.get_measurements_for_date(date)?;
        let food_entries = self.db.get_food_entries_for_date(date)?;
        Ok(DailyDiary::new(date, measurements, food_entries))
    }

    // --- Recommendations ---

    pub fn recommendations(&self) -> Result<Recommendations> {
        let profile = match self.latest_profile() {
            Ok(p) => p,
            Err(Error::NotFound(_)) => return Err(Error::NoProfileAvailable),
            Err(e) => return Err(e),
        };
        Recommendations::from_profile(&profile)
    }
}
