use std::path::Path;

use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    DATE_FORMAT, FoodDiaryEntry, Measurement, NewMeasurement, ResolvedFoodEntry, UserProfile,
    format_date,
};

const SCHEMA_VERSION: i64 = 1;

/// The single SQLite handle for the process.
///
/// Constructed once at start-up and handed to [`crate::service::GdmService`].
/// Every write runs in its own transaction. Rows are append-only: there are
/// no update or delete statements.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.migrate()?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    age INTEGER NOT NULL,
                    weight REAL NOT NULL,
                    height REAL NOT NULL,
                    pregnancy_date TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS measurements (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    date TEXT NOT NULL,
                    bp_sys INTEGER NOT NULL,
                    bp_dia INTEGER NOT NULL,
                    pulse INTEGER NOT NULL,
                    water INTEGER NOT NULL,
                    activity BOOLEAN NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS food_diary (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    date TEXT NOT NULL,
                    product TEXT NOT NULL,
                    grams INTEGER NOT NULL,
                    calories REAL NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_measurements_date ON measurements(date);
                CREATE INDEX IF NOT EXISTS idx_food_diary_date ON food_diary(date);",
            )?;
            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(())
    }

    // --- Row mapping helpers ---

    fn parse_stored_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    }

    // Expects columns:
    // 0: id, 1: uuid, 2: age, 3: weight, 4: height, 5: pregnancy_date, 6: created_at
    fn profile_from_row(row: &rusqlite::Row) -> rusqlite::Result<UserProfile> {
        let due: String = row.get(5)?;
        Ok(UserProfile {
            id: row.get(0)?,
            uuid: row.get(1)?,
            age: row.get(2)?,
            weight_kg: row.get(3)?,
            height_cm: row.get(4)?,
            pregnancy_due_date: Self::parse_stored_date(5, &due)?,
            created_at: row.get(6)?,
        })
    }

    // Expects columns:
    // 0: id, 1: uuid, 2: date, 3: bp_sys, 4: bp_dia, 5: pulse, 6: water,
    // 7: activity, 8: created_at
    fn measurement_from_row(row: &rusqlite::Row) -> rusqlite::Result<Measurement> {
        let date: String = row.get(2)?;
        Ok(Measurement {
            id: row.get(0)?,
            uuid: row.get(1)?,
            date: Self::parse_stored_date(2, &date)?,
            systolic_bp: row.get(3)?,
            diastolic_bp: row.get(4)?,
            pulse: row.get(5)?,
            water_ml: row.get(6)?,
            activity: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    // Expects columns:
    // 0: id, 1: uuid, 2: date, 3: product, 4: grams, 5: calories, 6: created_at
    fn food_entry_from_row(row: &rusqlite::Row) -> rusqlite::Result<FoodDiaryEntry> {
        let date: String = row.get(2)?;
        Ok(FoodDiaryEntry {
            id: row.get(0)?,
            uuid: row.get(1)?,
            date: Self::parse_stored_date(2, &date)?,
            product_name: row.get(3)?,
            grams: row.get(4)?,
            calories: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    // --- Profiles ---

    pub fn insert_profile(
        &self,
        age: i64,
        weight_kg: f64,
        height_cm: f64,
        pregnancy_due_date: NaiveDate,
    ) -> Result<UserProfile> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO users (uuid, age, weight, height, pregnancy_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uuid,
                age,
                weight_kg,
                height_cm,
                format_date(pregnancy_due_date),
                now
            ],
        )?;
        let id = tx.last_insert_rowid();
        let profile = tx.query_row(
            "SELECT id, uuid, age, weight, height, pregnancy_date, created_at
             FROM users WHERE id = ?1",
            params![id],
            Self::profile_from_row,
        )?;
        tx.commit()?;
        tracing::debug!(id, "profile appended");
        Ok(profile)
    }

    /// Most recently appended profile, by insertion order.
    pub fn latest_profile(&self) -> Result<Option<UserProfile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT id, uuid, age, weight, height, pregnancy_date, created_at
                 FROM users ORDER BY id DESC LIMIT 1",
                [],
                Self::profile_from_row,
            )
            .optional()?;
        Ok(profile)
    }

    /// Newest first.
    pub fn get_profile_history(&self, limit: Option<i64>) -> Result<Vec<UserProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, age, weight, height, pregnancy_date, created_at
             FROM users ORDER BY id DESC LIMIT ?1",
        )?;
        // SQLite treats a negative LIMIT as "no limit"
        let profiles = stmt
            .query_map(params![limit.unwrap_or(-1)], Self::profile_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(profiles)
    }

    // --- Measurements ---

    pub fn insert_measurement(&self, m: &NewMeasurement) -> Result<Measurement> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO measurements (uuid, date, bp_sys, bp_dia, pulse, water, activity, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                uuid,
                format_date(m.date),
                m.systolic_bp,
                m.diastolic_bp,
                m.pulse,
                m.water_ml,
                m.activity,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let measurement = tx.query_row(
            "SELECT id, uuid, date, bp_sys, bp_dia, pulse, water, activity, created_at
             FROM measurements WHERE id = ?1",
            params![id],
            Self::measurement_from_row,
        )?;
        tx.commit()?;
        tracing::debug!(id, date = %m.date, "measurement appended");
        Ok(measurement)
    }

    pub fn get_measurement(&self, id: i64) -> Result<Measurement> {
        self.conn
            .query_row(
                "SELECT id, uuid, date, bp_sys, bp_dia, pulse, water, activity, created_at
                 FROM measurements WHERE id = ?1",
                params![id],
                Self::measurement_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Measurement {id}")))
    }

    pub fn get_measurements_for_date(&self, date: NaiveDate) -> Result<Vec<Measurement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, date, bp_sys, bp_dia, pulse, water, activity, created_at
             FROM measurements WHERE date = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![format_date(date)], Self::measurement_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // --- Food diary ---

    pub(crate) fn insert_food_entry(&self, entry: &ResolvedFoodEntry<'_>) -> Result<FoodDiaryEntry> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO food_diary (uuid, date, product, grams, calories, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uuid,
                format_date(entry.date),
                entry.product_name,
                entry.grams,
                entry.calories,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let row = tx.query_row(
            "SELECT id, uuid, date, product, grams, calories, created_at
             FROM food_diary WHERE id = ?1",
            params![id],
            Self::food_entry_from_row,
        )?;
        tx.commit()?;
        tracing::debug!(id, product = entry.product_name, calories = entry.calories, "food entry appended");
        Ok(row)
    }

    pub fn get_food_entries_for_date(&self, date: NaiveDate) -> Result<Vec<FoodDiaryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, date, product, grams, calories, created_at
             FROM food_diary WHERE date = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![format_date(date)], Self::food_entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
