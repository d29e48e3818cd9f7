use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use gdm_core::models::{FoodDiaryEntry, Measurement, UserProfile, format_date};

/// Exit code for "nothing to show yet" (no profile, empty day).
pub(crate) const EXIT_EMPTY: i32 = 2;

/// Resolve an optional date argument: `DD.MM.YYYY`, `today`, `yesterday`,
/// `tomorrow`, or nothing (today).
pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match date_str.as_deref() {
        None | Some("today") => Ok(today),
        Some("yesterday") => Ok(today - chrono::Duration::days(1)),
        Some("tomorrow") => Ok(today + chrono::Duration::days(1)),
        Some(s) => Ok(gdm_core::validate::parse_date(s)?),
    }
}

/// Today's date or a resolved keyword, formatted for the validation boundary.
pub(crate) fn date_field(date_str: Option<String>) -> Result<String> {
    parse_date(date_str).map(format_date)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn no_neg_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

/// `YYYY-MM-DDTHH:MM:SS` part of an RFC 3339 timestamp.
pub(crate) fn saved_at(created_at: &str) -> &str {
    created_at.get(..19).unwrap_or(created_at)
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub(crate) fn print_profile_table(profiles: &[UserProfile]) {
    #[derive(Tabled)]
    struct ProfileRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Age")]
        age: i64,
        #[tabled(rename = "Weight (kg)")]
        weight: String,
        #[tabled(rename = "Height (cm)")]
        height: String,
        #[tabled(rename = "Due date")]
        due: String,
        #[tabled(rename = "Saved")]
        saved: String,
    }

    let rows: Vec<ProfileRow> = profiles
        .iter()
        .map(|p| ProfileRow {
            id: p.id,
            age: p.age,
            weight: format!("{:.1}", p.weight_kg),
            height: format!("{:.1}", p.height_cm),
            due: format_date(p.pregnancy_due_date),
            saved: saved_at(&p.created_at).to_string(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_measurement_table(measurements: &[Measurement]) {
    #[derive(Tabled)]
    struct VitalsRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "BP (mmHg)")]
        bp: String,
        #[tabled(rename = "Pulse")]
        pulse: i64,
        #[tabled(rename = "Water (ml)")]
        water: i64,
        #[tabled(rename = "Activity")]
        activity: &'static str,
    }

    let rows: Vec<VitalsRow> = measurements
        .iter()
        .map(|m| VitalsRow {
            id: m.id,
            bp: format!("{}/{}", m.systolic_bp, m.diastolic_bp),
            pulse: m.pulse,
            water: m.water_ml,
            activity: yes_no(m.activity),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_food_entry_table(entries: &[FoodDiaryEntry]) {
    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Product")]
        product: String,
        #[tabled(rename = "Grams")]
        grams: i64,
        #[tabled(rename = "kcal")]
        calories: String,
    }

    let rows: Vec<FoodRow> = entries
        .iter()
        .map(|e| FoodRow {
            id: e.id,
            product: truncate(&e.product_name, 35),
            grams: e.grams,
            calories: {
                let cal = no_neg_zero(e.calories);
                format!("{cal:.0}")
            },
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
