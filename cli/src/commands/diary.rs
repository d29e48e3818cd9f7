use anyhow::Result;
use std::process;

use gdm_core::GdmService;
use gdm_core::models::format_date;
use gdm_core::validate::{FoodForm, MeasurementForm};

use super::helpers::{
    EXIT_EMPTY, date_field, no_neg_zero, parse_date, print_food_entry_table, print_json,
    print_measurement_table, yes_no,
};

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_diary_vitals(
    svc: &GdmService,
    systolic: &str,
    diastolic: &str,
    pulse: &str,
    water: &str,
    activity: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = date_field(date)?;
    let form = MeasurementForm {
        date: &date,
        systolic_bp: systolic,
        diastolic_bp: diastolic,
        pulse,
        water_ml: water,
        activity,
    };
    let m = svc.record_measurement(&form.parse()?)?;

    if json {
        print_json(&m)?;
    } else {
        println!(
            "Recorded vitals [{}] for {}: BP {}/{}, pulse {}, water {} ml, activity {}",
            m.id,
            format_date(m.date),
            m.systolic_bp,
            m.diastolic_bp,
            m.pulse,
            m.water_ml,
            yes_no(m.activity)
        );
    }

    Ok(())
}

pub(crate) fn cmd_diary_food(
    svc: &GdmService,
    product: &str,
    grams: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = date_field(date)?;
    let form = FoodForm {
        date: &date,
        product_name: product,
        grams,
    };
    let entry = svc.record_food_entry(&form.parse()?)?;

    if json {
        print_json(&entry)?;
    } else {
        let cal = no_neg_zero(entry.calories);
        println!(
            "Logged [{}] {} {}g, {cal:.0} kcal for {}",
            entry.id,
            entry.product_name,
            entry.grams,
            format_date(entry.date)
        );
    }

    Ok(())
}

pub(crate) fn cmd_diary_show(svc: &GdmService, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let diary = svc.daily_diary(date)?;

    if json {
        return print_json(&diary);
    }

    let date = format_date(diary.date);
    if diary.is_empty() {
        eprintln!("No entries for {date}");
        process::exit(EXIT_EMPTY);
    }

    println!("=== {date} ===\n");

    if !diary.measurements.is_empty() {
        println!("  VITALS");
        print_measurement_table(&diary.measurements);
        println!();
    }

    if !diary.food_entries.is_empty() {
        println!("  FOOD");
        print_food_entry_table(&diary.food_entries);
        println!();
    }

    let total_cal = no_neg_zero(diary.total_calories);
    let total_water = diary.total_water_ml;
    println!("  TOTAL: {total_cal:.0} kcal | water {total_water} ml");

    Ok(())
}
