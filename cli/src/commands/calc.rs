use anyhow::Result;

use gdm_core::calculator::{compute_bmi, estimate_due_date_str, target_heart_rate};
use gdm_core::models::format_date;
use gdm_core::validate::{parse_int, parse_real};

pub(crate) fn cmd_calc_bmi(weight: &str, height: &str) -> Result<()> {
    let weight = parse_real("weight", weight)?;
    let height = parse_real("height", height)?;
    let bmi = compute_bmi(weight, height)?;
    println!("{bmi:.2}");
    Ok(())
}

pub(crate) fn cmd_calc_due_date(last_period: &str) -> Result<()> {
    let due = estimate_due_date_str(last_period)?;
    println!("{}", format_date(due));
    Ok(())
}

pub(crate) fn cmd_calc_heart_rate(age: &str) -> Result<()> {
    let age = parse_int("age", age)?;
    println!("{}", target_heart_rate(age));
    Ok(())
}
