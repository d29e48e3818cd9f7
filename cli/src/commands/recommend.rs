use anyhow::Result;

use gdm_core::models::format_date;
use gdm_core::{Error, GdmService};

use super::helpers::print_json;
use super::profile::no_profile;

pub(crate) fn cmd_recommend(svc: &GdmService, json: bool) -> Result<()> {
    let rec = match svc.recommendations() {
        Ok(r) => r,
        Err(Error::NoProfileAvailable) => no_profile(json),
        Err(e) => return Err(e.into()),
    };

    if json {
        return print_json(&rec);
    }

    println!("=== Recommendations (profile {}) ===\n", rec.profile_id);
    println!("  Target heart rate: {} bpm", rec.target_heart_rate);
    println!("  BMI: {:.2}", rec.bmi);
    println!(
        "  Estimated due date: {}",
        format_date(rec.pregnancy_due_date)
    );

    Ok(())
}
