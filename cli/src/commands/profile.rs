use anyhow::Result;
use std::process;

use gdm_core::models::format_date;
use gdm_core::validate::ProfileForm;
use gdm_core::{Error, GdmService};

use super::helpers::{EXIT_EMPTY, json_error, print_json, print_profile_table};

pub(crate) fn cmd_profile_save(
    svc: &GdmService,
    last_period: &str,
    age: &str,
    weight: &str,
    height: &str,
    json: bool,
) -> Result<()> {
    let form = ProfileForm {
        last_period,
        age,
        weight_kg: weight,
        height_cm: height,
    };
    let profile = svc.save_profile(&form.parse()?)?;

    if json {
        print_json(&profile)?;
    } else {
        println!(
            "Saved profile {}: age {}, {:.1} kg, {:.1} cm",
            profile.id, profile.age, profile.weight_kg, profile.height_cm
        );
        println!(
            "  Estimated due date: {}",
            format_date(profile.pregnancy_due_date)
        );
    }

    Ok(())
}

pub(crate) fn cmd_profile_show(svc: &GdmService, json: bool) -> Result<()> {
    let profile = match svc.latest_profile() {
        Ok(p) => p,
        Err(Error::NotFound(_)) => no_profile(json),
        Err(e) => return Err(e.into()),
    };

    if json {
        print_json(&profile)?;
    } else {
        print_profile_table(std::slice::from_ref(&profile));
    }

    Ok(())
}

pub(crate) fn cmd_profile_history(svc: &GdmService, limit: Option<u32>, json: bool) -> Result<()> {
    let profiles = svc.profile_history(limit.map(i64::from))?;

    if json {
        print_json(&profiles)?;
    } else if profiles.is_empty() {
        no_profile(false);
    } else {
        print_profile_table(&profiles);
    }

    Ok(())
}

pub(super) fn no_profile(json: bool) -> ! {
    let message = "No health profile saved yet. Use `gdm profile save` first.";
    if json {
        println!("{}", json_error(message));
    } else {
        eprintln!("{message}");
    }
    process::exit(EXIT_EMPTY);
}
