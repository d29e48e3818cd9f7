mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    cmd_calc_bmi, cmd_calc_due_date, cmd_calc_heart_rate, cmd_diary_food, cmd_diary_show,
    cmd_diary_vitals, cmd_foods, cmd_profile_history, cmd_profile_save, cmd_profile_show,
    cmd_recommend,
};
use crate::config::Config;
use gdm_core::GdmService;

#[derive(Parser)]
#[command(
    name = "gdm",
    version,
    about = "Gestational diabetes self-monitoring: health profile, daily diary, recommendations"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Food catalog file (.json or .csv) to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Health profile: age, weight, height, due date
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Daily diary: vitals and food
    Diary {
        #[command(subcommand)]
        command: DiaryCommands,
    },
    /// List products in the food catalog
    Foods {
        /// Filter by name (case-insensitive substring)
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recommendations derived from the latest profile
    Recommend {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a calculator without saving anything
    Calc {
        #[command(subcommand)]
        command: CalcCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Save a new profile snapshot (the due date is derived)
    Save {
        /// First day of the last menstrual period (DD.MM.YYYY)
        #[arg(long)]
        last_period: String,
        /// Age in years
        #[arg(long)]
        age: String,
        /// Weight in kg
        #[arg(long)]
        weight: String,
        /// Height in cm
        #[arg(long)]
        height: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the latest profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show saved profiles, newest first
    History {
        /// Number of profiles to show (default: all)
        #[arg(short = 'n', long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum DiaryCommands {
    /// Record blood pressure, pulse, water and activity
    Vitals {
        /// Systolic blood pressure (mmHg)
        #[arg(long)]
        systolic: String,
        /// Diastolic blood pressure (mmHg)
        #[arg(long)]
        diastolic: String,
        /// Pulse (beats per minute)
        #[arg(long)]
        pulse: String,
        /// Water intake (ml)
        #[arg(long)]
        water: String,
        /// Physical activity today: yes or no
        #[arg(long, default_value = "no")]
        activity: String,
        /// Date (DD.MM.YYYY or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a food by exact catalog name
    Food {
        /// Product name as listed by `gdm foods`
        product: String,
        /// Amount in grams (e.g. "200" or "200g")
        grams: String,
        /// Date (DD.MM.YYYY or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show everything recorded for a day (default: today)
    Show {
        /// Date (DD.MM.YYYY or today/yesterday)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CalcCommands {
    /// Body mass index
    Bmi {
        /// Weight in kg
        weight: String,
        /// Height in cm
        height: String,
    },
    /// Estimated due date from the last menstrual period
    DueDate {
        /// First day of the last menstrual period (DD.MM.YYYY)
        last_period: String,
    },
    /// Target heart rate for an age
    HeartRate {
        /// Age in years
        age: String,
    },
}

fn main() {
    let cli = Cli::parse();

    gdm_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Calculators touch neither the catalog nor the database
        Commands::Calc { command } => run_calc(command),
        Commands::Profile { command } => {
            let svc = open_service(cli.catalog.as_deref())?;
            match command {
                ProfileCommands::Save {
                    last_period,
                    age,
                    weight,
                    height,
                    json,
                } => cmd_profile_save(&svc, &last_period, &age, &weight, &height, json),
                ProfileCommands::Show { json } => cmd_profile_show(&svc, json),
                ProfileCommands::History { limit, json } => {
                    cmd_profile_history(&svc, limit, json)
                }
            }
        }
        Commands::Diary { command } => {
            let svc = open_service(cli.catalog.as_deref())?;
            match command {
                DiaryCommands::Vitals {
                    systolic,
                    diastolic,
                    pulse,
                    water,
                    activity,
                    date,
                    json,
                } => cmd_diary_vitals(
                    &svc, &systolic, &diastolic, &pulse, &water, &activity, date, json,
                ),
                DiaryCommands::Food {
                    product,
                    grams,
                    date,
                    json,
                } => cmd_diary_food(&svc, &product, &grams, date, json),
                DiaryCommands::Show { date, json } => cmd_diary_show(&svc, date, json),
            }
        }
        Commands::Foods { search, json } => {
            let svc = open_service(cli.catalog.as_deref())?;
            cmd_foods(&svc, search.as_deref(), json)
        }
        Commands::Recommend { json } => {
            let svc = open_service(cli.catalog.as_deref())?;
            cmd_recommend(&svc, json)
        }
    }
}

fn open_service(catalog_override: Option<&Path>) -> Result<GdmService> {
    let config = Config::load()?;
    let catalog = Arc::new(config.load_catalog(catalog_override)?);
    Ok(GdmService::open(
        &config.db_path,
        catalog,
        config.validation,
    )?)
}

fn run_calc(command: CalcCommands) -> Result<()> {
    match command {
        CalcCommands::Bmi { weight, height } => cmd_calc_bmi(&weight, &height),
        CalcCommands::DueDate { last_period } => cmd_calc_due_date(&last_period),
        CalcCommands::HeartRate { age } => cmd_calc_heart_rate(&age),
    }
}
