use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use gdm_core::GdmService;

use super::helpers::{EXIT_EMPTY, print_json, truncate};

pub(crate) fn cmd_foods(svc: &GdmService, search: Option<&str>, json: bool) -> Result<()> {
    let catalog = svc.catalog();
    let foods = match search {
        Some(q) => catalog.search(q),
        None => catalog.entries(),
    };

    if json {
        return print_json(&foods);
    }

    if foods.is_empty() {
        eprintln!("No foods match '{}'", search.unwrap_or_default());
        process::exit(EXIT_EMPTY);
    }

    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Cal/100g")]
        calories: String,
    }

    let rows: Vec<FoodRow> = foods
        .iter()
        .enumerate()
        .map(|(i, f)| FoodRow {
            idx: i + 1,
            name: truncate(&f.name, 40),
            calories: {
                let cal = f.calories_per_100g;
                format!("{cal:.0}")
            },
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}
