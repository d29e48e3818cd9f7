//! Static food calorie table.
//!
//! Loaded once at start-up from JSON (the default) or CSV and never mutated
//! afterwards. Lookups are exact and case-sensitive.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The table shipped with the app.
const BUILTIN_FOODS_JSON: &str = include_str!("../data/foods.json");

/// One record of the catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(alias = "calories")]
    pub calories_per_100g: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: HashMap<String, f64>,
}

impl FoodCatalog {
    /// Load from a file. `.csv` files are read as CSV with a
    /// `name,calories_per_100g` header; anything else is read as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let file = std::fs::File::open(path)
            .map_err(|e| Error::CatalogLoad(format!("{}: {e}", path.display())))?;

        let catalog = if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
        .map_err(|e| match e {
            Error::CatalogLoad(msg) => Error::CatalogLoad(format!("{}: {msg}", path.display())),
            other => other,
        })?;

        tracing::info!(path = %path.display(), foods = catalog.len(), "food catalog loaded");
        Ok(catalog)
    }

    /// The bundled default table.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_FOODS_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| Error::CatalogLoad(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_reader(reader).map_err(|e| Error::CatalogLoad(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (line_num, record) in rdr.deserialize::<CatalogEntry>().enumerate() {
            let entry = record
                .map_err(|e| Error::CatalogLoad(format!("row {}: {e}", line_num + 2)))?;
            entries.push(entry);
        }
        Self::from_entries(entries)
    }

    /// Build from already-parsed records. Names must be unique and calorie
    /// values finite and non-negative.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut foods = HashMap::new();
        for entry in entries {
            if entry.name.trim().is_empty() {
                return Err(Error::CatalogLoad("food with an empty name".to_string()));
            }
            if !entry.calories_per_100g.is_finite() || entry.calories_per_100g < 0.0 {
                return Err(Error::CatalogLoad(format!(
                    "'{}' has invalid calories ({})",
                    entry.name, entry.calories_per_100g
                )));
            }
            if foods
                .insert(entry.name.clone(), entry.calories_per_100g)
                .is_some()
            {
                return Err(Error::CatalogLoad(format!(
                    "duplicate food name '{}'",
                    entry.name
                )));
            }
        }
        if foods.is_empty() {
            return Err(Error::CatalogLoad("catalog is empty".to_string()));
        }
        Ok(Self { foods })
    }

    /// Calories per 100 g for an exact product name.
    pub fn lookup(&self, name: &str) -> Result<f64> {
        self.foods
            .get(name)
            .copied()
            .ok_or_else(|| Error::ProductNotFound(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.foods.contains_key(name)
    }

    /// Product names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.foods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All records, sorted by name.
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.names()
            .into_iter()
            .map(|name| CatalogEntry {
                name: name.to_string(),
                calories_per_100g: self.foods[name],
            })
            .collect()
    }

    /// Case-insensitive substring search over names, for pickers only.
    /// Logging still requires the exact name.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CatalogEntry> {
        let needle = query.to_lowercase();
        self.entries()
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
