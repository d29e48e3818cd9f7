use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use gdm_core::{FoodCatalog, ValidationPolicy};

/// Overrides the platform data directory (used by tests and portable installs).
pub const DATA_DIR_ENV: &str = "GDM_DATA_DIR";

pub struct Config {
    pub db_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub validation: ValidationPolicy,
}

/// Optional `config.toml` in the data directory.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    catalog: Option<PathBuf>,
    database: Option<PathBuf>,
    validation: ValidationPolicy,
}

impl Config {
    pub fn load() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("", "", "gdm")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let file = read_file_config(&data_dir.join("config.toml"))?;
        file.validation
            .validate()
            .context("Invalid [validation] section in config.toml")?;

        let db_path = file
            .database
            .unwrap_or_else(|| data_dir.join("gdm.db"));

        tracing::debug!(
            data_dir = %data_dir.display(),
            db = %db_path.display(),
            validation = %file.validation.mode,
            "configuration loaded"
        );

        Ok(Config {
            db_path,
            catalog_path: file.catalog,
            validation: file.validation,
        })
    }

    /// Load the food catalog once for the whole run. A configured catalog that
    /// is missing or malformed is fatal; with none configured the bundled
    /// table is used.
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<FoodCatalog> {
        match override_path.or(self.catalog_path.as_deref()) {
            Some(path) => FoodCatalog::load(path).context("Cannot start without a food catalog"),
            None => FoodCatalog::builtin().context("Bundled food catalog is corrupt"),
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdm_core::validate::ValidationMode;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = read_file_config(&dir.path().join("config.toml")).unwrap();
        assert!(cfg.catalog.is_none());
        assert!(cfg.database.is_none());
        assert_eq!(cfg.validation.mode, ValidationMode::Permissive);
    }

    #[test]
    fn test_parse_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
catalog = "/srv/foods.csv"

[validation]
mode = "physiological"
pulse = [40, 180]
"#,
        )
        .unwrap();

        let cfg = read_file_config(&path).unwrap();
        assert_eq!(cfg.catalog, Some(PathBuf::from("/srv/foods.csv")));
        assert_eq!(cfg.validation.mode, ValidationMode::Physiological);
        assert_eq!(cfg.validation.pulse, (40, 180));
        // unspecified ranges keep their defaults
        assert_eq!(cfg.validation.systolic, ValidationPolicy::default().systolic);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(read_file_config(&path).is_err());
    }

    #[test]
    fn test_catalog_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("foods.csv");
        std::fs::write(&csv, "name,calories_per_100g\nKiwi,61\n").unwrap();

        let cfg = Config {
            db_path: dir.path().join("gdm.db"),
            catalog_path: Some(dir.path().join("missing.json")),
            validation: ValidationPolicy::default(),
        };
        let catalog = cfg.load_catalog(Some(csv.as_path())).unwrap();
        assert_eq!(catalog.names(), vec!["Kiwi"]);

        assert!(cfg.load_catalog(None).is_err());
    }
}
