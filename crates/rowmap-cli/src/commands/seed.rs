//! Seed import command
//!
//! Usage: rowmap seed import <FILE> [--db PATH] [--config FILE]
//!
//! ```yaml
//! countries:
//!   - { code: PT, name: Portugal }
//! cities:
//!   - { code: LIS, name: Lisbon, country_code: PT }
//! ```

use super::{open_world, StoreOptions};
use crate::records::{City, Country};
use clap::{Args, Subcommand};
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rowmap_store::errors::{io_error, yaml_error};
use rowmap_store::SqlExecutor;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file into the database
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file
    pub path: PathBuf,
}

/// Contents of a seed file
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedFile {
    pub countries: Vec<Country>,
    pub cities: Vec<City>,
}

impl SeedFile {
    pub fn load(path: &Path) -> rowmap_store::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| io_error("seed_load", e))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> rowmap_store::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| yaml_error("seed_load", e))
    }

    /// Reject empty and repeated codes before anything is written
    pub fn validate(&self) -> Result<(), String> {
        check_codes("country", self.countries.iter().map(|c| c.code.as_str()))?;
        check_codes("city", self.cities.iter().map(|c| c.code.as_str()))
    }
}

fn check_codes<'a>(kind: &str, codes: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for code in codes {
        if code.trim().is_empty() {
            return Err(format!("{} with empty code", kind));
        }
        if !seen.insert(code) {
            return Err(format!("duplicate {} code: {}", kind, code));
        }
    }
    Ok(())
}

/// Execute seed command
pub fn execute(args: SeedArgs, store: &StoreOptions) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, store),
    }
}

/// Execute seed import
fn execute_import(args: ImportArgs, store: &StoreOptions) -> Result<(), Box<dyn std::error::Error>> {
    println!("Importing {}...", args.path.display());

    let seed = SeedFile::load(&args.path)?;
    seed.validate()?;

    let config = store.resolve()?;
    let mut db = open_world(&config)?;

    log_op_start!("seed_import", path = config.path.as_str());
    let start = Instant::now();

    // All-or-nothing: an error drops the transaction, which rolls back
    let tx = db.begin()?;
    let written = seed
        .countries
        .into_iter()
        .try_for_each(|mut c| tx.insert(&mut c))
        .and_then(|()| {
            seed.cities
                .into_iter()
                .try_for_each(|mut c| tx.insert(&mut c))
        });
    if let Err(err) = written {
        log_op_error!(
            "seed_import",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        return Err(err.into());
    }
    tx.commit()?;

    log_op_end!(
        "seed_import",
        duration_ms = start.elapsed().as_millis() as u64
    );
    println!("✓ Imported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_file() {
        let seed = SeedFile::from_yaml_str(
            "countries:\n  - { code: PT, name: Portugal }\ncities:\n  - { code: LIS, name: Lisbon, country_code: PT }\n",
        )
        .unwrap();
        assert_eq!(seed.countries.len(), 1);
        assert_eq!(seed.cities[0].country_code, "PT");
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn test_empty_seed_file() {
        assert_eq!(SeedFile::from_yaml_str("").unwrap(), SeedFile::default());
    }

    #[test]
    fn test_city_without_country_code() {
        let seed = SeedFile::from_yaml_str("cities:\n  - { code: XYZ, name: Nowhere }\n").unwrap();
        assert_eq!(seed.cities[0].country_code, "");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SeedFile::from_yaml_str("planets: []\n").unwrap_err();
        assert_eq!(err.code(), "ERR_SERIALIZATION");
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let seed = SeedFile::from_yaml_str(
            "countries:\n  - { code: PT, name: Portugal }\n  - { code: PT, name: Portugal }\n",
        )
        .unwrap();
        assert_eq!(seed.validate().unwrap_err(), "duplicate country code: PT");
    }

    #[test]
    fn test_same_code_in_both_tables_allowed() {
        let seed = SeedFile::from_yaml_str(
            "countries:\n  - { code: SP, name: Spain }\ncities:\n  - { code: SP, name: Sao Paulo, country_code: BR }\n",
        )
        .unwrap();
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn test_empty_code_rejected() {
        let seed = SeedFile::from_yaml_str("cities:\n  - { code: '', name: Blank }\n").unwrap();
        assert!(seed.validate().is_err());
    }
}
