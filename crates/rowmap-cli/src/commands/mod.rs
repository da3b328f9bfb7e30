pub mod demo;
pub mod list;
pub mod seed;

use crate::records::{City, Country};
use rowmap_store::{DbMap, StoreConfig};
use std::path::PathBuf;

/// Store selection shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

impl StoreOptions {
    /// Config file values, with `--db` taking precedence over `path`
    pub fn resolve(&self) -> rowmap_store::Result<StoreConfig> {
        let mut config = match &self.config {
            Some(file) => StoreConfig::load(file)?,
            None => StoreConfig::default(),
        };
        if let Some(db) = &self.db {
            config.path = db.to_string_lossy().into_owned();
        }
        Ok(config)
    }
}

/// Open the store and make sure Country and City exist
pub fn open_world(config: &StoreConfig) -> rowmap_store::Result<DbMap> {
    let mut db = DbMap::open(config)?;
    db.add_table::<Country>().set_keys(false, &["code"])?;
    db.add_table::<City>().set_keys(false, &["code"])?;
    db.create_tables_if_not_exists()?;
    Ok(db)
}
