//! Table registry
//!
//! Maps record types to their registered `TableMap`, keeping registration
//! order so tables are created in that order and dropped in reverse.

use crate::errors::Result;
use rowmap_core::errors::{ExError, MapError};
use rowmap_core::model::{Record, TableMap};
use std::any::{type_name, TypeId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: Vec<TableMap>,
    by_type: HashMap<TypeId, usize>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `R` under `name`; re-registering a type renames and returns
    /// its existing mapping.
    pub fn register<R: Record>(&mut self, name: &str) -> &mut TableMap {
        let idx = match self.by_type.get(&TypeId::of::<R>()) {
            Some(&idx) => {
                self.tables[idx].set_name(name);
                idx
            }
            None => {
                self.tables.push(TableMap::new(name, R::COLUMNS));
                let idx = self.tables.len() - 1;
                self.by_type.insert(TypeId::of::<R>(), idx);
                idx
            }
        };
        &mut self.tables[idx]
    }

    /// The mapping registered for `R`
    pub fn table<R: Record>(&self) -> Result<&TableMap> {
        self.by_type
            .get(&TypeId::of::<R>())
            .map(|&idx| &self.tables[idx])
            .ok_or_else(|| {
                ExError::from(MapError::UnregisteredTable {
                    type_name: type_name::<R>().to_string(),
                })
            })
    }

    pub fn tables(&self) -> &[TableMap] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
