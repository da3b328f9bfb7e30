// Shared record types and setup for store integration tests

#![allow(dead_code)]

use rowmap_core::model::{Column, Record, Row, Value};
use rowmap_core::MapError;
use rowmap_store::DbMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

impl Record for Country {
    const TABLE: &'static str = "Country";
    const COLUMNS: &'static [Column] = &[Column::text("code"), Column::text("name")];

    fn to_row(&self) -> Vec<Value> {
        vec![self.code.clone().into(), self.name.clone().into()]
    }

    fn from_row(row: &Row<'_>) -> rowmap_core::Result<Self> {
        Ok(Self {
            code: row.get("code")?,
            name: row.get("name")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct City {
    pub code: String,
    pub name: String,
    pub country_code: String,
}

impl City {
    pub fn new(code: &str, name: &str, country_code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            country_code: country_code.to_string(),
        }
    }
}

impl Record for City {
    const TABLE: &'static str = "City";
    const COLUMNS: &'static [Column] = &[
        Column::text("code"),
        Column::text("name"),
        Column::text("countryCode"),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.code.clone().into(),
            self.name.clone().into(),
            self.country_code.clone().into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rowmap_core::Result<Self> {
        Ok(Self {
            code: row.get("code")?,
            name: row.get("name")?,
            country_code: row.get("countryCode")?,
        })
    }
}

/// Auto-increment key plus optimistic-lock version
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub note: Option<String>,
    pub version: i64,
}

impl Record for Account {
    const TABLE: &'static str = "Account";
    const COLUMNS: &'static [Column] = &[
        Column::integer("id"),
        Column::text("owner"),
        Column::integer("balance"),
        Column::text("note"),
        Column::integer("version"),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.owner.clone().into(),
            self.balance.into(),
            self.note.clone().into(),
            self.version.into(),
        ]
    }

    fn from_row(row: &Row<'_>) -> rowmap_core::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner: row.get("owner")?,
            balance: row.get("balance")?,
            note: row.get("note")?,
            version: row.get("version")?,
        })
    }

    fn set_column(&mut self, column: &str, value: Value) -> rowmap_core::Result<()> {
        let target = match column {
            "id" => &mut self.id,
            "version" => &mut self.version,
            other => {
                return Err(MapError::ReadOnlyColumn {
                    column: other.to_string(),
                })
            }
        };
        *target = value.as_i64().ok_or_else(|| MapError::TypeMismatch {
            column: column.to_string(),
            expected: "INTEGER",
            found: value.type_name(),
        })?;
        Ok(())
    }
}

/// In-memory map with Country and City registered and created
pub fn world_db() -> DbMap {
    let mut db = DbMap::open_in_memory().expect("open in-memory store");
    db.add_table::<Country>()
        .set_keys(false, &["Code"])
        .expect("country keys");
    db.add_table::<City>()
        .set_keys(false, &["Code"])
        .expect("city keys");
    db.create_tables_if_not_exists().expect("create tables");
    db
}

/// In-memory map with Account registered (auto-increment id, version column)
pub fn accounts_db() -> DbMap {
    let mut db = DbMap::open_in_memory().expect("open in-memory store");
    db.add_table::<Account>()
        .set_keys(true, &["id"])
        .expect("account keys")
        .set_version_column("version")
        .expect("version column");
    db.create_tables().expect("create tables");
    db
}
