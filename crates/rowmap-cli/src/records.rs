//! Country and City records
//!
//! Both serialize with serde so the same structs read seed files and write
//! `list --json` output.

use rowmap_core::model::{Column, Record, Row, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Country {
    pub code: String,
    pub name: String,
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct City {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub country_code: String,
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
