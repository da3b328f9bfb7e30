//! List command
//!
//! Usage: rowmap list countries|cities [--code CODE]... [--json]

use super::{open_world, StoreOptions};
use crate::records::{City, Country};
use clap::{Args, ValueEnum};
use rowmap_core::{question_marks, Record, Value};
use rowmap_store::SqlExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Table {
    Countries,
    Cities,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Table to list
    #[arg(value_enum)]
    pub table: Table,

    /// Only rows with this code (repeatable)
    #[arg(long = "code")]
    pub codes: Vec<String>,

    /// Print a JSON array instead of one line per row
    #[arg(long)]
    pub json: bool,
}

/// `select * from <table> [where code in (?,..)] order by code`
pub fn list_query(table: &str, codes: &[String]) -> (String, Vec<Value>) {
    let filter = if codes.is_empty() {
        String::new()
    } else {
        format!(" where code in ({})", question_marks(codes.len()))
    };
    let sql = format!("select * from {}{} order by code", table, filter);
    let args = codes.iter().map(Value::from).collect();
    (sql, args)
}

/// Execute list command
pub fn execute(args: ListArgs, store: &StoreOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = store.resolve()?;
    let db = open_world(&config)?;

    match args.table {
        Table::Countries => {
            let (sql, params) = list_query(Country::TABLE, &args.codes);
            let countries: Vec<Country> = db.select(&sql, &params)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&countries)?);
            } else {
                for c in &countries {
                    println!("{}\t{}", c.code, c.name);
                }
            }
        }
        Table::Cities => {
            let (sql, params) = list_query(City::TABLE, &args.codes);
            let cities: Vec<City> = db.select(&sql, &params)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&cities)?);
            } else {
                for c in &cities {
                    println!("{}\t{}\t{}", c.code, c.name, c.country_code);
                }
            }
        }
    }

    Ok(())
}
