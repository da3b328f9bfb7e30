//! Demo command
//!
//! Usage: rowmap demo [--db PATH] [--config FILE] [--trace] [--reset]
//!
//! Runs the Country/City persistence script against the store and prints
//! one line per check. The first failed check aborts with an error. A store
//! that already holds rows is left alone unless `--reset` empties it first.

use super::{open_world, StoreOptions};
use crate::records::{City, Country};
use clap::Args;
use rowmap_core::{log_op_end, log_op_start, question_marks, values, Value};
use rowmap_store::{DbMap, SqlExecutor};
use std::time::Instant;

/// Prefix used for statement tracing when `--trace` is given
pub const TRACE_PREFIX: &str = "[rowmap]";

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Trace every executed statement
    #[arg(long)]
    pub trace: bool,

    /// Empty the Country and City tables before running
    #[arg(long)]
    pub reset: bool,
}

type DemoResult = Result<(), Box<dyn std::error::Error>>;

fn check(label: &str, ok: bool) -> DemoResult {
    if !ok {
        return Err(format!("check failed: {}", label).into());
    }
    println!("✓ {}", label);
    Ok(())
}

/// Execute demo command
pub fn execute(args: DemoArgs, store: &StoreOptions) -> DemoResult {
    let mut config = store.resolve()?;
    if args.trace {
        config.trace = Some(TRACE_PREFIX.to_string());
    }

    log_op_start!("demo", path = config.path.as_str());
    let start = Instant::now();

    let mut db = open_world(&config)?;
    if args.reset {
        db.truncate_tables()?;
    } else {
        let countries = db.select_int("select count(*) from Country", &[])?;
        let cities = db.select_int("select count(*) from City", &[])?;
        if countries + cities > 0 {
            return Err(format!(
                "store already holds {} countries and {} cities; pass --reset to empty it first",
                countries, cities
            )
            .into());
        }
    }
    run_script(&mut db)?;

    log_op_end!("demo", duration_ms = start.elapsed().as_millis() as u64);
    Ok(())
}

/// The persistence script itself, against an open store with empty tables
pub fn run_script(db: &mut DbMap) -> DemoResult {
    let tx = db.begin()?;
    for (code, name) in [("PT", "Portugal"), ("SP", "Spain")] {
        tx.insert(&mut Country {
            code: code.to_string(),
            name: name.to_string(),
        })?;
    }
    for (code, name, country) in [
        ("OPO", "Porto", "PT"),
        ("LIS", "Lisbon", "PT"),
        ("BAR", "Barcelona", "SP"),
        ("MAD", "Madrid", "SP"),
    ] {
        tx.insert(&mut City {
            code: code.to_string(),
            name: name.to_string(),
            country_code: country.to_string(),
        })?;
    }
    tx.commit()?;
    println!("✓ inserted 2 countries and 4 cities");

    let expected = [("PT", "Portugal"), ("SP", "Spain")];
    let matches = |countries: &[Country]| {
        countries.len() == expected.len()
            && countries
                .iter()
                .zip(expected.iter())
                .all(|(c, (code, name))| c.code == *code && c.name == *name)
    };

    let countries: Vec<Country> = db.select("select * from Country order by Code", &[])?;
    check("select all countries ordered by code", matches(&countries))?;

    let codes = ["PT", "SP"];
    let sql = format!(
        "select * from Country where Code in ({}) order by Code",
        question_marks(codes.len())
    );
    let args: Vec<Value> = codes.iter().map(|&c| Value::from(c)).collect();
    let countries: Vec<Country> = db.select(&sql, &args)?;
    check("select countries by code list", matches(&countries))?;

    let tx = db.begin()?;
    let count = tx.update(&mut City {
        code: "LIS".to_string(),
        name: "Lisboa".to_string(),
        ..City::default()
    })?;
    tx.commit()?;
    check("update LIS affects one row", count == 1)?;

    let lisbon = db.get::<City>(&values!["LIS"])?;
    check(
        "full update clears LIS country code",
        lisbon.is_some_and(|c| c.name == "Lisboa" && c.country_code.is_empty()),
    )?;

    let tx = db.begin()?;
    let count = tx.delete(&City {
        code: "LIS".to_string(),
        ..City::default()
    })?;
    tx.commit()?;
    check("delete LIS affects one row", count == 1)?;

    check(
        "LIS is gone",
        db.get::<City>(&values!["LIS"])?.is_none(),
    )?;

    let sql = "select count(*) from City where Code = ?";
    check("count for LIS is 0", db.select_int(sql, &values!["LIS"])? == 0)?;
    check("count for OPO is 1", db.select_int(sql, &values!["OPO"])? == 1)?;

    Ok(())
}
