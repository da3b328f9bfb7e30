//! rowmap CLI
//!
//! Command-line interface for the Country/City store

use clap::{Parser, Subcommand, ValueEnum};
use rowmap_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;
mod records;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "rowmap")]
#[command(about = "rowmap - Country/City record store over SQLite", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Store config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file; overrides the config file path (default: in-memory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the insert/select/update/delete script and verify each step
    Demo(commands::demo::DemoArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// List countries or cities
    List(commands::list::ListArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let store = commands::StoreOptions {
        config: cli.config,
        db: cli.db,
    };

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args, &store),
        Commands::Seed(args) => commands::seed::execute(args, &store),
        Commands::List(args) => commands::list::execute(args, &store),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
