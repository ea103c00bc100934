use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use rusty_sunspots::data::arrow_io;
use rusty_sunspots::data::catalog::SUNSPOTS;
use rusty_sunspots::{Catalog, DatasetConfig, Table};

/// Load a bundled dataset and summarise, describe or export it.
#[derive(Debug, Parser)]
#[command(name = "rusty-sunspots", version, about)]
struct Cli {
    /// Directory containing the dataset folders (defaults to the bundled data).
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// JSON catalog of dataset definitions (defaults to the built-in catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Dataset to load.
    #[arg(long, default_value = SUNSPOTS)]
    dataset: String,

    /// Print the dataset metadata as JSON instead of a table summary.
    #[arg(long)]
    schema: bool,

    /// Number of leading rows to show in the summary.
    #[arg(long, default_value_t = 5)]
    head: usize,

    /// Write the loaded table to this Parquet file.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn print_summary(table: &Table, head: usize) -> Result<()> {
    println!("{} rows x {} columns", table.num_rows(), table.num_columns());
    for column in table.columns() {
        println!("  {:<16} {}", column.name, column.dtype);
    }
    println!();
    println!("{}", arrow_io::pretty_head(table, head)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli
        .data_root
        .map(DatasetConfig::new)
        .unwrap_or_default();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("reading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };

    let loader = catalog.loader(&cli.dataset, &config).with_context(|| {
        let known: Vec<&str> = catalog.names().collect();
        format!("unknown dataset '{}' (known: {})", cli.dataset, known.join(", "))
    })?;

    info!("loading {}", loader.data_file().display());
    let (table, schema) = loader
        .load_data()
        .with_context(|| format!("loading {}", loader.data_file().display()))?;

    if cli.schema {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        print_summary(&table, cli.head)?;
    }

    if let Some(path) = &cli.export {
        arrow_io::write_parquet(&table, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("exported {} rows to {}", table.num_rows(), path.display());
    }

    Ok(())
}
