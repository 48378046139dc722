//! Main application entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dg_data::{open_source, GridConfig, GridSession, Pipeline};

mod args;
mod table;

use args::GridArgs;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the table or JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = GridArgs::parse();
    run(&args)
}

fn run(args: &GridArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("failed to load grid config {}", path.display()))?,
        None => GridConfig::default(),
    };
    let config = args.apply_to(config);

    let source = open_source(&args.file, config.null_config.clone())
        .with_context(|| format!("cannot open {}", args.file.display()))?;
    let loaded = source
        .load()
        .with_context(|| format!("failed to load records from {}", source.source_name()))?;
    info!("Starting grid over {} records", loaded.len());

    let columns = config.column_set(&loaded.columns);
    if let Some(key) = &args.sort {
        if columns.get(key).is_none() {
            warn!("Sort column '{}' does not exist, rows stay in file order", key);
        }
    }

    let session = GridSession::new(loaded.records, Pipeline::new(columns))
        .with_state(args.view_state(&config))
        .with_range_options(config.range_options(1, 1));

    let snapshot = match args.page {
        Some(page) => session.set_page(page),
        None => session.snapshot(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&*snapshot).context("failed to encode output")?;
        println!("{}", json);
    } else {
        print!(
            "{}",
            table::render_grid(&snapshot, session.pipeline().columns(), &config)
        );
    }

    Ok(())
}
