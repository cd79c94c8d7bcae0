//! ---
//! pg_section: "05-external-interfaces"
//! pg_subsection: "binary"
//! pg_type: "source"
//! pg_scope: "code"
//! pg_description: "Binary entrypoint for scheduled prime generation runs."
//! pg_version: "v0.1.0"
//! pg_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use primegen_common::config::{AppConfig, LoadedAppConfig, DEFAULT_CONFIG_FILE};
use primegen_common::logging::init_tracing;
use primegen_core::{PrimeGenerator, RunMetrics, RunPipeline};
use primegen_persistence::{PrimeStore, StoreMetrics};
use prometheus::Registry;
use tracing::info;

mod report;
mod textfile;

const SERVICE_NAME: &str = "primegen";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Grow a persistent list of primes, one window of candidates per run",
    long_about = None
)]
struct Cli {
    #[arg(long, global = true, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "PATH", help = "Override the prime store location")]
    store: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Override how many candidates one run examines"
    )]
    step_size: Option<u64>,

    #[arg(long, global = true, help = "Print the report as JSON")]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Commands {
    #[command(about = "Scan the next window and append new primes (default)")]
    Run,
    #[command(about = "Show how many primes are stored and the largest one")]
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli)?;
    let mut config = loaded.config;
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }
    if let Some(step_size) = cli.step_size {
        config.generator.step_size = step_size;
    }
    config.validate()?;

    let _tracing = init_tracing(SERVICE_NAME, &config.logging)?;
    if let Some(source) = &loaded.source {
        info!(config_path = %source.display(), "configuration loaded");
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config, cli.json),
        Commands::Status => status(&config, cli.json),
    }
}

fn load_config(cli: &Cli) -> Result<LoadedAppConfig> {
    match &cli.config {
        Some(path) => Ok(LoadedAppConfig {
            config: AppConfig::from_path(path)?,
            source: Some(path.clone()),
        }),
        None => AppConfig::load_with_source(&[PathBuf::from(DEFAULT_CONFIG_FILE)]),
    }
}

fn run(config: &AppConfig, json: bool) -> Result<()> {
    let registry = Arc::new(Registry::new());
    let store = PrimeStore::new(&config.store).with_metrics(StoreMetrics::new(registry.clone())?);
    let pipeline = RunPipeline::from_parts(store, PrimeGenerator::new(&config.generator)?)
        .with_metrics(RunMetrics::new(registry.clone())?);

    let outcome = pipeline.run().context("prime generation run failed");

    // Exported even when the run failed.
    let exported = match &config.metrics.textfile {
        Some(path) => textfile::write(&registry, path),
        None => Ok(()),
    };
    let report = outcome?;
    exported?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report::render_run(&report));
    }
    Ok(())
}

fn status(config: &AppConfig, json: bool) -> Result<()> {
    let pipeline = RunPipeline::new(config)?;
    let status = pipeline.status().context("unable to read prime store")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", report::render_status(&status));
    }
    Ok(())
}
