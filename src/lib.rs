pub mod aggregate;
pub mod clean;
pub mod cli;
pub mod dataset;
pub mod io_utils;
pub mod mapping;
pub mod report;
pub mod table;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sales_dash", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Columns(args) => report::columns(&args),
        Commands::Preview(args) => report::preview(&args),
        Commands::Category(args) => report::category(&args),
        Commands::Daily(args) => report::daily(&args),
        Commands::Ratings(args) => report::ratings(&args),
        Commands::Report(args) => report::full_report(&args),
    }
}
