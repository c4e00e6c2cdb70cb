mod aggregate;
mod category;
mod chart;
mod cli;
mod commands;
mod config;
mod db;
mod error;
mod model;
mod render;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Status => commands::status::run(&global),
        Commands::Summary(args) => commands::summary::run(&global, args),
        Commands::Category(args) => commands::category::run(&global, args),
        Commands::Describe(args) => commands::describe::run(&global, args),
        Commands::Chart(args) => commands::chart::run(&global, args),
        Commands::Dashboard(args) => commands::dashboard::run(&global, args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
