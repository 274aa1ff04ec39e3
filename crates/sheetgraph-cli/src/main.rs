//! Sheetgraph CLI: the `sheetgraph` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    let env_override = std::env::var(config::LOG_ENV_VAR)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok());
    let directives = config.log_filter(env_override);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("error: invalid log filter {directives:?}: {e}");
        std::process::exit(1);
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = support::load_config_or_exit(cli.config.as_deref());
    init_tracing(&config);

    match cli.command {
        Commands::Analyze {
            project,
            scene,
            sheet,
            json,
        } => commands::analyze::run(&config, project, scene, sheet, json),

        Commands::Eligibility {
            project,
            sheet,
            all,
            sequential,
            json,
        } => commands::eligibility::run(&config, project, sheet, all, sequential, json),

        Commands::Cycles { project, json } => commands::cycles::run(&config, project, json),
    }
}
