//! Main application entry point.

use clap::Parser;
use std::process::ExitCode;
use vectorpad_app::{AppConfig, Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref());
    let log_level = config
        .as_ref()
        .map_or_else(|_| AppConfig::default().log_level, |c| c.log_level.clone());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting VectorPad");

    let result = config.and_then(|config| run(&cli.command, &config));
    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
