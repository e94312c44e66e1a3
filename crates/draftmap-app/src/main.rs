//! Main application entry point.

use clap::Parser;
use draftmap_app::AppConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting DraftMap");

    let config = AppConfig::parse();
    match draftmap_app::run(&config, std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
