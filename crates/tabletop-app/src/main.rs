//! Main application entry point.

use std::process::ExitCode;

use tabletop_app::App;
use tabletop_core::StageConfig;

fn load_config() -> StageConfig {
    let Some(path) = std::env::args().nth(1) else {
        return StageConfig::default();
    };
    match StageConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded configuration from {path}");
            config
        }
        Err(err) => {
            log::warn!("Using default configuration: {err}");
            StageConfig::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting tabletop");

    let result = App::new(load_config()).and_then(|mut app| app.run());
    match result {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("tabletop: {err}");
            ExitCode::FAILURE
        }
    }
}
