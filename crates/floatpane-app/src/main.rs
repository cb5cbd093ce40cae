//! Floatpane - replays a pointer scenario against a desk of panels.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting floatpane");

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: floatpane <scenario.json>");
        return ExitCode::FAILURE;
    };

    let report = match floatpane_app::run_file(&path) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Replay of {} failed: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
