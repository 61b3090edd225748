//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive one board through submit and drag without a host UI.
//! - Keep output deterministic apart from generated project ids.
//!
//! Logging is configured through `TASKBOARD_LOG_LEVEL` and
//! `TASKBOARD_LOG_DIR`; lines go to stderr when the directory is unset.

use std::process::ExitCode;
use taskboard_core::{init_logging, Board, LogConfig, LoggingError, ProjectStatus};

fn main() -> ExitCode {
    if let Err(err) = configure_logging() {
        eprintln!("taskboard: {err}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn configure_logging() -> Result<(), LoggingError> {
    let config = LogConfig::from_env()?;
    init_logging(&config)
}

fn run() -> Result<(), String> {
    println!("taskboard_core version={}", taskboard_core::core_version());

    let board = Board::new();
    let website = board.submit_project("Website", "Build site", 3);
    board.submit_project("Docs", "Write the handbook", 1);

    if !board.drag_project(website, ProjectStatus::Finished) {
        return Err(format!("drop of project {website} was refused"));
    }
    log::info!("event=smoke_done module=cli status=ok projects={}", board.store().len());

    for status in ProjectStatus::ALL {
        let list = board.list(status);
        println!("{}", list.heading());
        for item in list.items() {
            println!(
                "  - {} ({}): {}",
                item.title(),
                item.assigned_label(),
                item.description()
            );
        }
    }

    let snapshot = board.store().snapshot();
    let json = serde_json::to_string_pretty(&*snapshot)
        .map_err(|err| format!("failed to encode snapshot: {err}"))?;
    println!("{json}");
    Ok(())
}
