// Unified applicant portal onboarding engine
// Main library entry point
//
// The engine is headless: it owns the wizard state machine, the draft store,
// master data, and the gateway plumbing. Rendering, routing, and session
// storage belong to the embedding host.

pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod master_data;
pub mod models;
pub mod utils;
pub mod wizard;

pub use config::PortalConfig;
pub use error::PortalError;
pub use wizard::{StartMode, SubmitOutcome, WizardController};

use std::path::PathBuf;

/// Environment variable overriding where log files are written.
pub const LOG_DIR_ENV_VAR: &str = "ONBOARDING_LOG_DIR";

fn resolve_log_folder() -> PathBuf {
    match std::env::var(LOG_DIR_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("logs"),
    }
}

fn human_format(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string();
    let message = format!("{}", message);
    let (phase, step, cleaned) = utils::logging::parse_log_metadata(&message);
    out.finish(format_args!(
        "{}",
        utils::logging::format_human_readable_log(
            &timestamp,
            record.level(),
            record.target(),
            &cleaned,
            phase.as_deref(),
            step.as_deref(),
        )
    ));
}

fn json_format(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let message = format!("{}", message);
    let (phase, step, cleaned) = utils::logging::parse_log_metadata(&message);
    out.finish(format_args!(
        "{}",
        utils::logging::format_json_log(
            &timestamp,
            record.level(),
            record.target(),
            &cleaned,
            phase.as_deref(),
            step.as_deref(),
        )
    ));
}

/// Initialize logging with dual format: JSON to a `.log` file for structured
/// parsing, human-readable text to a `.txt` file, and optionally to stdout.
/// Call once at process start; hosts that install their own logger skip this.
pub fn init_logging(with_stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = resolve_log_folder();
    std::fs::create_dir_all(&log_dir)?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");
    let json_log_file = log_dir.join(format!("onboarding-{}.log", timestamp));
    let txt_log_file = log_dir.join(format!("onboarding-{}.txt", timestamp));

    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(human_format)
                .chain(std::io::stdout()),
        );
    }

    dispatch
        .chain(
            fern::Dispatch::new()
                .format(json_format)
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(human_format)
                .chain(fern::log_file(txt_log_file)?),
        )
        .apply()?;

    log::info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        resolve_log_folder()
    );
    Ok(())
}
