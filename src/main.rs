use std::process::ExitCode;

use expense_ledger::{app, common::error::AppError};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    match app::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(e)) => e.exit(),
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
