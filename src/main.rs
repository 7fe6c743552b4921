use std::io;
use std::process::ExitCode;

use message_history_explorer::HistoryError;
use message_history_explorer::cli;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(history_err) = err.downcast_ref::<HistoryError>()
                && let Some(remediation) = history_err.remediation()
            {
                eprintln!("ERROR: {}", history_err);
                eprintln!();
                eprintln!("{}", remediation);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}
