//! Taskline - console task manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskline::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
