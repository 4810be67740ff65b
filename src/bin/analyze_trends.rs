use colored::*;
use fw_test_runner::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    fw_test_runner::init_tracing();

    match cli::analyze_trends() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error analyzing trends:".red(), e);
            ExitCode::FAILURE
        }
    }
}
