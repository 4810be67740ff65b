use colored::*;
use fw_test_runner::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    fw_test_runner::init_tracing();

    match cli::run_tests().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error running tests:".red(), e);
            ExitCode::FAILURE
        }
    }
}
