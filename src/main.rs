use std::process::ExitCode;

fn main() -> ExitCode {
    // Errors were already reported by `run`
    match mbox2txt::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
