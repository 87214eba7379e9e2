//! Binary entrypoint for the `ci-evidence` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are selected in commands::dispatch via
    // CI_EVIDENCE_RECORD / CI_EVIDENCE_REPLAY.
    match ci_evidence::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
