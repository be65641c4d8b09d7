//! # Seqlab CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and maps its outcome to an exit status.
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, config directory resolution, logging setup, rendering and exit
//! codes. `run` and `eval` exit with status 1 when an expectation failed or a
//! script halted, as well as on any error.

mod cli;

fn main() {
    match cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
