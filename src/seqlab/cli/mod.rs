//! # CLI Layer
//!
//! This is **one possible UI client** for seqlab. It is the only place that
//! knows about terminal I/O, exit codes and output formatting.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Per-command handlers that call the API and print results
//! - `print`: Output formatting (colors, reports, tables)

mod commands;
mod print;
pub mod setup;

pub use commands::run;
