//! # Seqlab Architecture
//!
//! Seqlab is a **growable-sequence library** with a scriptable workbench on top.
//! The sequence core knows nothing about scripts, and the workbench knows
//! nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses scripts, dispatches statements                    │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per workbench operation                       │
//! │  - Operates on `Bindings`, returns `CmdResult`              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sequence Core (seq/)                                       │
//! │  - `Sequence` over a `Backing` store                        │
//! │  - Growth policy, views, aliasing                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`seq/`): the growth rule, slicing and aliasing laws.
//! 2. **Commands** (`commands/*.rs`): each operation against an in-memory
//!    `Bindings`. Most workbench tests live here.
//! 3. **API** (`api.rs`): whole scripts, report shape, halting rules.
//! 4. **CLI** (`tests/`): the binary end to end with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`seq`]: Growable sequences, backing stores, growth policy
//! - [`capture`]: Closures modelled as explicit state (`Accumulator`)
//! - [`config`]: Process-wide configuration
//! - [`script`]: The workbench statement language
//! - [`bindings`]: Named values a script operates on
//! - [`commands`]: Workbench operations
//! - [`api`]: The API facade
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod bindings;
pub mod capture;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod script;
pub mod seq;
