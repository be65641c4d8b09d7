//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for workbench operations.
//!
//! The facade:
//! - **Parses** statement and script text
//! - **Dispatches** to the command functions with its [`Bindings`] and [`GrowthPolicy`]
//! - **Returns structured types** (`CmdResult`, `ScriptReport`)
//!
//! It does no printing and holds no global state. The growth policy comes from
//! the [`SeqlabConfig`] passed to [`SeqlabApi::new`], optionally overridden per
//! run with [`SeqlabApi::with_mode`].

use crate::bindings::Bindings;
use crate::commands;
use crate::config::SeqlabConfig;
use crate::error::{Result, SeqlabError};
use crate::script::{parse_script, Statement};
use crate::seq::{AppendMode, GrowthPolicy};
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{
    CmdMessage, CmdResult, Halt, MessageLevel, ScriptReport, StepReport, Verdict,
};

pub struct SeqlabApi {
    bindings: Bindings,
    policy: GrowthPolicy,
    config_dir: PathBuf,
}

impl SeqlabApi {
    pub fn new(config: &SeqlabConfig, config_dir: PathBuf) -> Self {
        Self {
            bindings: Bindings::new(),
            policy: config.policy(),
            config_dir,
        }
    }

    pub fn with_mode(mut self, mode: AppendMode) -> Self {
        self.policy = self.policy.with_mode(mode);
        self
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Parses and executes a single statement.
    pub fn execute(&mut self, source: &str) -> Result<CmdResult> {
        let statement = source
            .parse::<Statement>()
            .map_err(|message| SeqlabError::Parse { line: 1, message })?;
        commands::execute(&mut self.bindings, &self.policy, &statement)
    }

    /// Parses the whole script up front, then runs it against the current
    /// bindings. Only parse errors are returned as `Err`; execution errors
    /// end up in [`ScriptReport::halted`].
    pub fn run_script(&mut self, source: &str) -> Result<ScriptReport> {
        let lines = parse_script(source)?;
        tracing::debug!(statements = lines.len(), "running script");
        Ok(commands::run::run(&mut self.bindings, &self.policy, &lines))
    }

    pub fn growth(&self, count: usize) -> Result<CmdResult> {
        commands::growth::run(&self.policy, count)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}
