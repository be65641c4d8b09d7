use crate::bindings::{Bindings, SeqSnapshot};
use crate::config::SeqlabConfig;
use crate::error::Result;
use crate::script::Statement;
use crate::seq::{GrowthPolicy, Reallocation};
use serde::Serialize;

pub mod access;
pub mod append;
pub mod call;
pub mod config;
pub mod construct;
pub mod eval;
pub mod expect;
pub mod growth;
pub mod helpers;
pub mod inspect;
pub mod run;
pub mod slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of an `expect` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub detail: String,
}

impl Verdict {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub snapshots: Vec<SeqSnapshot>,
    pub values: Vec<i64>,
    pub reallocations: Vec<Reallocation>,
    pub verdict: Option<Verdict>,
    pub config: Option<SeqlabConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_snapshot(mut self, snapshot: SeqSnapshot) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.values.push(value);
        self
    }

    pub fn with_reallocations(mut self, reallocations: Vec<Reallocation>) -> Self {
        self.reallocations = reallocations;
        self
    }

    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    pub fn with_config(mut self, config: SeqlabConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Report of one executed script line.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub line: usize,
    pub source: String,
    pub messages: Vec<CmdMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

/// The hard error that stopped a script.
#[derive(Debug, Clone, Serialize)]
pub struct Halt {
    pub line: usize,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptReport {
    pub steps: Vec<StepReport>,
    pub passed: usize,
    pub failed: usize,
    pub halted: Option<Halt>,
}

impl ScriptReport {
    pub fn succeeded(&self) -> bool {
        self.failed == 0 && self.halted.is_none()
    }
}

/// Dispatches one statement to its command.
pub fn execute(
    bindings: &mut Bindings,
    policy: &GrowthPolicy,
    statement: &Statement,
) -> Result<CmdResult> {
    tracing::trace!(%statement, "executing");
    match statement {
        Statement::Let { name, expr } => eval::bind(bindings, policy, name, expr),
        Statement::Eval(expr) => eval::show(bindings, policy, expr),
        Statement::Set {
            target,
            index,
            value,
        } => access::set(bindings, target, *index, *value),
        Statement::Get { target, index } => access::get(bindings, target, *index),
        Statement::Print { target } => inspect::run(bindings, target),
        Statement::Call { target } => call::run(bindings, target),
        Statement::Expect(expectation) => expect::run(bindings, policy, expectation),
    }
}
