//! Named values for the workbench.
//!
//! A script works on names: `let s = slice arr 1 4` binds `s` to a view over
//! the store `arr` references. Rebinding a name drops its old handle; the
//! store survives as long as any other binding still references it.
//!
//! Stores are labelled `#1`, `#2`, ... in the order a snapshot first sees
//! them. The labels stand in for a pointer: two bindings printed with the
//! same label share slots.

use crate::capture::Accumulator;
use crate::error::{Result, SeqlabError};
use crate::seq::{Role, Seq, StoreId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub enum Value {
    Seq(Seq<i64>),
    Accumulator(Accumulator),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Seq(_) => "a sequence",
            Value::Accumulator(_) => "an accumulator",
        }
    }
}

/// What `print` shows for a sequence binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeqSnapshot {
    pub name: String,
    pub items: Vec<i64>,
    pub len: usize,
    pub cap: usize,
    pub role: Role,
    pub offset: usize,
    /// `None` for a nil sequence
    pub store: Option<usize>,
}

impl std::fmt::Display for SeqSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = [", self.name)?;
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "] len={} cap={}", self.len, self.cap)?;
        match self.store {
            Some(label) => write!(f, " store=#{}+{}", label, self.offset),
            None => write!(f, " nil"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
    labels: HashMap<StoreId, usize>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| SeqlabError::UnknownBinding(name.to_string()))
    }

    pub fn seq(&self, name: &str) -> Result<&Seq<i64>> {
        match self.get(name)? {
            Value::Seq(seq) => Ok(seq),
            other => Err(wrong_kind(name, other, "a sequence")),
        }
    }

    pub fn accumulator_mut(&mut self, name: &str) -> Result<&mut Accumulator> {
        match self.values.get_mut(name) {
            Some(Value::Accumulator(acc)) => Ok(acc),
            Some(other) => Err(wrong_kind(name, other, "an accumulator")),
            None => Err(SeqlabError::UnknownBinding(name.to_string())),
        }
    }

    pub fn accumulator(&self, name: &str) -> Result<&Accumulator> {
        match self.get(name)? {
            Value::Accumulator(acc) => Ok(acc),
            other => Err(wrong_kind(name, other, "an accumulator")),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stable per-run label for a store.
    pub fn label(&mut self, id: StoreId) -> usize {
        let next = self.labels.len() + 1;
        *self.labels.entry(id).or_insert(next)
    }

    pub fn snapshot(&mut self, name: &str) -> Result<SeqSnapshot> {
        let seq = self.seq(name)?.clone();
        Ok(self.snapshot_of(name, &seq))
    }

    /// Snapshot of a sequence that is not (yet) bound, shown under `name`.
    pub fn snapshot_of(&mut self, name: &str, seq: &Seq<i64>) -> SeqSnapshot {
        SeqSnapshot {
            name: name.to_string(),
            items: seq.to_vec(),
            len: seq.len(),
            cap: seq.capacity(),
            role: seq.role(),
            offset: seq.offset(),
            store: seq.store_id().map(|id| self.label(id)),
        }
    }
}

fn wrong_kind(name: &str, found: &Value, expected: &'static str) -> SeqlabError {
    SeqlabError::WrongKind {
        name: name.to_string(),
        found: found.kind(),
        expected,
    }
}
