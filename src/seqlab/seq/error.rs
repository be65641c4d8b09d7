use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds violations reported by sequence operations.
///
/// Every variant carries the offending input and the bound it was checked
/// against. Nothing is clamped: the caller either validates up front or
/// handles the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    #[error("slice bounds out of range [{start}:{end}] with length {len}")]
    Range { start: i64, end: i64, len: usize },

    #[error("index out of range [{index}] with length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("capacity {cap} is smaller than length {len}")]
    InvalidCapacity { len: usize, cap: usize },

    #[error("cannot allocate a store of {cap} slots")]
    AllocationFailed { cap: usize },
}

/// The category of a [`SeqError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeqErrorKind {
    Range,
    Index,
    Capacity,
}

impl SeqError {
    pub fn kind(&self) -> SeqErrorKind {
        match self {
            SeqError::Range { .. } => SeqErrorKind::Range,
            SeqError::IndexOutOfRange { .. } => SeqErrorKind::Index,
            SeqError::InvalidCapacity { .. } | SeqError::AllocationFailed { .. } => {
                SeqErrorKind::Capacity
            }
        }
    }

    pub(crate) fn index(index: usize, len: usize) -> Self {
        SeqError::IndexOutOfRange {
            index: signed(index),
            len,
        }
    }

    pub(crate) fn range(start: usize, end: usize, len: usize) -> Self {
        SeqError::Range {
            start: signed(start),
            end: signed(end),
            len,
        }
    }
}

impl std::fmt::Display for SeqErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeqErrorKind::Range => write!(f, "range"),
            SeqErrorKind::Index => write!(f, "index"),
            SeqErrorKind::Capacity => write!(f, "capacity"),
        }
    }
}

impl std::str::FromStr for SeqErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "range" => Ok(SeqErrorKind::Range),
            "index" => Ok(SeqErrorKind::Index),
            "capacity" => Ok(SeqErrorKind::Capacity),
            other => Err(format!(
                "Unknown failure kind: {} (expected range, index or capacity)",
                other
            )),
        }
    }
}

fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
