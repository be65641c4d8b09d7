//! Capacity growth for reallocating appends.
//!
//! Growth has two regimes split at [`GrowthPolicy::threshold`]:
//!
//! - `required <= threshold`: capacity doubles (`0` doubles to `1`), so small
//!   sequences amortize frequent appends.
//! - `required > threshold`: capacity grows by a quarter, rounded up, so large
//!   sequences do not waste a whole extra store.
//!
//! In both regimes the result is at least `required`.
//!
//! [`AppendMode`] decides how a single append of `k` elements is fed to the
//! rule: one decision for the final length (`Bulk`), or `k` single-element
//! steps (`Incremental`).

use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendMode {
    #[default]
    Bulk,
    Incremental,
}

impl std::fmt::Display for AppendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppendMode::Bulk => write!(f, "bulk"),
            AppendMode::Incremental => write!(f, "incremental"),
        }
    }
}

impl std::str::FromStr for AppendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bulk" => Ok(AppendMode::Bulk),
            "incremental" => Ok(AppendMode::Incremental),
            other => Err(format!(
                "Invalid append mode: {} (expected bulk or incremental)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    pub threshold: usize,
    pub mode: AppendMode,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: AppendMode::Bulk,
        }
    }
}

/// One reallocation observed while growing a sequence element by element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reallocation {
    /// Length the sequence reached with the append that reallocated.
    pub len: usize,
    pub from: usize,
    pub to: usize,
}

impl GrowthPolicy {
    pub fn new(threshold: usize, mode: AppendMode) -> Self {
        Self { threshold, mode }
    }

    pub fn with_mode(mut self, mode: AppendMode) -> Self {
        self.mode = mode;
        self
    }

    /// Capacity to allocate when `required` slots no longer fit in `old_cap`.
    ///
    /// Returns `old_cap` unchanged when no growth is needed.
    pub fn next_capacity(&self, old_cap: usize, required: usize) -> usize {
        if required <= old_cap {
            return old_cap;
        }
        let grown = if required <= self.threshold {
            old_cap.saturating_mul(2).max(1)
        } else {
            old_cap.saturating_add(old_cap.div_ceil(4))
        };
        grown.max(required)
    }

    /// Capacity after appending `added` elements to a sequence of `len`
    /// elements and `cap` capacity, honoring the append mode.
    pub fn grow(&self, cap: usize, len: usize, added: usize) -> usize {
        match self.mode {
            AppendMode::Bulk => self.next_capacity(cap, len.saturating_add(added)),
            AppendMode::Incremental => (1..=added).fold(cap, |cap, step| {
                self.next_capacity(cap, len.saturating_add(step))
            }),
        }
    }

    /// Reallocations that happen when `count` elements are appended one at a
    /// time to an empty sequence.
    pub fn reallocations(&self, count: usize) -> Vec<Reallocation> {
        let mut cap = 0;
        let mut steps = Vec::new();
        for len in 1..=count {
            let next = self.next_capacity(cap, len);
            if next != cap {
                steps.push(Reallocation {
                    len,
                    from: cap,
                    to: next,
                });
                cap = next;
            }
        }
        steps
    }
}
