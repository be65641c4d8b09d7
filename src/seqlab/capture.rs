//! Closures as explicit state.
//!
//! A closure that mutates captured variables is modelled as a struct holding
//! that state plus a method operating on it. Each instance carries its own
//! state, so two accumulators built from the same starting values evolve
//! independently.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accumulator {
    total: i64,
    step: i64,
    calls: usize,
}

impl Accumulator {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            total: start,
            step,
            calls: 0,
        }
    }

    /// Adds `step` to the running total and returns the new total.
    pub fn call(&mut self) -> i64 {
        self.total = self.total.saturating_add(self.step);
        self.calls += 1;
        self.total
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl std::fmt::Display for Accumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accumulator(total={}, step={}, calls={})",
            self.total, self.step, self.calls
        )
    }
}
