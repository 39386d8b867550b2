//! Execution Traces
//!
//! What one test run reports back: for each executed decision, how often it
//! ran and the smallest branch distance seen toward each outcome, plus
//! whether the run timed out or threw.

use super::{BranchName, MethodId, Outcome};
use std::collections::HashMap;

/// Observed behaviour of one decision during a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionRecord {
    /// Times the decision was evaluated
    pub execution_count: u32,
    /// Minimum distance toward the true outcome (0 = taken)
    pub true_distance: f64,
    /// Minimum distance toward the false outcome (0 = taken)
    pub false_distance: f64,
}

impl DecisionRecord {
    /// Minimum distance toward `outcome`
    #[inline]
    #[must_use]
    pub fn distance(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::True => self.true_distance,
            Outcome::False => self.false_distance,
        }
    }

    /// Whether `outcome` was taken at least once
    #[must_use]
    pub fn took(&self, outcome: Outcome) -> bool {
        self.execution_count > 0 && self.distance(outcome) == 0.0
    }
}

/// Distances must be non-negative; NaN means "no usable measurement".
fn sanitize(distance: f64) -> f64 {
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance.max(0.0)
    }
}

/// Result of executing one test
#[derive(Debug, Clone, Default)]
pub struct ExecutionTrace {
    decisions: HashMap<MethodId, HashMap<BranchName, DecisionRecord>>,
    timeout: bool,
    exception: bool,
}

impl ExecutionTrace {
    /// Create an empty trace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluation of a decision, keeping the minimum distances
    pub fn observe(
        &mut self,
        method: &MethodId,
        branch: &BranchName,
        true_distance: f64,
        false_distance: f64,
    ) {
        let true_distance = sanitize(true_distance);
        let false_distance = sanitize(false_distance);
        self.decisions
            .entry(method.clone())
            .or_default()
            .entry(branch.clone())
            .and_modify(|record| {
                record.execution_count = record.execution_count.saturating_add(1);
                record.true_distance = record.true_distance.min(true_distance);
                record.false_distance = record.false_distance.min(false_distance);
            })
            .or_insert(DecisionRecord {
                execution_count: 1,
                true_distance,
                false_distance,
            });
    }

    /// Record that a decision evaluated to `outcome`, with `distance` toward the other side
    pub fn observe_outcome(
        &mut self,
        method: &MethodId,
        branch: &BranchName,
        outcome: Outcome,
        distance: f64,
    ) {
        match outcome {
            Outcome::True => self.observe(method, branch, 0.0, distance),
            Outcome::False => self.observe(method, branch, distance, 0.0),
        }
    }

    /// Mark the run as timed out
    #[must_use]
    pub fn with_timeout(mut self) -> Self {
        self.timeout = true;
        self
    }

    /// Mark the run as ended by an uncaught exception
    #[must_use]
    pub fn with_exception(mut self) -> Self {
        self.exception = true;
        self
    }

    /// Record for a decision, if it executed
    #[must_use]
    pub fn decision(&self, method: &MethodId, branch: &BranchName) -> Option<&DecisionRecord> {
        self.decisions
            .get(method)
            .and_then(|by_name| by_name.get(branch))
            .filter(|record| record.execution_count > 0)
    }

    /// Whether the run timed out
    #[must_use]
    pub fn has_timeout(&self) -> bool {
        self.timeout
    }

    /// Whether the run threw an uncaught exception
    #[must_use]
    pub fn has_exception(&self) -> bool {
        self.exception
    }

    /// Whether the run failed to execute cleanly
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.timeout || self.exception
    }

    /// Number of distinct decisions executed
    #[must_use]
    pub fn executed_decisions(&self) -> usize {
        self.decisions.values().map(HashMap::len).sum()
    }
}
