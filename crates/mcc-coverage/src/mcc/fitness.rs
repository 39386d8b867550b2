//! Distance-Based Fitness
//!
//! Each obligation step gets a control-flow distance (approach level plus
//! branch distance) from a trace. An obligation's fitness sums the
//! normalized step distances, so it lies in `[0, len)` and is zero exactly
//! when every required outcome was taken.
//!
//! Suite fitness sums, per goal, the best obligation fitness over the suite's
//! traces. A timed-out or crashed run caps the suite at the worst value: one
//! point per `(branch, outcome)` pair across all goals.

use super::{CoverageGoal, ExecutionTrace};
use crate::result::{MccError, MccResult};

/// Map `[0, ∞]` onto `[0, 1]`, preserving order
#[inline]
#[must_use]
pub fn normalize(value: f64) -> f64 {
    if value.is_infinite() {
        1.0
    } else {
        value / (value + 1.0)
    }
}

/// Distance of one step from being satisfied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlFlowDistance {
    /// Decisions between the step and the nearest executed one (0 = executed)
    pub approach_level: u32,
    /// Raw branch distance at the nearest executed decision
    pub branch_distance: f64,
}

impl ControlFlowDistance {
    /// Create a distance
    #[must_use]
    pub const fn new(approach_level: u32, branch_distance: f64) -> Self {
        Self {
            approach_level,
            branch_distance,
        }
    }

    /// Approach level plus normalized branch distance
    #[must_use]
    pub fn resulting_branch_fitness(&self) -> f64 {
        f64::from(self.approach_level) + normalize(self.branch_distance)
    }

    /// Whether the step was satisfied
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.approach_level == 0 && self.branch_distance == 0.0
    }
}

/// Per-step distances of `goal`'s obligation under `trace`
///
/// An executed decision has approach level 0 and its recorded distance for
/// the required outcome. A decision the run never reached is measured from
/// the last earlier step that did execute; with none, from method entry.
#[must_use]
pub fn step_distances(goal: &CoverageGoal, trace: &ExecutionTrace) -> Vec<ControlFlowDistance> {
    let method = goal.method_id();
    let mut last_executed: Option<(usize, f64)> = None;

    goal.obligation()
        .steps()
        .iter()
        .enumerate()
        .map(|(position, step)| match trace.decision(&method, step.branch()) {
            Some(record) => {
                let distance = record.distance(step.outcome());
                last_executed = Some((position, distance));
                ControlFlowDistance::new(0, distance)
            }
            None => match last_executed {
                Some((executed_at, distance)) => {
                    ControlFlowDistance::new((position - executed_at) as u32, distance)
                }
                None => ControlFlowDistance::new(position as u32 + 1, 0.0),
            },
        })
        .collect()
}

/// Fitness of `goal` for a single trace (0 = covered)
#[must_use]
pub fn obligation_fitness(goal: &CoverageGoal, trace: &ExecutionTrace) -> f64 {
    let fitness = step_distances(goal, trace)
        .iter()
        .map(|d| normalize(d.resulting_branch_fitness()))
        .sum::<f64>();
    tracing::trace!(goal = %goal, fitness, "obligation fitness");
    fitness
}

/// Whether `trace` covers `goal`; failed runs never count
#[must_use]
pub fn is_covered(goal: &CoverageGoal, trace: &ExecutionTrace) -> bool {
    !trace.is_failed() && obligation_fitness(goal, trace) == 0.0
}

/// Best fitness of `goal` across `traces`, ignoring failed runs
///
/// With no usable trace the goal scores its pair count.
pub fn best_fitness(goal: &CoverageGoal, traces: &[ExecutionTrace]) -> MccResult<f64> {
    if traces.is_empty() {
        return Err(MccError::invalid_argument("no traces to score the goal against"));
    }
    Ok(traces
        .iter()
        .filter(|trace| !trace.is_failed())
        .map(|trace| obligation_fitness(goal, trace))
        .reduce(f64::min)
        .unwrap_or(goal.pair_count() as f64))
}

/// Outcome of scoring a suite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuiteEvaluation {
    /// Scalar fitness to minimize
    pub fitness: f64,
    /// Covered goals / total goals
    pub coverage: f64,
    /// Goals covered by some clean run
    pub covered_goals: usize,
    /// Goals scored
    pub total_goals: usize,
    /// Whether any run timed out or threw
    pub execution_failed: bool,
}

impl SuiteEvaluation {
    /// Whether every goal is covered
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.covered_goals == self.total_goals
    }
}

/// Suite-level MCC fitness over a fixed goal list
#[derive(Debug, Clone)]
pub struct SuiteFitness {
    goals: Vec<CoverageGoal>,
    cap_on_execution_failure: bool,
    best_fitness: Option<f64>,
    max_covered_goals: usize,
}

impl SuiteFitness {
    /// Create a suite fitness over `goals`
    #[must_use]
    pub fn new(goals: Vec<CoverageGoal>) -> Self {
        Self {
            goals,
            cap_on_execution_failure: true,
            best_fitness: None,
            max_covered_goals: 0,
        }
    }

    /// Enable or disable the worst-value cap for failed runs
    #[must_use]
    pub fn with_failure_cap(mut self, enabled: bool) -> Self {
        self.cap_on_execution_failure = enabled;
        self
    }

    /// Goals being scored
    #[must_use]
    pub fn goals(&self) -> &[CoverageGoal] {
        &self.goals
    }

    /// Worst possible fitness: total `(branch, outcome)` pairs
    #[must_use]
    pub fn worst_fitness(&self) -> f64 {
        self.goals.iter().map(CoverageGoal::pair_count).sum::<usize>() as f64
    }

    /// Best fitness seen across evaluations
    #[must_use]
    pub fn best_fitness(&self) -> Option<f64> {
        self.best_fitness
    }

    /// Most goals covered by any evaluated suite
    #[must_use]
    pub fn max_covered_goals(&self) -> usize {
        self.max_covered_goals
    }

    /// Score a suite of traces
    ///
    /// An empty suite is rejected; it has nothing to score.
    pub fn evaluate(&mut self, traces: &[ExecutionTrace]) -> MccResult<SuiteEvaluation> {
        if traces.is_empty() {
            return Err(MccError::invalid_argument("no traces to score the suite against"));
        }
        let execution_failed = traces.iter().any(ExecutionTrace::is_failed);
        let clean: Vec<&ExecutionTrace> = traces.iter().filter(|t| !t.is_failed()).collect();

        let mut fitness = 0.0;
        let mut covered_goals = 0;
        for goal in &self.goals {
            let best = clean
                .iter()
                .map(|trace| obligation_fitness(goal, trace))
                .reduce(f64::min);
            match best {
                Some(value) => {
                    if value == 0.0 {
                        covered_goals += 1;
                    }
                    fitness += value;
                }
                None => fitness += goal.pair_count() as f64,
            }
        }

        if execution_failed && self.cap_on_execution_failure {
            fitness = self.worst_fitness();
        }

        let total_goals = self.goals.len();
        let coverage = if total_goals == 0 {
            1.0
        } else {
            covered_goals as f64 / total_goals as f64
        };

        self.best_fitness = Some(self.best_fitness.map_or(fitness, |best| best.min(fitness)));
        self.max_covered_goals = self.max_covered_goals.max(covered_goals);

        tracing::debug!(
            fitness,
            coverage,
            covered_goals,
            total_goals,
            execution_failed,
            "evaluated MCC suite fitness"
        );

        Ok(SuiteEvaluation {
            fitness,
            coverage,
            covered_goals,
            total_goals,
            execution_failed,
        })
    }
}
