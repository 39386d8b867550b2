//! Coverage Goals
//!
//! A goal binds one obligation to its class and method. Two goals are equal
//! when they cover the same multiset of `(branch, outcome)` pairs in the same
//! method, so an obligation discovered twice collapses to a single goal.

use super::{BranchName, MethodId, Obligation, ObligationSet, Outcome};
use crate::result::{MccError, MccResult};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Immutable MCC coverage goal
#[derive(Debug, Clone)]
pub struct CoverageGoal {
    obligation: Obligation,
    class_name: String,
    method_name: String,
    /// Source line of the first decision, when known
    line_number: Option<u32>,
    /// Sorted `(branch, outcome)` pairs; the equality key
    identity: Vec<(BranchName, Outcome)>,
}

impl CoverageGoal {
    /// Create a goal
    ///
    /// Fails when the class or method name is empty, or when any step's
    /// decision handle reports a different class or method.
    pub fn new(
        obligation: Obligation,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> MccResult<Self> {
        let class_name = class_name.into();
        let method_name = method_name.into();
        if class_name.is_empty() {
            return Err(MccError::invalid_argument("goal class name must not be empty"));
        }
        if method_name.is_empty() {
            return Err(MccError::invalid_argument("goal method name must not be empty"));
        }

        for step in obligation.steps() {
            if let Some(handle) = step.handle() {
                if !handle.belongs_to(&class_name, &method_name) {
                    return Err(MccError::MethodMismatch {
                        branch: step.branch().to_string(),
                        expected_class: class_name,
                        expected_method: method_name,
                        actual_class: handle.class_name.clone(),
                        actual_method: handle.method_name.clone(),
                    });
                }
            }
        }

        let line_number = obligation.first().handle().and_then(|h| h.line_number);
        let mut identity: Vec<(BranchName, Outcome)> = obligation
            .steps()
            .iter()
            .map(|step| (step.branch().clone(), step.outcome()))
            .collect();
        identity.sort();

        Ok(Self {
            obligation,
            class_name,
            method_name,
            line_number,
            identity,
        })
    }

    /// Create a goal for `method`
    pub fn for_method(obligation: Obligation, method: &MethodId) -> MccResult<Self> {
        Self::new(obligation, method.class_name(), method.method_name())
    }

    /// The obligation this goal asks to be covered
    #[must_use]
    pub fn obligation(&self) -> &Obligation {
        &self.obligation
    }

    /// Class name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Method name
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Method identity
    #[must_use]
    pub fn method_id(&self) -> MethodId {
        MethodId::new(self.class_name.clone(), self.method_name.clone())
    }

    /// Source line of the obligation's first decision
    #[must_use]
    pub fn line_number(&self) -> Option<u32> {
        self.line_number
    }

    /// Number of `(branch, outcome)` pairs
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.obligation.len()
    }
}

impl PartialEq for CoverageGoal {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
            && self.method_name == other.method_name
            && self.identity == other.identity
    }
}

impl Eq for CoverageGoal {}

impl Hash for CoverageGoal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
        self.method_name.hash(state);
        self.identity.hash(state);
    }
}

impl PartialOrd for CoverageGoal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Line order first (unknown lines last), then method, then pairs
impl Ord for CoverageGoal {
    fn cmp(&self, other: &Self) -> Ordering {
        let line = |goal: &Self| goal.line_number.unwrap_or(u32::MAX);
        line(self)
            .cmp(&line(other))
            .then_with(|| self.class_name.cmp(&other.class_name))
            .then_with(|| self.method_name.cmp(&other.method_name))
            .then_with(|| self.identity.cmp(&other.identity))
    }
}

impl fmt::Display for CoverageGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}:", self.class_name, self.method_name)?;
        for step in self.obligation.steps() {
            write!(f, " {step}")?;
        }
        Ok(())
    }
}

/// Build one goal per distinct obligation of `set`
///
/// A goal that fails construction is logged and skipped; the rest of the
/// batch is still built.
#[must_use]
pub fn build_goals(set: &ObligationSet) -> Vec<CoverageGoal> {
    let mut seen = HashSet::new();
    let mut goals = Vec::with_capacity(set.len());
    for obligation in set {
        match CoverageGoal::for_method(obligation.clone(), set.method()) {
            Ok(goal) => {
                if seen.insert(goal.clone()) {
                    goals.push(goal);
                }
            }
            Err(err) => {
                tracing::warn!(method = %set.method(), error = %err, "skipping coverage goal");
            }
        }
    }
    goals
}
