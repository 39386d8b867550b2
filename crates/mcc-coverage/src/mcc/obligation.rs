//! Test Obligations
//!
//! An obligation is one feasible path through a method's decision graph,
//! written as an ordered list of `(branch, outcome)` steps. Identity is the
//! exact step sequence; decision handles ride along but never take part in
//! equality.

use super::{BranchGraph, BranchName, DecisionCatalog, DecisionHandle, MethodId};
use crate::result::{MccError, MccResult};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Outcome of a binary decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// The condition held and the jump was taken
    True,
    /// The condition failed and execution fell through
    False,
}

impl Outcome {
    /// Convert from a boolean
    #[inline]
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// Convert to a boolean
    #[inline]
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.as_bool() { "true" } else { "false" })
    }
}

/// One obligation step: a branch and the outcome it must take
#[derive(Debug, Clone)]
pub struct BranchOutcome {
    branch: BranchName,
    outcome: Outcome,
    handle: Option<Arc<DecisionHandle>>,
}

impl BranchOutcome {
    /// Create a step without a decision handle
    #[must_use]
    pub fn new(branch: impl Into<BranchName>, outcome: Outcome) -> Self {
        Self {
            branch: branch.into(),
            outcome,
            handle: None,
        }
    }

    /// Attach a decision handle
    #[must_use]
    pub fn with_handle(mut self, handle: Arc<DecisionHandle>) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Branch name
    #[inline]
    #[must_use]
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Required outcome
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Underlying decision handle, if resolved
    #[must_use]
    pub fn handle(&self) -> Option<&Arc<DecisionHandle>> {
        self.handle.as_ref()
    }
}

impl PartialEq for BranchOutcome {
    fn eq(&self, other: &Self) -> bool {
        self.branch == other.branch && self.outcome == other.outcome
    }
}

impl Eq for BranchOutcome {}

impl Hash for BranchOutcome {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.branch.hash(state);
        self.outcome.hash(state);
    }
}

impl fmt::Display for BranchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.branch, self.outcome)
    }
}

/// Non-empty ordered sequence of branch outcomes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Obligation {
    steps: Vec<BranchOutcome>,
}

impl Obligation {
    /// Create an obligation from its steps
    pub fn new(steps: Vec<BranchOutcome>) -> MccResult<Self> {
        if steps.is_empty() {
            return Err(MccError::invalid_argument("obligation must have at least one step"));
        }
        Ok(Self { steps })
    }

    /// Single-step obligation
    #[must_use]
    pub fn seed(branch: BranchName, outcome: Outcome) -> Self {
        Self {
            steps: vec![BranchOutcome::new(branch, outcome)],
        }
    }

    pub(crate) fn push(&mut self, step: BranchOutcome) {
        self.steps.push(step);
    }

    /// Steps in path order
    #[must_use]
    pub fn steps(&self) -> &[BranchOutcome] {
        &self.steps
    }

    /// First step (an obligation is never empty)
    #[must_use]
    pub fn first(&self) -> &BranchOutcome {
        &self.steps[0]
    }

    /// Last step (an obligation is never empty)
    #[must_use]
    pub fn last(&self) -> &BranchOutcome {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of `(branch, outcome)` pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with collections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether any step names `branch`
    #[must_use]
    pub fn contains_branch(&self, branch: &BranchName) -> bool {
        self.steps.iter().any(|step| step.branch == *branch)
    }

    /// Copy of this obligation with handles resolved from `catalog`
    ///
    /// Steps with no catalog entry keep whatever handle they had.
    #[must_use]
    pub fn with_handles(&self, method: &MethodId, catalog: &DecisionCatalog) -> Self {
        let steps = self
            .steps
            .iter()
            .map(|step| match catalog.get(method, &step.branch) {
                Some(handle) => step.clone().with_handle(Arc::clone(handle)),
                None => step.clone(),
            })
            .collect();
        Self { steps }
    }
}

impl fmt::Display for Obligation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            if idx > 0 {
                f.write_str(" :: ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A method's obligations, insertion-ordered and free of duplicates
#[derive(Debug, Clone)]
pub struct ObligationSet {
    method: MethodId,
    obligations: Vec<Obligation>,
    index: HashSet<Obligation>,
}

impl ObligationSet {
    /// Create an empty set for `method`
    #[must_use]
    pub fn new(method: MethodId) -> Self {
        Self {
            method,
            obligations: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Add an obligation; returns `false` if an equal one is already present
    pub fn insert(&mut self, obligation: Obligation) -> bool {
        if !self.index.insert(obligation.clone()) {
            return false;
        }
        self.obligations.push(obligation);
        true
    }

    /// Method these obligations belong to
    #[must_use]
    pub fn method(&self) -> &MethodId {
        &self.method
    }

    /// Obligations in synthesis order
    #[must_use]
    pub fn obligations(&self) -> &[Obligation] {
        &self.obligations
    }

    /// Iterate over obligations
    pub fn iter(&self) -> std::slice::Iter<'_, Obligation> {
        self.obligations.iter()
    }

    /// Number of obligations
    #[must_use]
    pub fn len(&self) -> usize {
        self.obligations.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obligations.is_empty()
    }

    /// Whether any obligation touches `branch`
    #[must_use]
    pub fn covers(&self, branch: &BranchName) -> bool {
        self.obligations.iter().any(|o| o.contains_branch(branch))
    }

    /// Branches of `graph` that no obligation touches, in program order
    #[must_use]
    pub fn uncovered<'g>(&self, graph: &'g BranchGraph) -> Vec<&'g BranchName> {
        let touched: HashSet<&BranchName> = self
            .obligations
            .iter()
            .flat_map(|o| o.steps().iter().map(BranchOutcome::branch))
            .collect();
        graph.branch_names().filter(|name| !touched.contains(name)).collect()
    }

    /// Copy of this set with decision handles resolved from `catalog`
    #[must_use]
    pub fn with_handles(&self, catalog: &DecisionCatalog) -> Self {
        Self {
            method: self.method.clone(),
            obligations: self
                .obligations
                .iter()
                .map(|o| o.with_handles(&self.method, catalog))
                .collect(),
            // Handles don't take part in equality, so the index still applies
            index: self.index.clone(),
        }
    }

    /// Total `(branch, outcome)` pairs across all obligations
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.obligations.iter().map(Obligation::len).sum()
    }
}

impl PartialEq for ObligationSet {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.obligations == other.obligations
    }
}

impl Eq for ObligationSet {}

impl<'a> IntoIterator for &'a ObligationSet {
    type Item = &'a Obligation;
    type IntoIter = std::slice::Iter<'a, Obligation>;

    fn into_iter(self) -> Self::IntoIter {
        self.obligations.iter()
    }
}

impl fmt::Display for ObligationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} obligation(s)", self.method, self.obligations.len())?;
        for (idx, obligation) in self.obligations.iter().enumerate() {
            writeln!(f, "  {:>3}. {obligation}", idx + 1)?;
        }
        Ok(())
    }
}
