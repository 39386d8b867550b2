//! Obligation Synthesis
//!
//! Walks the decision graph depth-first from a seed decision, forking a
//! false-path sibling at every decision reached and following the true
//! continuation until an edge leaves the graph. Decisions left untouched
//! (other connected components) seed further passes until every decision
//! appears in at least one obligation.
//!
//! ```text
//!   A ──true──► B ──true──► (exit)      [(A,t),(B,t)]
//!   │           └──false──► (exit)      [(A,t),(B,f)]
//!   └──false──► (exit)                  [(A,f)]
//! ```
//!
//! A path never places the same decision twice: reaching a decision already
//! on the path ends that path, so cyclic graphs terminate.

use super::{BranchGraph, BranchName, BranchOutcome, MethodId, Obligation, ObligationSet, Outcome};
use im::Vector;
use std::collections::HashSet;

/// Counters describing one synthesis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Passes run (1 + coverage-completion passes)
    pub passes: usize,
    /// Obligations completed
    pub obligations: usize,
    /// Paths ended because their successor was already on the path
    pub cycles_cut: usize,
}

/// Partial obligation plus the decisions it has already placed
#[derive(Debug, Clone)]
struct PathInProgress {
    obligation: Obligation,
    visited: HashSet<BranchName>,
}

impl PathInProgress {
    fn seed(branch: &BranchName, outcome: Outcome) -> Self {
        let mut visited = HashSet::new();
        let _ = visited.insert(branch.clone());
        Self {
            obligation: Obligation::seed(branch.clone(), outcome),
            visited,
        }
    }

    fn extend(&mut self, branch: &BranchName, outcome: Outcome) {
        let _ = self.visited.insert(branch.clone());
        self.obligation.push(BranchOutcome::new(branch.clone(), outcome));
    }
}

/// Synthesizes the obligations of one method's decision graph
///
/// Completed obligations live in a persistent vector: [`snapshot`] hands out
/// a stable view that later appends never disturb.
///
/// [`snapshot`]: ObligationSynthesizer::snapshot
#[derive(Debug)]
pub struct ObligationSynthesizer<'g> {
    graph: &'g BranchGraph,
    completed: Vector<Obligation>,
    seen: HashSet<Obligation>,
    covered: HashSet<BranchName>,
    report: SynthesisReport,
}

impl<'g> ObligationSynthesizer<'g> {
    /// Create a synthesizer over `graph`
    #[must_use]
    pub fn new(graph: &'g BranchGraph) -> Self {
        Self {
            graph,
            completed: Vector::new(),
            seen: HashSet::new(),
            covered: HashSet::new(),
            report: SynthesisReport::default(),
        }
    }

    /// Stable view of the obligations completed so far
    #[must_use]
    pub fn snapshot(&self) -> Vector<Obligation> {
        self.completed.clone()
    }

    /// Counters for the work done so far
    #[must_use]
    pub fn report(&self) -> SynthesisReport {
        self.report
    }

    /// Decisions not yet touched by any completed obligation, in program order
    #[must_use]
    pub fn uncovered(&self) -> Vec<&'g BranchName> {
        self.graph
            .branch_names()
            .filter(|name| !self.covered.contains(*name))
            .collect()
    }

    /// Run one pass seeded at the first uncovered decision
    ///
    /// Expansion only continues from decisions that were uncovered when the
    /// pass started; an edge into an already-covered decision is placed as
    /// the path's last step. Returns `false` when nothing was left to cover.
    pub fn run_pass(&mut self) -> bool {
        let active: HashSet<&BranchName> = self.uncovered().into_iter().collect();
        let Some(seed) = self.graph.branch_names().find(|name| active.contains(name)) else {
            return false;
        };
        self.report.passes += 1;

        // Stack: the false seed sits below the true seed, and every fork is
        // pushed above it, so paths complete in depth-first order.
        let mut pending = vec![
            PathInProgress::seed(seed, Outcome::False),
            PathInProgress::seed(seed, Outcome::True),
        ];

        while let Some(mut path) = pending.pop() {
            loop {
                let last = path.obligation.last();
                if !active.contains(last.branch()) {
                    break;
                }
                let Some(next) = self.graph.successor(last.branch(), last.outcome()) else {
                    break;
                };
                if path.visited.contains(next) {
                    self.report.cycles_cut += 1;
                    break;
                }
                let mut sibling = path.clone();
                sibling.extend(next, Outcome::False);
                pending.push(sibling);
                path.extend(next, Outcome::True);
            }
            self.complete(path.obligation);
        }

        true
    }

    /// Run passes until every decision is covered
    pub fn run(&mut self) {
        while self.run_pass() {}
    }

    /// Consume the synthesizer into the method's obligation set
    #[must_use]
    pub fn into_set(self, method: MethodId) -> ObligationSet {
        let mut set = ObligationSet::new(method);
        for obligation in self.completed {
            let _ = set.insert(obligation);
        }
        set
    }

    fn complete(&mut self, obligation: Obligation) {
        if !self.seen.insert(obligation.clone()) {
            return;
        }
        for step in obligation.steps() {
            let _ = self.covered.insert(step.branch().clone());
        }
        self.report.obligations += 1;
        self.completed.push_back(obligation);
    }
}

/// Synthesize the full obligation set of `graph`
#[must_use]
pub fn synthesize(graph: &BranchGraph, method: MethodId) -> (ObligationSet, SynthesisReport) {
    let mut synthesizer = ObligationSynthesizer::new(graph);
    synthesizer.run();
    let report = synthesizer.report();
    (synthesizer.into_set(method), report)
}
