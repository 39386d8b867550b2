//! Analysis Session
//!
//! Owns every per-method registry of one analysis run: recorded tokens, the
//! decision catalog and published obligation sets. Work happens in two
//! phases:
//!
//! 1. **Record**: any number of threads append tokens. Appends to the same
//!    method are serialized by that method's own lock.
//! 2. **Process**: once recording of a method is finished, extraction, graph
//!    building and synthesis run once and publish an immutable set.
//!
//! The session doesn't enforce the barrier between the phases; callers must
//! not record into a method while it is being processed.

use super::{
    build_goals, extract, synthesize, BranchDescriptor, BranchGraph, BranchName, CoverageGoal,
    DecisionCatalog, DecisionHandle, InstructionToken, MethodId, ObligationSet, SuiteFitness,
    TokenParser,
};
use crate::config::MccConfig;
use crate::result::MccResult;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

type TokenSlot = Arc<Mutex<Vec<InstructionToken>>>;

/// Explicit context for one analysis run
#[derive(Debug)]
pub struct AnalysisSession {
    id: Uuid,
    config: MccConfig,
    parser: TokenParser,
    tokens: RwLock<BTreeMap<MethodId, TokenSlot>>,
    catalog: RwLock<DecisionCatalog>,
    published: RwLock<BTreeMap<MethodId, Arc<ObligationSet>>>,
}

impl AnalysisSession {
    /// Create a session
    pub fn new(config: MccConfig) -> MccResult<Self> {
        config.validate()?;
        let session = Self {
            id: Uuid::new_v4(),
            config,
            parser: TokenParser::new()?,
            tokens: RwLock::new(BTreeMap::new()),
            catalog: RwLock::new(DecisionCatalog::new()),
            published: RwLock::new(BTreeMap::new()),
        };
        tracing::debug!(session = %session.id, "opened MCC analysis session");
        Ok(session)
    }

    /// Session id, for log correlation
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &MccConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Record phase
    // ------------------------------------------------------------------

    fn token_slot(&self, method: &MethodId) -> TokenSlot {
        if let Some(slot) = self.tokens.read().get(method) {
            return Arc::clone(slot);
        }
        let mut tokens = self.tokens.write();
        Arc::clone(tokens.entry(method.clone()).or_default())
    }

    /// Append a token to `method`'s stream
    pub fn record(&self, method: &MethodId, token: InstructionToken) {
        self.token_slot(method).lock().push(token);
    }

    /// Parse and append a textual token; malformed tokens are logged and skipped
    pub fn record_text(&self, method: &MethodId, text: &str) -> bool {
        match self.parser.parse(text) {
            Ok(token) => {
                self.record(method, token);
                true
            }
            Err(err) => {
                tracing::warn!(session = %self.id, method = %method, error = %err, "skipping malformed instruction token");
                false
            }
        }
    }

    /// Register the handle of a decision, for line numbers and method checks
    pub fn register_decision(&self, method: &MethodId, branch: BranchName, handle: DecisionHandle) {
        self.catalog.write().register(method, branch, handle);
    }

    /// Copy of the tokens recorded for `method`
    #[must_use]
    pub fn tokens(&self, method: &MethodId) -> Vec<InstructionToken> {
        self.tokens
            .read()
            .get(method)
            .map(|slot| slot.lock().clone())
            .unwrap_or_default()
    }

    /// Methods with recorded tokens, in order
    #[must_use]
    pub fn methods(&self) -> Vec<MethodId> {
        self.tokens.read().keys().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Process phase
    // ------------------------------------------------------------------

    /// Descriptors of `method`, rebuilt from its current tokens
    #[must_use]
    pub fn descriptors(&self, method: &MethodId) -> Option<Vec<BranchDescriptor>> {
        let tokens = self.tokens.read().get(method).map(Arc::clone)?;
        let tokens = tokens.lock();
        Some(extract(&tokens))
    }

    /// Decision graph of `method`, rebuilt from its current tokens
    #[must_use]
    pub fn branch_graph(&self, method: &MethodId) -> Option<BranchGraph> {
        self.descriptors(method)
            .map(|descriptors| BranchGraph::build(&descriptors))
    }

    /// Synthesize and publish the obligations of one method
    ///
    /// Returns the published set, or `None` when the method has too few
    /// decisions for MCC.
    pub fn process_method(&self, method: &MethodId) -> Option<Arc<ObligationSet>> {
        let graph = self.branch_graph(method)?;
        if graph.len() < self.config.min_decisions {
            tracing::debug!(
                session = %self.id,
                method = %method,
                decisions = graph.len(),
                min_decisions = self.config.min_decisions,
                "too few decisions for MCC"
            );
            return None;
        }

        let (set, report) = synthesize(&graph, method.clone());
        let set = set.with_handles(&self.catalog.read());
        tracing::debug!(
            session = %self.id,
            method = %method,
            decisions = graph.len(),
            passes = report.passes,
            obligations = report.obligations,
            cycles_cut = report.cycles_cut,
            "synthesized MCC obligations"
        );

        let _ = self.publish(set);
        self.obligations(method)
    }

    /// Process every recorded method; returns how many have obligations
    pub fn process_all(&self) -> usize {
        self.methods()
            .iter()
            .filter(|method| self.process_method(method).is_some())
            .count()
    }

    /// Publish a set; returns `false` when an equal set is already published
    /// for the same method
    pub fn publish(&self, set: ObligationSet) -> bool {
        let mut published = self.published.write();
        if let Some(existing) = published.get(set.method()) {
            if **existing == set {
                tracing::debug!(session = %self.id, method = %set.method(), "obligation set already published");
                return false;
            }
        }
        let method = set.method().clone();
        let _ = published.insert(method, Arc::new(set));
        true
    }

    /// Published obligations of `method`
    #[must_use]
    pub fn obligations(&self, method: &MethodId) -> Option<Arc<ObligationSet>> {
        self.published.read().get(method).map(Arc::clone)
    }

    // ------------------------------------------------------------------
    // Goals and fitness
    // ------------------------------------------------------------------

    /// Coverage goals of all published methods passing the filters
    ///
    /// `class_filter` overrides the configured target class. Goals are
    /// deduplicated and sorted by source line.
    #[must_use]
    pub fn coverage_goals(&self, class_filter: Option<&str>) -> Vec<CoverageGoal> {
        let published = self.published.read();
        let mut seen = HashSet::new();
        let mut goals = Vec::new();

        for (method, set) in published.iter() {
            let class_wanted = match class_filter {
                Some(class_name) => method.class_name() == class_name,
                None => self.config.targets_class(method.class_name()),
            };
            if !class_wanted {
                continue;
            }
            if !self.config.method_filter.matches(method.method_name()) {
                tracing::debug!(session = %self.id, method = %method, "method does not match criteria");
                continue;
            }
            for goal in build_goals(set) {
                if seen.insert(goal.clone()) {
                    goals.push(goal);
                }
            }
        }

        goals.sort();
        goals
    }

    /// Suite fitness over [`coverage_goals`](Self::coverage_goals)
    #[must_use]
    pub fn suite_fitness(&self, class_filter: Option<&str>) -> SuiteFitness {
        SuiteFitness::new(self.coverage_goals(class_filter))
            .with_failure_cap(self.config.cap_on_execution_failure)
    }
}
