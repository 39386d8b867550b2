//! Multiple-Condition Coverage Goals
//!
//! Reconstructs how a method's decisions chain into each other from its
//! instruction token stream, synthesizes one obligation per feasible outcome
//! path and scores those obligations against execution traces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  MCC PIPELINE                                                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Tokens → Descriptors → Branch Graph → Obligations → Goals      │
//! │    ↑                                                   ↓        │
//! │  AnalysisSession (record / process)        SuiteFitness(traces) │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Toyota Way Principles Applied
//!
//! - **Poka-Yoke**: `BranchName`, `LabelName` and `MethodId` can't be mixed up
//! - **Muda**: names are `Arc<str>`, so forking a path clones pointers
//! - **Jidoka**: a bad token or goal is logged and skipped, never fatal
//! - **Heijunka**: recording is lock-per-method so threads don't queue up

mod catalog;
mod extractor;
mod fitness;
mod goal;
mod graph;
mod ids;
mod obligation;
mod session;
mod synthesizer;
mod token;
mod trace;

pub use catalog::{DecisionCatalog, DecisionHandle};
pub use extractor::{extract, extract_from_text, label_for_false, label_for_where, BranchDescriptor};
pub use fitness::{
    best_fitness, is_covered, normalize, obligation_fitness, step_distances, ControlFlowDistance,
    SuiteEvaluation, SuiteFitness,
};
pub use goal::{build_goals, CoverageGoal};
pub use graph::{BranchGraph, BranchNode, Successor};
pub use ids::{BranchName, LabelName, MethodId};
pub use obligation::{BranchOutcome, Obligation, ObligationSet, Outcome};
pub use session::AnalysisSession;
pub use synthesizer::{synthesize, ObligationSynthesizer, SynthesisReport};
pub use token::{ComparisonOpcode, DecisionToken, InstructionToken, TokenParser};
pub use trace::{DecisionRecord, ExecutionTrace};
