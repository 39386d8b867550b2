//! mcc-coverage: Multiple-Condition Coverage Goals for Search-Based Testing
//!
//! Turns per-method decision token streams into MCC test obligations and
//! scores test suites against them with a distance-based fitness that a
//! search driver can minimize.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  MCC-COVERAGE Architecture                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Token      │    │ Obligation │    │ Suite      │            │
//! │   │ Streams    │───►│ Synthesis  │───►│ Fitness    │            │
//! │   │ (record)   │    │ (process)  │    │ (traces)   │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use mcc_coverage::prelude::*;
//!
//! let session = AnalysisSession::new(MccConfig::default()).unwrap();
//! let method = MethodId::new("Triangle", "classify");
//! for line in [
//!     "LABEL L0",
//!     "I3 Branch 1 IF_ICMPGE - jump to L1",
//!     "LABEL L9",
//!     "LABEL L1",
//!     "I7 Branch 2 IFLE - jump to L2",
//!     "LABEL L3",
//! ] {
//!     session.record_text(&method, line);
//! }
//!
//! assert_eq!(session.process_all(), 1);
//! let goals = session.coverage_goals(None);
//! assert_eq!(goals.len(), 3);
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// MCC obligation synthesis and fitness
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    clippy::doc_markdown
)]
pub mod mcc;

/// Session configuration
#[allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
pub mod config;

/// Result and error types
pub mod result;

/// Log subscriber setup
#[allow(clippy::missing_errors_doc)]
pub mod telemetry;

pub use config::{LogFormat, MccConfig, MccConfigBuilder, MethodFilter};
pub use mcc::{
    AnalysisSession, BranchGraph, BranchName, BranchOutcome, CoverageGoal, DecisionCatalog,
    DecisionHandle, ExecutionTrace, InstructionToken, LabelName, MethodId, Obligation,
    ObligationSet, Outcome, SuiteEvaluation, SuiteFitness,
};
pub use result::{MccError, MccResult};
pub use telemetry::init_tracing;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::config::*;
    pub use super::mcc::*;
    pub use super::result::*;
    pub use super::telemetry::*;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod session_tests {
        use super::*;

        #[test]
        fn test_session_is_send_and_sync() {
            fn assert_send_sync<T: Send + Sync>() {}
            assert_send_sync::<AnalysisSession>();
            assert_send_sync::<ObligationSet>();
            assert_send_sync::<CoverageGoal>();
        }

        #[test]
        fn test_session_rejects_invalid_config() {
            let config = MccConfig {
                min_decisions: 0,
                ..MccConfig::default()
            };
            let err = AnalysisSession::new(config).unwrap_err();
            assert!(matches!(err, MccError::Config { .. }));
        }

        #[test]
        fn test_sessions_have_distinct_ids() {
            let a = AnalysisSession::new(MccConfig::default()).unwrap();
            let b = AnalysisSession::new(MccConfig::default()).unwrap();
            assert_ne!(a.id(), b.id());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_goal_scoped_errors() {
            assert!(MccError::invalid_argument("empty").is_goal_scoped());
            assert!(!MccError::config("bad").is_goal_scoped());
            assert!(!MccError::malformed_token("x", "y").is_goal_scoped());
        }

        #[test]
        fn test_error_display() {
            let err = MccError::malformed_token("I1 Branch 1 GOTO", "no recognized comparison opcode");
            assert_eq!(
                err.to_string(),
                "Malformed token \"I1 Branch 1 GOTO\": no recognized comparison opcode"
            );
        }
    }
}
