//! End-to-end session pipeline: textual tokens recorded from several
//! threads, then synthesis, goal building and suite scoring.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use mcc_coverage::prelude::*;
use std::thread;

const CLASSES: [&str; 4] = ["Triangle", "Square", "Circle", "Polygon"];

/// Two chained decisions: `Branch 1` jumps into `Branch 2`'s block
fn method_tokens() -> Vec<&'static str> {
    vec![
        "LABEL L100",
        "I3 Branch 1 IF_ICMPGE L100 - jump to L110",
        "LABEL L105",
        "I4 GOTO L200",
        "LABEL L110",
        "I9 Branch 2 IFLE L110 - jump to L120",
        "LABEL L115",
        "I11 Branch 8 BOGUS",
        "LABEL L120",
    ]
}

fn method_of(class_name: &str) -> MethodId {
    MethodId::new(class_name, "classify")
}

fn recorded_session(config: MccConfig) -> AnalysisSession {
    let session = AnalysisSession::new(config).unwrap();
    thread::scope(|scope| {
        for class_name in CLASSES {
            let session = &session;
            scope.spawn(move || {
                let method = method_of(class_name);
                for line in method_tokens() {
                    let _ = session.record_text(&method, line);
                }
            });
        }
    });
    session
}

/// Every decision of every method took both outcomes
fn covering_trace() -> ExecutionTrace {
    let mut trace = ExecutionTrace::new();
    for class_name in CLASSES {
        let method = method_of(class_name);
        for branch in ["Branch 1", "Branch 2"] {
            let branch = BranchName::new(branch);
            trace.observe_outcome(&method, &branch, Outcome::True, 3.0);
            trace.observe_outcome(&method, &branch, Outcome::False, 3.0);
        }
    }
    trace
}

#[test]
fn test_concurrent_recording_keeps_per_method_order() {
    let session = recorded_session(MccConfig::default());
    assert_eq!(session.methods().len(), CLASSES.len());
    for class_name in CLASSES {
        let tokens = session.tokens(&method_of(class_name));
        // "I4 GOTO L200" parses as a label, the bogus decision is dropped
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[0], InstructionToken::label("L100"));
        assert!(tokens[1].is_decision());
    }
}

#[test]
fn test_pipeline_synthesizes_goals_per_method() {
    let session = recorded_session(MccConfig::default());
    assert_eq!(session.process_all(), CLASSES.len());

    let set = session.obligations(&method_of("Triangle")).unwrap();
    let rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "Branch 1 - true :: Branch 2 - true",
            "Branch 1 - true :: Branch 2 - false",
            "Branch 1 - false",
        ]
    );

    let goals = session.coverage_goals(None);
    assert_eq!(goals.len(), 3 * CLASSES.len());
    assert_eq!(session.coverage_goals(Some("Circle")).len(), 3);
}

#[test]
fn test_pipeline_fitness() {
    let session = recorded_session(MccConfig::default());
    let _ = session.process_all();
    let mut fitness = session.suite_fitness(None);
    assert_eq!(fitness.worst_fitness(), 5.0 * CLASSES.len() as f64);

    assert!(matches!(
        fitness.evaluate(&[]),
        Err(MccError::InvalidArgument { .. })
    ));

    let empty = fitness.evaluate(&[ExecutionTrace::new()]).unwrap();
    assert_eq!(empty.covered_goals, 0);
    assert!(empty.fitness > 0.0);

    let full = fitness.evaluate(&[covering_trace()]).unwrap();
    assert_eq!(full.fitness, 0.0);
    assert_eq!(full.coverage, 1.0);
    assert!(full.is_complete());

    let failed = fitness.evaluate(&[covering_trace().with_timeout()]).unwrap();
    assert_eq!(failed.fitness, fitness.worst_fitness());
    assert_eq!(failed.coverage, 0.0);

    assert_eq!(fitness.best_fitness(), Some(0.0));
    assert_eq!(fitness.max_covered_goals(), 3 * CLASSES.len());
}

#[test]
fn test_config_from_yaml_drives_session() {
    let config = MccConfig::from_yaml_str(
        "target_class: Square\n\
         cap_on_execution_failure: false\n",
    )
    .unwrap();
    let session = recorded_session(config);
    let _ = session.process_all();

    let goals = session.coverage_goals(None);
    assert_eq!(goals.len(), 3);
    assert!(goals.iter().all(|g| g.class_name() == "Square"));

    let traces = [covering_trace(), ExecutionTrace::new().with_exception()];
    let evaluation = session.suite_fitness(None).evaluate(&traces).unwrap();
    assert_eq!(evaluation.fitness, 0.0);
    assert!(evaluation.execution_failed);
}
