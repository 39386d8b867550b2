//! Obligation Synthesis Benchmarks
//!
//! Benchmarks for graph building, obligation synthesis and suite scoring.
//!
//! Run with: `cargo bench --bench synthesis_ops`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mcc_coverage::mcc::{
    build_goals, extract, synthesize, BranchGraph, BranchName, BranchNode, DecisionToken,
    ExecutionTrace, InstructionToken, MethodId, Outcome, Successor, SuiteFitness,
};

fn method() -> MethodId {
    MethodId::new("Bench", "run")
}

fn name(i: usize) -> BranchName {
    BranchName::new(format!("B{i}"))
}

fn edge(target: usize, n: usize) -> Successor {
    if target < n {
        Successor::Branch(name(target))
    } else {
        Successor::NotAvailable
    }
}

/// Each decision's true edge enters the next one
fn chain_graph(n: usize) -> BranchGraph {
    BranchGraph::from_nodes((0..n).map(|i| BranchNode {
        branch_name: name(i),
        true_successor: edge(i + 1, n),
        false_successor: Successor::NotAvailable,
    }))
}

/// Both edges continue: true to the next decision, false skips one
fn diamond_graph(n: usize) -> BranchGraph {
    BranchGraph::from_nodes((0..n).map(|i| BranchNode {
        branch_name: name(i),
        true_successor: edge(i + 1, n),
        false_successor: edge(i + 2, n),
    }))
}

/// Token stream whose extracted graph is a chain
fn chain_tokens(n: usize) -> Vec<InstructionToken> {
    let mut tokens = Vec::with_capacity(3 * n);
    for i in 0..n {
        tokens.push(InstructionToken::label(format!("L{i}")));
        tokens.push(
            DecisionToken::new(name(i))
                .jump_to(format!("L{}", i + 1))
                .fall_through_to(format!("X{i}"))
                .into(),
        );
    }
    tokens
}

fn bench_graph_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_building");

    for n in [8, 32, 128] {
        let tokens = chain_tokens(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{n}_decisions")), &tokens, |bench, tokens| {
            bench.iter(|| {
                let graph = BranchGraph::build(&extract(black_box(tokens)));
                black_box(graph);
            });
        });
    }

    group.finish();
}

fn bench_chain_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_synthesis");

    for n in [8, 32, 128] {
        let graph = chain_graph(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |bench, graph| {
            bench.iter(|| {
                let (set, _) = synthesize(black_box(graph), method());
                black_box(set);
            });
        });
    }

    group.finish();
}

fn bench_diamond_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("diamond_synthesis");

    for n in [4, 8, 12, 20] {
        let graph = diamond_graph(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |bench, graph| {
            bench.iter(|| {
                let (set, _) = synthesize(black_box(graph), method());
                black_box(set);
            });
        });
    }

    group.finish();
}

fn bench_suite_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("suite_evaluation");

    for n in [4, 8, 12] {
        let (set, _) = synthesize(&diamond_graph(n), method());
        let goals = build_goals(&set);

        let traces: Vec<ExecutionTrace> = (0..10)
            .map(|seed| {
                let mut trace = ExecutionTrace::new();
                for i in (0..n).filter(|i| (i + seed) % 3 != 0) {
                    let outcome = Outcome::from_bool((i + seed) % 2 == 0);
                    trace.observe_outcome(&method(), &name(i), outcome, (i + 1) as f64);
                }
                trace
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_goals", goals.len())),
            &(goals, traces),
            |bench, (goals, traces)| {
                bench.iter(|| {
                    let mut fitness = SuiteFitness::new(goals.clone());
                    black_box(fitness.evaluate(black_box(traces)));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_graph_building,
    bench_chain_synthesis,
    bench_diamond_synthesis,
    bench_suite_evaluation
);
criterion_main!(benches);
