//! Property-based tests for the update/synthesis cycle.
//!
//! Random script graphs (cycles included) are laid out in an in-memory tree
//! and driven through the engine.
//!
//! Run with: cargo test --features proptest --package wxdep-graph property_tests

#![cfg(feature = "proptest")]

use proptest::prelude::*;

use super::harness::*;
use crate::compute_liveness;
use crate::runtime::test_utils::MemoryRuntime;

/// Edges of a random graph over `n` scripts: `edges[i]` lists targets of `i`.
fn script_graph_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<Vec<usize>>)> {
    (1usize..=12).prop_flat_map(|n| {
        (
            prop::collection::vec(0..n, 0..=3),
            prop::collection::vec(prop::collection::vec(0..n, 0..=3), n),
        )
    })
}

fn build_tree(from_app: &[usize], edges: &[Vec<usize>]) -> MemoryRuntime {
    let requires = |targets: &[usize]| {
        targets
            .iter()
            .map(|t| format!("require('./m{t}');\n"))
            .collect::<String>()
    };

    let mut runtime = MemoryRuntime::new("/project")
        .with_file("/project/src/app.json", "{}")
        .with_file("/project/src/app.js", requires(from_app));
    for (index, targets) in edges.iter().enumerate() {
        runtime = runtime.with_file(format!("/project/src/m{index}.js"), requires(targets.as_slice()));
    }
    runtime
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the root stays live and no dead record survives a cycle
    #[test]
    fn prop_root_live_and_no_dead_records((from_app, edges) in script_graph_strategy()) {
        let mut harness = Harness::new(build_tree(&from_app, &edges));
        harness.start();

        let view = compute_liveness(harness.engine.graph());
        prop_assert!(view.is_live(harness.engine.root()));
        for path in harness.engine.graph().paths() {
            prop_assert!(view.is_live(&path), "dead record left: {}", path.display());
        }
    }

    /// Property: empty updates do not change the graph or the fake importer
    #[test]
    fn prop_empty_update_idempotent((from_app, edges) in script_graph_strategy()) {
        let mut harness = Harness::new(build_tree(&from_app, &edges));
        let initial = harness.start();

        let first = harness.idle();
        let graph = harness.engine.graph().clone();
        let second = harness.idle();

        prop_assert_eq!(&initial.content, &first.content);
        prop_assert_eq!(&first.content, &second.content);
        prop_assert_eq!(harness.engine.graph(), &graph);
    }

    /// Property: re-announcing every tracked file reaches the same graph
    #[test]
    fn prop_full_rescan_matches_initial((from_app, edges) in script_graph_strategy()) {
        let mut harness = Harness::new(build_tree(&from_app, &edges));
        harness.start();
        let before = harness.engine.graph().clone();

        let everything = before.paths().into_iter().collect::<Vec<_>>();
        harness.cycle(&everything);

        prop_assert_eq!(harness.engine.graph(), &before);
    }
}
