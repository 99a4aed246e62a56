//! Search properties checked over generated trees

mod common;

use std::collections::HashMap;
use treenav_navigator::fixture::SurfaceOp;
use treenav_navigator::{MemoryTree, Navigator, SearchConfig, SurfaceGoal, TreeNode, TreeSurface};

/// Depth of every named node, top-level branches at depth 1
fn depths(root: &TreeNode) -> HashMap<String, usize> {
    fn walk(node: &TreeNode, depth: usize, out: &mut HashMap<String, usize>) {
        out.insert(node.name.clone(), depth);
        for child in &node.children {
            walk(child, depth + 1, out);
        }
    }
    let mut out = HashMap::new();
    for child in &root.children {
        walk(child, 1, &mut out);
    }
    out
}

#[tokio::test]
async fn generated_trees_terminate_without_reentry() {
    for seed in 0..60 {
        let root = common::random_tree(seed, 4, 0.08);
        let config = SearchConfig::with_budget(10_000, 4);
        let mut nav = Navigator::seeded(MemoryTree::new(root.clone()), seed);
        let outcome = nav.search(&SurfaceGoal, &config).await.unwrap();

        // Every node entered at most once in a single call.
        for name in common::all_names(&root) {
            assert!(nav.surface().descents_into(&name) <= 1, "seed {} node {}", seed, name);
        }

        // Completeness under a generous budget.
        assert_eq!(
            outcome.success,
            common::shallowest_goal(&root).is_some(),
            "seed {}",
            seed
        );

        if outcome.success {
            let replayed = common::replay(&root, &outcome.path).await;
            assert!(replayed.is_goal_node().await.unwrap());
        }
    }
}

#[tokio::test]
async fn moves_stay_consistent_with_path() {
    for seed in 0..30 {
        let root = common::random_tree(seed, 4, 0.0);
        let levels = depths(&root);
        let mut nav = Navigator::seeded(MemoryTree::new(root.clone()), seed);
        let outcome = nav
            .search(&SurfaceGoal, &SearchConfig::with_budget(10_000, 3))
            .await
            .unwrap();
        assert!(!outcome.success);

        // Replaying the op log never climbs above the root and never goes
        // deeper than the level limit.
        let mut depth = 0usize;
        for op in nav.surface().ops() {
            match op {
                SurfaceOp::Descend(name) => {
                    depth += 1;
                    assert_eq!(levels[name], depth);
                    assert!(depth <= 3);
                }
                SurfaceOp::Ascend(_) => {
                    assert!(depth > 0);
                    depth -= 1;
                }
            }
        }
        assert_eq!(depth, outcome.path.len());
    }
}

#[tokio::test]
async fn whole_tree_is_explored_when_no_goal_exists() {
    for seed in 0..20 {
        let root = common::random_tree(seed, 3, 0.0);
        let mut nav = Navigator::seeded(MemoryTree::new(root.clone()), seed);
        let outcome = nav
            .search(&SurfaceGoal, &SearchConfig::with_budget(10_000, 10))
            .await
            .unwrap();

        assert!(!outcome.success);
        let entered = nav
            .surface()
            .ops()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Descend(_)))
            .count();
        assert_eq!(entered, common::count_nodes(&root), "seed {}", seed);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_navigators_run_concurrently() {
    let mut handles = Vec::new();
    for seed in 0..8u64 {
        handles.push(tokio::spawn(async move {
            let root = TreeNode::branch(
                "root",
                vec![
                    TreeNode::leaf("A"),
                    TreeNode::branch("B", vec![TreeNode::leaf(format!("goal-{}", seed)).with_goal()]),
                    TreeNode::branch("C", vec![TreeNode::leaf("C1")]),
                ],
            );
            let mut nav = Navigator::seeded(MemoryTree::new(root), seed);
            nav.search(&SurfaceGoal, &SearchConfig::default()).await
        }));
    }

    for (seed, handle) in handles.into_iter().enumerate() {
        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.path.names(), vec!["B".to_string(), format!("goal-{}", seed)]);
    }
}
