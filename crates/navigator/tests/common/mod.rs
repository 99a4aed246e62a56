//! Shared helpers for navigator integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use treenav_navigator::{MemoryTree, NavigationPath, TreeNode, TreeSurface};

/// Replay `path` on a fresh copy of the tree, checking every step is a real
/// child at the recorded position. Returns the surface left at the end.
pub async fn replay(root: &TreeNode, path: &NavigationPath) -> MemoryTree {
    let mut tree = MemoryTree::new(root.clone());
    for step in path.steps() {
        let children = tree.list_children().await.unwrap();
        let child = children
            .get(step.index)
            .unwrap_or_else(|| panic!("no child at index {} for step {:?}", step.index, step));
        assert_eq!(child.name, step.name);
        tree.descend(&child.handle).await.unwrap();
    }
    tree
}

/// Random tree with unique names `n`, `n.0`, `n.0.1`, ... and goal flags
/// set with probability `goal_rate`.
pub fn random_tree(seed: u64, max_depth: usize, goal_rate: f64) -> TreeNode {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut root = TreeNode::leaf("root");
    let fan_out = rng.gen_range(1..=4);
    for i in 0..fan_out {
        root.children.push(grow(&mut rng, format!("n{}", i), 1, max_depth, goal_rate));
    }
    root
}

fn grow(rng: &mut StdRng, name: String, depth: usize, max_depth: usize, goal_rate: f64) -> TreeNode {
    let mut node = TreeNode::leaf(name.clone());
    node.goal = rng.gen_bool(goal_rate);
    if depth < max_depth {
        let fan_out = rng.gen_range(0..=3);
        for i in 0..fan_out {
            node.children
                .push(grow(rng, format!("{}.{}", name, i), depth + 1, max_depth, goal_rate));
        }
    }
    node
}

/// Depth of the shallowest goal node, top-level branches being depth 1
pub fn shallowest_goal(root: &TreeNode) -> Option<usize> {
    fn walk(node: &TreeNode, depth: usize) -> Option<usize> {
        let here = if node.goal { Some(depth) } else { None };
        node.children
            .iter()
            .filter_map(|c| walk(c, depth + 1))
            .chain(here)
            .min()
    }
    root.children.iter().filter_map(|c| walk(c, 1)).min()
}

pub fn count_nodes(root: &TreeNode) -> usize {
    root.children.iter().map(|c| 1 + count_nodes(c)).sum()
}

pub fn all_names(root: &TreeNode) -> Vec<String> {
    let mut names = Vec::new();
    for child in &root.children {
        names.push(child.name.clone());
        names.extend(all_names(child));
    }
    names
}
