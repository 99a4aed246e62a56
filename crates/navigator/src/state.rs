//! Search state: where the navigator is and what has been ruled out

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One chosen branch at one depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Depth of the chosen node, top-level branches are level 0
    pub level: usize,
    pub name: String,
    /// Ordinal position among the siblings listed at the time of choice
    pub index: usize,
}

/// Ordered sequence of steps from the root to the current node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationPath(Vec<PathStep>);

impl NavigationPath {
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    /// Step names from the root down
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.name.as_str()).collect()
    }

    /// Positional identity of the node this path leads to
    pub fn key(&self) -> PathKey {
        PathKey::from_indices(self.0.iter().map(|s| s.index))
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(" > "))
    }
}

/// Positional identity of a subtree: child indices joined by '-'
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let parts: Vec<String> = indices.into_iter().map(|i| i.to_string()).collect();
        Self(parts.join("-"))
    }

    /// Key of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        if self.0.is_empty() {
            Self(index.to_string())
        } else {
            Self(format!("{}-{}", self.0, index))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Per-call bookkeeping. Never talks to the surface.
#[derive(Debug, Default)]
pub struct SearchState {
    path: NavigationPath,
    /// Subtrees proven dead within the current top-level branch
    visited: HashSet<PathKey>,
    /// Top-level branches already tried in this call
    visited_branches: HashSet<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn current_path_key(&self) -> PathKey {
        self.path.key()
    }

    /// Key the `index`-th child of the current node would have
    pub fn child_key(&self, index: usize) -> PathKey {
        self.current_path_key().child(index)
    }

    pub fn is_visited(&self, key: &PathKey) -> bool {
        self.visited.contains(key)
    }

    pub fn mark_visited(&mut self, key: PathKey) {
        self.visited.insert(key);
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_branch_visited(&self, index: usize) -> bool {
        self.visited_branches.contains(&index)
    }

    pub fn visited_branch_count(&self) -> usize {
        self.visited_branches.len()
    }

    /// Record a new top-level branch attempt; dead-subtree knowledge from
    /// the previous branch does not carry over.
    pub fn begin_branch(&mut self, index: usize) {
        self.visited_branches.insert(index);
        self.visited.clear();
    }

    pub fn push(&mut self, step: PathStep) {
        self.path.0.push(step);
    }

    /// `None` when already at the root
    pub fn pop(&mut self) -> Option<PathStep> {
        self.path.0.pop()
    }

    pub fn into_path(self) -> NavigationPath {
        self.path
    }
}
