//! In-memory tree surface described in YAML
//!
//! ```yaml
//! name: root
//! children:
//!   - name: Decor
//!     children:
//!       - name: Balloons
//!         listing: true
//!         children:
//!           - name: Red Balloons
//!           - name: Blue Balloons
//!             active: false
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::error::{NavError, NavResult};
use crate::surface::{Child, TreeSurface};

/// One node of a fixture tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,

    #[serde(default)]
    pub children: Vec<TreeNode>,

    /// Satisfies the surface's own goal test
    #[serde(default)]
    pub goal: bool,

    /// Selectable when listed inside a leaf listing
    #[serde(default = "default_active")]
    pub active: bool,

    /// Terminal listing of selectable items
    #[serde(default)]
    pub listing: bool,
}

fn default_active() -> bool {
    true
}

impl TreeNode {
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
            goal: false,
            active: true,
            listing: false,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::branch(name, Vec::new())
    }

    pub fn listing(name: impl Into<String>, items: Vec<TreeNode>) -> Self {
        Self {
            listing: true,
            ..Self::branch(name, items)
        }
    }

    pub fn with_goal(mut self) -> Self {
        self.goal = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// A recorded surface move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Descend(String),
    Ascend(String),
}

#[derive(Debug)]
struct Slot {
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    goal: bool,
    active: bool,
    listing: bool,
}

/// [`TreeSurface`] over an in-memory tree. Handles are node ids.
#[derive(Debug)]
pub struct MemoryTree {
    slots: Vec<Slot>,
    current: usize,
    ops: Vec<SurfaceOp>,
    fail_descend: HashSet<String>,
    fail_ascend: HashSet<String>,
    list_delay: Option<Duration>,
}

impl MemoryTree {
    pub fn new(root: TreeNode) -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            current: 0,
            ops: Vec::new(),
            fail_descend: HashSet::new(),
            fail_ascend: HashSet::new(),
            list_delay: None,
        };
        tree.insert(root, None);
        tree
    }

    /// Parse a tree from a YAML string
    pub fn from_yaml(yaml: &str) -> NavResult<Self> {
        let root: TreeNode = serde_yaml::from_str(yaml)?;
        Ok(Self::new(root))
    }

    /// Parse a tree from a YAML file
    pub fn from_file(path: &Path) -> NavResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn insert(&mut self, node: TreeNode, parent: Option<usize>) -> usize {
        let id = self.slots.len();
        self.slots.push(Slot {
            name: node.name,
            parent,
            children: Vec::new(),
            goal: node.goal,
            active: node.active,
            listing: node.listing,
        });
        for child in node.children {
            let child_id = self.insert(child, Some(id));
            self.slots[id].children.push(child_id);
        }
        id
    }

    /// Make every descend into a node with this name fail
    pub fn fail_descend_into(&mut self, name: impl Into<String>) {
        self.fail_descend.insert(name.into());
    }

    /// Make every ascend out of a node with this name fail, as a torn
    /// down session would
    pub fn fail_ascend_from(&mut self, name: impl Into<String>) {
        self.fail_ascend.insert(name.into());
    }

    /// Delay every children listing, for timeout tests
    pub fn set_list_delay(&mut self, delay: Duration) {
        self.list_delay = Some(delay);
    }

    /// Name of the node the surface is positioned on
    pub fn current_name(&self) -> &str {
        &self.slots[self.current].name
    }

    /// Names from the root's child down to the current node
    pub fn current_trail(&self) -> Vec<String> {
        let mut trail = Vec::new();
        let mut id = self.current;
        while let Some(parent) = self.slots[id].parent {
            trail.push(self.slots[id].name.clone());
            id = parent;
        }
        trail.reverse();
        trail
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// How many times a node with this name was entered
    pub fn descents_into(&self, name: &str) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Descend(n) if n == name))
            .count()
    }

}

#[async_trait]
impl TreeSurface for MemoryTree {
    type Handle = usize;

    async fn list_children(&self) -> NavResult<Vec<Child<usize>>> {
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.slots[self.current]
            .children
            .iter()
            .map(|&id| Child::new(self.slots[id].name.clone(), id))
            .collect())
    }

    async fn is_goal_node(&self) -> NavResult<bool> {
        Ok(self.slots[self.current].goal)
    }

    async fn is_leaf_listing(&self) -> NavResult<bool> {
        Ok(self.slots[self.current].listing)
    }

    async fn is_active(&self, handle: &usize) -> NavResult<bool> {
        self.slots
            .get(*handle)
            .map(|slot| slot.active)
            .ok_or_else(|| NavError::surface(format!("unknown handle {}", handle)))
    }

    async fn descend(&mut self, handle: &usize) -> NavResult<()> {
        if !self.slots[self.current].children.contains(handle) {
            return Err(NavError::surface(format!(
                "stale handle {} under '{}'",
                handle,
                self.current_name()
            )));
        }
        let name = self.slots[*handle].name.clone();
        if self.fail_descend.contains(&name) {
            return Err(NavError::surface(format!("failed to open '{}'", name)));
        }
        self.current = *handle;
        self.ops.push(SurfaceOp::Descend(name));
        Ok(())
    }

    async fn ascend(&mut self) -> NavResult<()> {
        let parent = self.slots[self.current]
            .parent
            .ok_or_else(|| NavError::surface("already at the root"))?;
        let name = self.slots[self.current].name.clone();
        if self.fail_ascend.contains(&name) {
            return Err(NavError::surface(format!("cannot leave '{}'", name)));
        }
        self.current = parent;
        self.ops.push(SurfaceOp::Ascend(name));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: root
children:
  - name: Decor
    children:
      - name: Balloons
        listing: true
        children:
          - name: Red Balloons
          - name: Blue Balloons
            active: false
  - name: Catering
    goal: true
"#;

    #[tokio::test]
    async fn test_parse_and_walk() {
        let mut tree = MemoryTree::from_yaml(YAML).unwrap();
        let top = tree.list_children().await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Decor");

        tree.descend(&top[0].handle).await.unwrap();
        let sub = tree.list_children().await.unwrap();
        tree.descend(&sub[0].handle).await.unwrap();
        assert!(tree.is_leaf_listing().await.unwrap());
        assert_eq!(tree.current_trail(), vec!["Decor", "Balloons"]);

        let items = tree.list_children().await.unwrap();
        assert!(tree.is_active(&items[0].handle).await.unwrap());
        assert!(!tree.is_active(&items[1].handle).await.unwrap());

        tree.ascend().await.unwrap();
        assert_eq!(tree.current_name(), "Decor");
        assert_eq!(tree.descents_into("Balloons"), 1);
    }

    #[tokio::test]
    async fn test_ascend_at_root_fails() {
        let mut tree = MemoryTree::from_yaml(YAML).unwrap();
        assert!(matches!(tree.ascend().await, Err(NavError::Surface(_))));
    }

    #[tokio::test]
    async fn test_stale_handle_rejected() {
        let mut tree = MemoryTree::from_yaml(YAML).unwrap();
        let top = tree.list_children().await.unwrap();
        tree.descend(&top[1].handle).await.unwrap();
        assert!(tree.descend(&top[0].handle).await.is_err());
        assert!(tree.is_goal_node().await.unwrap());
    }

    #[tokio::test]
    async fn test_injected_descend_failure() {
        let mut tree = MemoryTree::from_yaml(YAML).unwrap();
        tree.fail_descend_into("Catering");
        let top = tree.list_children().await.unwrap();
        assert!(tree.descend(&top[1].handle).await.is_err());
        assert_eq!(tree.current_name(), "root");
        assert!(tree.ops().is_empty());
    }

    #[tokio::test]
    async fn test_injected_ascend_failure() {
        let mut tree = MemoryTree::from_yaml(YAML).unwrap();
        tree.fail_ascend_from("Decor");
        let top = tree.list_children().await.unwrap();
        tree.descend(&top[0].handle).await.unwrap();
        assert!(matches!(tree.ascend().await, Err(NavError::Surface(_))));
        assert_eq!(tree.current_name(), "Decor");
    }
}
