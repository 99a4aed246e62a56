//! Navigator driver shared by both search modes
//!
//! A [`Navigator`] owns one surface session and one random source. Each
//! search call builds a fresh [`Walk`] holding the per-call state, so
//! nothing learned in one call leaks into the next.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::{NavError, NavResult};
use crate::matching::{hint_matches, MatchKind};
use crate::state::{PathStep, SearchState};
use crate::surface::{Child, TreeSurface};

/// Backtracking navigator over a single tree surface
pub struct Navigator<S, R = StdRng> {
    pub(crate) surface: S,
    pub(crate) rng: R,
}

impl<S: TreeSurface> Navigator<S, StdRng> {
    /// Navigator with an entropy-seeded random source
    pub fn new(surface: S) -> Self {
        Self::with_rng(surface, StdRng::from_entropy())
    }

    /// Navigator whose branch choices replay for a given seed
    pub fn seeded(surface: S, seed: u64) -> Self {
        Self::with_rng(surface, StdRng::seed_from_u64(seed))
    }
}

impl<S: TreeSurface, R: RngCore + Send + Sync> Navigator<S, R> {
    pub fn with_rng(surface: S, rng: R) -> Self {
        Self { surface, rng }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// What the loop should do after a dead end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Backtrack {
    /// Moved somewhere new, keep looping
    Continue,
    /// Every top-level branch has been tried
    Exhausted,
    /// The surface refused to ascend
    Stuck,
}

/// Run a surface call under the optional per-operation timeout
async fn timed<T>(
    limit: Option<Duration>,
    operation: &str,
    fut: impl Future<Output = NavResult<T>>,
) -> NavResult<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| NavError::Timeout {
                operation: operation.to_string(),
                ms: limit.as_millis() as u64,
            })?,
        None => fut.await,
    }
}

/// State and collaborators for one search call
pub(crate) struct Walk<'a, S: TreeSurface> {
    pub(crate) surface: &'a mut S,
    /// `&self` helpers hold the walk across awaits, so this must be `Sync`
    rng: &'a mut (dyn RngCore + Send + Sync),
    pub(crate) state: SearchState,
    pub(crate) attempts: usize,
    op_timeout: Option<Duration>,
}

impl<'a, S: TreeSurface> Walk<'a, S> {
    pub(crate) fn new(
        surface: &'a mut S,
        rng: &'a mut (dyn RngCore + Send + Sync),
        config: &SearchConfig,
    ) -> Self {
        Self {
            surface,
            rng,
            state: SearchState::new(),
            attempts: 0,
            op_timeout: config.op_timeout(),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.state.depth()
    }

    pub(crate) async fn list_children(&self) -> NavResult<Vec<Child<S::Handle>>> {
        timed(self.op_timeout, "list_children", self.surface.list_children()).await
    }

    pub(crate) async fn is_leaf_listing(&self) -> NavResult<bool> {
        timed(self.op_timeout, "is_leaf_listing", self.surface.is_leaf_listing()).await
    }

    pub(crate) async fn is_active(&self, handle: &S::Handle) -> NavResult<bool> {
        timed(self.op_timeout, "is_active", self.surface.is_active(handle)).await
    }

    pub(crate) async fn check<F>(&self, operation: &str, fut: F) -> NavResult<bool>
    where
        F: Future<Output = NavResult<bool>>,
    {
        timed(self.op_timeout, operation, fut).await
    }

    /// Descend into `child` and record the step
    pub(crate) async fn descend(&mut self, child: &Child<S::Handle>, index: usize) -> NavResult<()> {
        timed(self.op_timeout, "descend", self.surface.descend(&child.handle)).await?;
        let level = self.state.depth();
        self.state.push(PathStep {
            level,
            name: child.name.clone(),
            index,
        });
        debug!("Descended into '{}' (level {}, key {})", child.name, level, self.state.current_path_key());
        Ok(())
    }

    /// Ascend one level and drop the last step.
    ///
    /// Returns `None` when the surface refuses to move up; the search treats
    /// that as a dead stop rather than an error.
    pub(crate) async fn ascend(&mut self) -> NavResult<Option<PathStep>> {
        if self.state.depth() == 0 {
            return Err(NavError::Invariant(
                "ascend requested with an empty navigation path".to_string(),
            ));
        }

        if let Err(e) = timed(self.op_timeout, "ascend", self.surface.ascend()).await {
            warn!("Cannot ascend from {}: {}", self.state.current_path_key(), e);
            return Ok(None);
        }

        let step = self.state.pop().ok_or_else(|| {
            NavError::Invariant("navigation path emptied during ascend".to_string())
        })?;
        debug!("Ascended out of '{}' (level {})", step.name, step.level);
        Ok(Some(step))
    }

    /// Pick an unvisited child of the current node, preferring a hint match
    pub(crate) fn pick_child(
        &mut self,
        children: &[Child<S::Handle>],
        hint: Option<&str>,
    ) -> Option<usize> {
        let candidates: Vec<usize> = (0..children.len())
            .filter(|&i| !self.state.is_visited(&self.state.child_key(i)))
            .collect();
        self.choose(children, candidates, hint)
    }

    fn choose(
        &mut self,
        children: &[Child<S::Handle>],
        candidates: Vec<usize>,
        hint: Option<&str>,
    ) -> Option<usize> {
        if let Some(hint) = hint {
            for wanted in [MatchKind::Exact, MatchKind::Contains] {
                if let Some(&index) = candidates
                    .iter()
                    .find(|&&i| hint_matches(hint, &children[i].name) == Some(wanted))
                {
                    debug!("Hint '{}' selects '{}' ({:?})", hint, children[index].name, wanted);
                    return Some(index);
                }
            }
        }
        candidates.choose(&mut *self.rng).copied()
    }

    /// Start a fresh top-level branch. Must be called at the root.
    ///
    /// Returns `false` when no untried branch remains.
    pub(crate) async fn enter_new_branch(&mut self, hint: Option<&str>) -> NavResult<bool> {
        if self.state.depth() != 0 {
            return Err(NavError::Invariant(format!(
                "new top-level branch requested at depth {}",
                self.state.depth()
            )));
        }

        let branches = self.list_children().await?;
        if branches.is_empty() {
            debug!("No top-level branches");
            return Ok(false);
        }

        let candidates: Vec<usize> = (0..branches.len())
            .filter(|&i| !self.state.is_branch_visited(i))
            .collect();
        let Some(index) = self.choose(&branches, candidates, hint) else {
            debug!("All {} top-level branches tried", branches.len());
            return Ok(false);
        };

        self.state.begin_branch(index);
        self.descend(&branches[index], index).await?;
        Ok(true)
    }

    /// Dead end at the current node: back out one level, or switch to a new
    /// top-level branch when the whole branch is dead.
    pub(crate) async fn backtrack(&mut self, top_hint: Option<&str>) -> NavResult<Backtrack> {
        match self.state.depth() {
            0 => Err(NavError::Invariant(
                "dead end reported at the root".to_string(),
            )),
            1 => {
                let Some(step) = self.ascend().await? else {
                    return Ok(Backtrack::Stuck);
                };
                warn!("Top-level branch '{}' is dead, abandoning it", step.name);
                if self.enter_new_branch(top_hint).await? {
                    Ok(Backtrack::Continue)
                } else {
                    Ok(Backtrack::Exhausted)
                }
            }
            _ => {
                let dead = self.state.current_path_key();
                if self.ascend().await?.is_none() {
                    return Ok(Backtrack::Stuck);
                }
                debug!("Marking {} dead", dead);
                self.state.mark_visited(dead);
                Ok(Backtrack::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{MemoryTree, TreeNode};

    fn tree() -> MemoryTree {
        MemoryTree::new(TreeNode::branch(
            "root",
            vec![
                TreeNode::branch("Decor", vec![TreeNode::leaf("Balloons")]),
                TreeNode::branch("Catering", vec![]),
            ],
        ))
    }

    #[tokio::test]
    async fn test_ascend_at_root_is_invariant_violation() {
        let mut surface = tree();
        let mut rng = StdRng::seed_from_u64(1);
        let mut walk = Walk::new(&mut surface, &mut rng, &SearchConfig::default());

        let err = walk.ascend().await.unwrap_err();
        assert!(matches!(err, NavError::Invariant(_)));
    }

    #[tokio::test]
    async fn test_hint_overrides_random_choice() {
        let mut surface = tree();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut walk = Walk::new(&mut surface, &mut rng, &SearchConfig::default());
            assert!(walk.enter_new_branch(Some("catering")).await.unwrap());
            assert_eq!(walk.state.path().names(), vec!["Catering"]);
            walk.ascend().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_backtrack_switches_branch_then_exhausts() {
        let mut surface = tree();
        let mut rng = StdRng::seed_from_u64(3);
        let mut walk = Walk::new(&mut surface, &mut rng, &SearchConfig::default());

        assert!(walk.enter_new_branch(None).await.unwrap());
        assert_eq!(walk.backtrack(None).await.unwrap(), Backtrack::Continue);
        assert_eq!(walk.depth(), 1);
        assert_eq!(walk.state.visited_branch_count(), 2);
        assert_eq!(walk.backtrack(None).await.unwrap(), Backtrack::Exhausted);
        assert_eq!(walk.depth(), 0);
    }

    #[tokio::test]
    async fn test_backtrack_marks_left_node_dead() {
        let mut surface = tree();
        let mut rng = StdRng::seed_from_u64(0);
        let mut walk = Walk::new(&mut surface, &mut rng, &SearchConfig::default());

        assert!(walk.enter_new_branch(Some("Decor")).await.unwrap());
        let children = walk.list_children().await.unwrap();
        walk.descend(&children[0], 0).await.unwrap();
        let leaf_key = walk.state.current_path_key();

        assert_eq!(walk.backtrack(None).await.unwrap(), Backtrack::Continue);
        assert_eq!(walk.depth(), 1);
        assert!(walk.state.is_visited(&leaf_key));
        assert_eq!(walk.pick_child(&children, None), None);
    }
}
