//! Exploratory search: randomized depth-bounded backtracking DFS that stops
//! at the first node passing a goal predicate.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::NavResult;
use crate::navigator::{Backtrack, Navigator, Walk};
use crate::state::NavigationPath;
use crate::surface::{GoalPredicate, TreeSurface};

/// Result of [`Navigator::search`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub success: bool,
    /// Path to the goal node, or to wherever the search stopped
    pub path: NavigationPath,
    /// Loop iterations spent
    pub attempts: usize,
}

impl SearchOutcome {
    fn failure(path: NavigationPath, attempts: usize) -> Self {
        Self {
            success: false,
            path,
            attempts,
        }
    }
}

impl<S: TreeSurface, R: RngCore + Send + Sync> Navigator<S, R> {
    /// Find any node for which `goal` holds.
    ///
    /// Dead ends and exhausted budgets yield `success: false`; only surface
    /// failures and state invariant violations are returned as errors.
    pub async fn search<G>(&mut self, goal: &G, config: &SearchConfig) -> NavResult<SearchOutcome>
    where
        G: GoalPredicate<S> + ?Sized,
    {
        if !config.has_budget() {
            debug!("Search skipped: non-positive budget {:?}", config);
            return Ok(SearchOutcome::failure(NavigationPath::default(), 0));
        }

        let mut reseeded: StdRng;
        let rng: &mut (dyn RngCore + Send + Sync) = match config.seed {
            Some(seed) => {
                reseeded = StdRng::seed_from_u64(seed);
                &mut reseeded
            }
            None => &mut self.rng,
        };
        let mut walk = Walk::new(&mut self.surface, rng, config);

        if !walk.enter_new_branch(None).await? {
            info!("Search failed: no top-level branch to explore");
            return Ok(SearchOutcome::failure(walk.state.into_path(), 0));
        }

        let max_attempts = config.max_attempts as usize;
        let max_levels = config.max_levels as usize;

        while walk.attempts < max_attempts {
            if walk.check("goal", goal.test(&*walk.surface)).await? {
                info!("Goal reached at '{}' after {} attempt(s)", walk.state.path(), walk.attempts);
                return Ok(SearchOutcome {
                    success: true,
                    attempts: walk.attempts,
                    path: walk.state.into_path(),
                });
            }

            walk.attempts += 1;

            let children = if walk.depth() >= max_levels {
                debug!("Depth limit {} reached at {}", max_levels, walk.state.current_path_key());
                Vec::new()
            } else {
                walk.list_children().await?
            };

            match walk.pick_child(&children, None) {
                Some(index) => {
                    walk.state.mark_visited(walk.state.child_key(index));
                    walk.descend(&children[index], index).await?;
                }
                None => match walk.backtrack(None).await? {
                    Backtrack::Continue => {}
                    Backtrack::Exhausted | Backtrack::Stuck => {
                        info!("Search failed: search space exhausted after {} attempt(s)", walk.attempts);
                        let attempts = walk.attempts;
                        return Ok(SearchOutcome::failure(walk.state.into_path(), attempts));
                    }
                },
            }
        }

        info!("Search failed: attempt budget of {} spent", max_attempts);
        let attempts = walk.attempts;
        Ok(SearchOutcome::failure(walk.state.into_path(), attempts))
    }
}
