//! Guided search for a specific named leaf.
//!
//! Hints bias the choice at the first few levels, then the walk behaves
//! exactly like exploratory search until a leaf listing is reached. A
//! listing is scanned for the target and, failing that, the first active
//! item is taken instead.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::error::{NavError, NavResult};
use crate::matching::{is_verbatim, leaf_match, MatchKind};
use crate::navigator::{Backtrack, Navigator, Walk};
use crate::state::NavigationPath;
use crate::surface::{Child, TreeSurface};

/// Result of [`Navigator::search_named`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSearchOutcome {
    pub found: bool,
    /// The selected leaf is the target itself, not a containment match or
    /// a fallback pick. Callers that need the exact item must check this.
    pub matched_exact: bool,
    pub path: NavigationPath,
    pub attempts: usize,
}

impl NamedSearchOutcome {
    fn not_found(path: NavigationPath, attempts: usize) -> Self {
        Self {
            found: false,
            matched_exact: false,
            path,
            attempts,
        }
    }
}

/// Item chosen from a leaf listing
struct LeafPick<H> {
    index: usize,
    child: Child<H>,
    exact: bool,
}

impl<'a, S: TreeSurface> Walk<'a, S> {
    /// Scan the current leaf listing for `target`.
    ///
    /// `None` means the listing has no active item at all.
    async fn scan_listing(&self, target: &str) -> NavResult<Option<LeafPick<S::Handle>>> {
        let items = self.list_children().await?;

        let mut matches: Vec<(usize, MatchKind, bool)> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                leaf_match(target, &item.name).map(|kind| (i, kind, is_verbatim(target, &item.name)))
            })
            .collect();
        matches.sort_by_key(|&(_, kind, verbatim)| (kind, !verbatim));

        for (index, kind, _) in matches {
            if self.is_active(&items[index].handle).await? {
                return Ok(Some(LeafPick {
                    index,
                    child: items[index].clone(),
                    exact: kind == MatchKind::Exact,
                }));
            }
            debug!("Skipping inactive match '{}'", items[index].name);
        }

        for (index, item) in items.iter().enumerate() {
            if self.is_active(&item.handle).await? {
                warn!("'{}' not found in listing, falling back to '{}'", target, item.name);
                return Ok(Some(LeafPick {
                    index,
                    child: item.clone(),
                    exact: false,
                }));
            }
        }

        Ok(None)
    }
}

impl<S: TreeSurface, R: RngCore + Send + Sync> Navigator<S, R> {
    /// Find the leaf named `target`, optionally steered by `hints`
    /// (one branch-name hint per level, starting at the top).
    pub async fn search_named(
        &mut self,
        target: &str,
        hints: &[String],
        config: &SearchConfig,
    ) -> NavResult<NamedSearchOutcome> {
        if target.trim().is_empty() {
            return Err(NavError::InvalidArgument("target name must not be empty".to_string()));
        }
        if !config.has_budget() {
            debug!("Named search skipped: non-positive budget {:?}", config);
            return Ok(NamedSearchOutcome::not_found(NavigationPath::default(), 0));
        }

        let hint_at = |depth: usize| hints.get(depth).map(String::as_str);

        let mut reseeded: StdRng;
        let rng: &mut (dyn RngCore + Send + Sync) = match config.seed {
            Some(seed) => {
                reseeded = StdRng::seed_from_u64(seed);
                &mut reseeded
            }
            None => &mut self.rng,
        };
        let mut walk = Walk::new(&mut self.surface, rng, config);

        if !walk.enter_new_branch(hint_at(0)).await? {
            info!("'{}' not found: no top-level branch to explore", target);
            return Ok(NamedSearchOutcome::not_found(walk.state.into_path(), 0));
        }

        let max_attempts = config.max_attempts as usize;
        let max_levels = config.max_levels as usize;

        while walk.attempts < max_attempts {
            walk.attempts += 1;

            let dead_end = if walk.is_leaf_listing().await? {
                match walk.scan_listing(target).await? {
                    Some(pick) => {
                        walk.descend(&pick.child, pick.index).await?;
                        info!(
                            "Selected '{}' for '{}' (exact: {}) after {} attempt(s)",
                            pick.child.name, target, pick.exact, walk.attempts
                        );
                        return Ok(NamedSearchOutcome {
                            found: true,
                            matched_exact: pick.exact,
                            attempts: walk.attempts,
                            path: walk.state.into_path(),
                        });
                    }
                    None => {
                        debug!("Listing at {} has no active items", walk.state.current_path_key());
                        true
                    }
                }
            } else {
                let children = if walk.depth() >= max_levels {
                    debug!("Depth limit {} reached at {}", max_levels, walk.state.current_path_key());
                    Vec::new()
                } else {
                    walk.list_children().await?
                };

                match walk.pick_child(&children, hint_at(walk.depth())) {
                    Some(index) => {
                        walk.state.mark_visited(walk.state.child_key(index));
                        walk.descend(&children[index], index).await?;
                        false
                    }
                    None => true,
                }
            };

            if dead_end {
                match walk.backtrack(hint_at(0)).await? {
                    Backtrack::Continue => {}
                    Backtrack::Exhausted | Backtrack::Stuck => {
                        info!("'{}' not found: search space exhausted", target);
                        let attempts = walk.attempts;
                        return Ok(NamedSearchOutcome::not_found(walk.state.into_path(), attempts));
                    }
                }
            }
        }

        info!("'{}' not found: attempt budget of {} spent", target, max_attempts);
        let attempts = walk.attempts;
        Ok(NamedSearchOutcome::not_found(walk.state.into_path(), attempts))
    }
}
