//! Tree Navigator
//!
//! Walks an a-priori unknown, lazily revealed category tree using only two
//! moves, descend into a child and ascend one level, with bounded retries
//! and backtracking out of dead branches.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Navigator<S, R>                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  search(goal, config)          -> SearchOutcome             │
//! │  search_named(target, hints)   -> NamedSearchOutcome        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchState (per call)                                     │
//! │    ├── NavigationPath: [PathStep { level, name, index }]    │
//! │    ├── VisitedSet: dead PathKeys in the current branch      │
//! │    └── VisitedBranches: abandoned top-level branches        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TreeSurface (implemented by the UI layer)                  │
//! │    list_children / is_goal_node / is_leaf_listing           │
//! │    is_active / descend / ascend                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod explore;
pub mod fixture;
pub mod guided;
pub mod matching;
pub mod navigator;
pub mod state;
pub mod surface;

pub use config::SearchConfig;
pub use error::{NavError, NavResult};
pub use explore::SearchOutcome;
pub use fixture::{MemoryTree, TreeNode};
pub use guided::NamedSearchOutcome;
pub use navigator::Navigator;
pub use state::{NavigationPath, PathKey, PathStep, SearchState};
pub use surface::{ActiveLeafGoal, Child, GoalPredicate, SurfaceGoal, TreeSurface};

/// Navigator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
