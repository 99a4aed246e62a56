//! Tree Surface contract
//!
//! The navigator never sees the tree as a whole. It only observes the
//! children of the node the surface is currently positioned on, and moves
//! that position one level at a time.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::NavResult;

/// One visible child of the current node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child<H> {
    pub name: String,
    pub handle: H,
}

impl<H> Child<H> {
    pub fn new(name: impl Into<String>, handle: H) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// A lazily revealed hierarchy with a single current position
#[async_trait]
pub trait TreeSurface: Send + Sync {
    /// Opaque reference to a listed child, valid until the next move
    type Handle: Clone + Debug + Send + Sync;

    /// Children of the current node in display order
    async fn list_children(&self) -> NavResult<Vec<Child<Self::Handle>>>;

    /// Whether the current node satisfies the caller's goal
    async fn is_goal_node(&self) -> NavResult<bool>;

    /// Whether the current node is a terminal listing of selectable items
    async fn is_leaf_listing(&self) -> NavResult<bool>;

    /// Whether a listed item is selectable
    async fn is_active(&self, handle: &Self::Handle) -> NavResult<bool>;

    /// Move into a previously listed child
    async fn descend(&mut self, handle: &Self::Handle) -> NavResult<()>;

    /// Move to the parent of the current node
    async fn ascend(&mut self) -> NavResult<()>;
}

/// Goal test evaluated at the surface's current node
#[async_trait]
pub trait GoalPredicate<S: TreeSurface + ?Sized>: Send + Sync {
    async fn test(&self, surface: &S) -> NavResult<bool>;
}

/// Delegates to [`TreeSurface::is_goal_node`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceGoal;

#[async_trait]
impl<S: TreeSurface + ?Sized> GoalPredicate<S> for SurfaceGoal {
    async fn test(&self, surface: &S) -> NavResult<bool> {
        surface.is_goal_node().await
    }
}

/// Current node is a leaf listing with at least one active item.
///
/// This is the "any available service" check most flows need before they
/// can pick something to edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveLeafGoal;

#[async_trait]
impl<S: TreeSurface + ?Sized> GoalPredicate<S> for ActiveLeafGoal {
    async fn test(&self, surface: &S) -> NavResult<bool> {
        if !surface.is_leaf_listing().await? {
            return Ok(false);
        }
        for item in surface.list_children().await? {
            if surface.is_active(&item.handle).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
