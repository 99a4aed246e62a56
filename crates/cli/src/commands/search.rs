//! Exploratory search command

use clap::{Args, ValueEnum};
use tracing::debug;
use treenav_navigator::{ActiveLeafGoal, Navigator, SurfaceGoal};

use super::SearchArgs;
use crate::output::{print_report, OutputFormat, SearchReport};

/// Which goal predicate to search for
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum GoalKind {
    /// Nodes flagged `goal: true` in the fixture
    #[default]
    Flagged,
    /// Leaf listings with at least one active item
    ActiveLeaf,
}

#[derive(Args, Debug)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Goal predicate
    #[arg(long, value_enum, default_value_t)]
    pub goal: GoalKind,
}

/// Returns whether a goal node was reached
pub async fn execute(args: ExploreArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let config = args.search.search_config()?;
    let tree = args.search.load_tree()?;
    debug!("Exploring {} with {:?}", args.search.tree.display(), config);

    let mut nav = Navigator::new(tree);
    let outcome = match args.goal {
        GoalKind::Flagged => nav.search(&SurfaceGoal, &config).await?,
        GoalKind::ActiveLeaf => nav.search(&ActiveLeafGoal, &config).await?,
    };

    print_report(
        &SearchReport {
            mode: "search",
            success: outcome.success,
            matched_exact: None,
            path: outcome.path,
            attempts: outcome.attempts,
        },
        format,
    );
    Ok(outcome.success)
}
