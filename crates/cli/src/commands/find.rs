//! Named (guided) search command

use clap::Args;
use tracing::{debug, warn};
use treenav_navigator::Navigator;

use super::SearchArgs;
use crate::output::{print_report, OutputFormat, SearchReport};

#[derive(Args, Debug)]
pub struct FindArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Name of the leaf to find
    #[arg(long)]
    pub target: String,

    /// Branch name hint, one per level from the top
    #[arg(long = "hint")]
    pub hints: Vec<String>,

    /// Treat a fallback or containment match as a miss
    #[arg(long)]
    pub strict: bool,
}

/// Returns whether the target (or an acceptable stand-in) was selected
pub async fn execute(args: FindArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let config = args.search.search_config()?;
    let tree = args.search.load_tree()?;
    debug!("Looking for '{}' with hints {:?}", args.target, args.hints);

    let mut nav = Navigator::new(tree);
    let outcome = nav.search_named(&args.target, &args.hints, &config).await?;

    if outcome.found && !outcome.matched_exact {
        warn!("Selected item is not an exact match for '{}'", args.target);
    }

    print_report(
        &SearchReport {
            mode: "find",
            success: outcome.found,
            matched_exact: Some(outcome.matched_exact),
            path: outcome.path,
            attempts: outcome.attempts,
        },
        format,
    );
    Ok(outcome.found && (outcome.matched_exact || !args.strict))
}
