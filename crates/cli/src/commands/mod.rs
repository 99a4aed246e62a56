//! CLI subcommands

pub mod find;
pub mod search;

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use treenav_navigator::{MemoryTree, SearchConfig};

/// Tree fixture and budget flags shared by every search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// YAML tree fixture to search
    #[arg(long)]
    pub tree: PathBuf,

    /// TOML file with search defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum loop iterations
    #[arg(long, allow_negative_numbers = true)]
    pub max_attempts: Option<i64>,

    /// Maximum depth
    #[arg(long, allow_negative_numbers = true)]
    pub max_levels: Option<i64>,

    /// Seed for reproducible branch choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-operation timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl SearchArgs {
    /// Config file values, overridden by any flags given
    pub fn search_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => SearchConfig::default(),
        };
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(max_levels) = self.max_levels {
            config.max_levels = max_levels;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.timeout_ms.is_some() {
            config.op_timeout_ms = self.timeout_ms;
        }
        Ok(config)
    }

    pub fn load_tree(&self) -> anyhow::Result<MemoryTree> {
        MemoryTree::from_file(&self.tree)
            .with_context(|| format!("loading tree {}", self.tree.display()))
    }
}
