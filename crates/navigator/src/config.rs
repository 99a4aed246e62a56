//! Search configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{NavError, NavResult};

/// Default number of loop iterations a single search may spend
pub const DEFAULT_MAX_ATTEMPTS: i64 = 50;

/// Default depth limit
pub const DEFAULT_MAX_LEVELS: i64 = 5;

/// Budgets and knobs for one `search` / `search_named` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Total descend/ascend iterations allowed
    pub max_attempts: i64,

    /// Maximum depth below the root
    pub max_levels: i64,

    /// Per-operation timeout applied to every surface call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op_timeout_ms: Option<u64>,

    /// Reseed the random source at the start of the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_levels: DEFAULT_MAX_LEVELS,
            op_timeout_ms: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Config with the given budgets and no timeout
    pub fn with_budget(max_attempts: i64, max_levels: i64) -> Self {
        Self {
            max_attempts,
            max_levels,
            ..Self::default()
        }
    }

    /// Load configuration from file, falling back to defaults if absent
    pub fn load(path: &Path) -> NavResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> NavResult<Self> {
        let config: Self = toml::from_str(content)?;
        if config.op_timeout_ms == Some(0) {
            return Err(NavError::InvalidConfig(
                "op_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> NavResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Both budgets are positive
    pub fn has_budget(&self) -> bool {
        self.max_attempts > 0 && self.max_levels > 0
    }

    pub fn op_timeout(&self) -> Option<Duration> {
        self.op_timeout_ms.map(Duration::from_millis)
    }
}
