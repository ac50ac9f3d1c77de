//! Leverage caps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Risk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Cap applied to symbols without an entry in `caps`.
    #[serde(default = "default_max_leverage")]
    pub default_max_leverage: u32,
    /// Per-symbol leverage caps.
    #[serde(default)]
    pub caps: HashMap<Symbol, u32>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            default_max_leverage: default_max_leverage(),
            caps: HashMap::new(),
        }
    }
}

const fn default_max_leverage() -> u32 {
    20
}
