//! Variable pool configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a `VariablePool`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Index handed out by the first fresh request for a name
    pub first_index: u64,
    /// Name used for fresh variables requested from the pool itself
    pub anonymous_name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            first_index: 1,
            anonymous_name: String::new(),
        }
    }
}
