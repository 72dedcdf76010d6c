//! Engine configuration options.

use serde::{Deserialize, Serialize};

/// Configuration options for engine validation behavior.
///
/// Use [`EngineConfig::strict()`] or [`EngineConfig::permissive()`], or
/// customize individual options.
///
/// # Example
///
/// ```rust
/// use trellis::EngineConfig;
///
/// let mut config = EngineConfig::default();
/// config.max_staged_mutations = Some(10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Check staged property values against their declared schema types.
    ///
    /// When disabled, only presence of required properties is enforced and
    /// any value type is accepted.
    pub strict_types: bool,

    /// Maximum number of staged mutations per transaction (None = unlimited).
    pub max_staged_mutations: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_types: true,
            max_staged_mutations: None,
        }
    }
}

impl EngineConfig {
    /// Full validation plus a per-transaction staged mutation bound.
    pub fn strict() -> Self {
        Self {
            strict_types: true,
            max_staged_mutations: Some(100_000),
        }
    }

    /// Presence-only validation: required properties are enforced, value
    /// types and transaction size are not.
    pub fn permissive() -> Self {
        Self {
            strict_types: false,
            max_staged_mutations: None,
        }
    }
}
