//! Error types shared by the registries and the evolution loop.

use crate::evo::BoxError;

/// Errors raised while configuring or running a search.
///
/// Configuration errors (`Duplicate*`, `ZeroArity`, `NoObjectives`,
/// `InvalidConfig`) are reported before the loop starts. Faults carry the
/// failing operator's name and its original error as `source`.
#[derive(Debug, thiserror::Error)]
pub enum EvoError {
    #[error("Objective '{0}' is already registered")]
    DuplicateObjective(String),

    #[error("Agent '{0}' is already registered")]
    DuplicateAgent(String),

    #[error("Agent '{0}' must consume at least one solution")]
    ZeroArity(String),

    #[error("At least one objective must be registered")]
    NoObjectives,

    #[error("Population is scored by objectives {expected:?}, got {found:?}")]
    ObjectiveMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Agent '{agent}' failed: {source}")]
    AgentFault {
        agent: String,
        #[source]
        source: BoxError,
    },

    #[error("Objective '{objective}' failed: {source}")]
    ObjectiveFault {
        objective: String,
        #[source]
        source: BoxError,
    },
}
