//! Exclusion error types

use thiserror::Error;

/// Failure of a single mechanism attempt.
///
/// These never escape [`crate::ExclusionManager::apply`]; the orchestrator
/// folds them into attempt records and the final outcome. Both variants are
/// ordinary fallback triggers, not user-facing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExclusionError {
    /// Required capture-control library/API is not present on this host
    #[error("capture-control library unavailable: {0}")]
    CapabilityAbsent(&'static str),

    /// Platform call executed but returned a failure status
    #[error("platform call rejected (status {code:#x})")]
    CallRejected { code: i64 },
}

/// Result type alias for mechanism attempts
pub type ExclusionResult<T> = Result<T, ExclusionError>;
