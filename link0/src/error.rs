//! Error types for each collaborator boundary.
//!
//! Backend-computed refusals ("required parameters unobtainable",
//! "cannot generate code for this environment") are NOT errors here —
//! they are data, carried by [`crate::TransformOutcome::Failed`] and
//! [`crate::CodegenOutcome::Failed`] and rendered inline for the user.
//! These enums cover the transport and protocol layer underneath.

use thiserror::Error;

/// Agent catalog errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The caller is not authorized for this catalog.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The catalog rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The catalog service is down or overloaded. Retrying may succeed.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// A network-level failure before any response arrived.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response arrived but could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Environment simulation and code generation errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The caller is not authorized for the simulation service.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The simulation service rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The simulation service is down or overloaded. Retrying may succeed.
    #[error("simulation unavailable: {0}")]
    Unavailable(String),

    /// A network-level failure before any response arrived.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response arrived but could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Draft store errors. Draft persistence is best-effort: callers log
/// these and carry on rather than aborting the edit.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DraftError {
    /// Reading the slot failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Writing the slot failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Transform evaluation errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EvalError {
    /// The source code failed to parse/compile inside the sandbox.
    #[error("compile error: {0}")]
    Compile(String),

    /// The code ran but threw or produced no value.
    #[error("evaluation failed: {0}")]
    Failed(String),

    /// The code attempted to reach host state beyond the declared input.
    #[error("sandbox violation: {0}")]
    SandboxViolation(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
