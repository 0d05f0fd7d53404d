//! Common types and utilities shared across Audita crates.
//!
//! This crate defines the analysis policy types, observability helpers, and
//! the shared error taxonomy used throughout the Audita workspace. It is
//! intentionally lightweight and dependency‑minimal so that all crates can
//! depend on it without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`AnalysisSettings`]: Per‑session analysis policy
//! - [`SourceFallback`]: What to do when the provider returns no citations
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`AuditaError`] and [`Result`]: Shared error handling
use serde::{Deserialize, Serialize};

pub mod observability;

/// Policy applied when the provider attaches no grounding citations to an
/// otherwise valid response.
///
/// The fallback is fixed per deployment via configuration; it is never
/// varied per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFallback {
    /// Emit exactly one synthetic source pointing at the canonical profile
    /// URL of the analyzed handle.
    SyntheticProfileLink,
    /// Leave the source list empty.
    None,
}

impl Default for SourceFallback {
    fn default() -> Self {
        Self::SyntheticProfileLink
    }
}

/// Policy knobs for a single analysis session.
///
/// ```rust
/// use audita_common::{AnalysisSettings, SourceFallback};
///
/// let settings = AnalysisSettings::default();
/// assert_eq!(settings.timeout_secs, 90);
/// assert_eq!(settings.source_fallback, SourceFallback::SyntheticProfileLink);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Client-side deadline for the provider call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Behavior when the response carries zero grounding citations.
    #[serde(default)]
    pub source_fallback: SourceFallback,
}

fn default_timeout_secs() -> u64 {
    90
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            source_fallback: SourceFallback::default(),
        }
    }
}

/// Error types used across the Audita system.
///
/// Every fatal category surfaces to the caller as a single "analysis
/// failed" outcome with a distinguishing message; none are retried
/// automatically.
#[derive(thiserror::Error, Debug)]
pub enum AuditaError {
    /// Configuration was incomplete or invalid (e.g. missing API key).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The model provider was unreachable or returned a transport/API error.
    #[error("Provider unavailable: {0}")]
    Provider(String),

    /// The response body could not be parsed as schema-conformant JSON.
    #[error("Analysis parse error: {0}")]
    Parse(String),

    /// The parsed response did not conform to the declared output schema
    /// (required field absent or structurally wrong).
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The provider signalled that the profile could not be located.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// The user-supplied input was unusable before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The export collaborator failed to produce the report artifact.
    #[error("Export error: {0}")]
    Export(String),

    /// The provider call exceeded the configured deadline.
    #[error("Analysis timed out after {0}s")]
    Timeout(u64),
}

/// Convenient alias for results that use [`AuditaError`].
pub type Result<T> = std::result::Result<T, AuditaError>;
