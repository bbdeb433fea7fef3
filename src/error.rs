use thiserror::Error;

use crate::category::ContentCategory;

/// Errors surfaced by the generation core.
///
/// Validation findings are not errors — they travel in
/// [`ValidationResult`](crate::validate::ValidationResult). Quality and
/// stability degradation never surface here either; they are read from the
/// quality report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    /// Malformed or out-of-range parameters, reported before any generation work.
    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },

    /// A generator with this (namespace, name) pair is already registered.
    #[error("generator already registered: {namespace}/{name}")]
    DuplicateGenerator { namespace: String, name: String },

    /// No generator registered under this (namespace, name) pair.
    #[error("generator not found: {namespace}/{name}")]
    GeneratorNotFound { namespace: String, name: String },

    /// A generator returned an artifact of a different category than requested.
    #[error("category mismatch: expected {expected}, got {actual}")]
    CategoryMismatch {
        expected: ContentCategory,
        actual: ContentCategory,
    },

    /// The caller-supplied deadline elapsed at a call boundary.
    #[error("deadline exceeded after {elapsed_ms}ms")]
    DeadlineExceeded { elapsed_ms: u64 },

    /// A generator implementation failed while producing content.
    #[error("generator {generator} failed: {reason}")]
    Produce { generator: String, reason: String },

    /// Seed snapshot could not be serialized or deserialized.
    #[error("seed snapshot error: {0}")]
    Snapshot(String),
}

impl GenError {
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        GenError::InvalidParams {
            reason: reason.into(),
        }
    }
}
