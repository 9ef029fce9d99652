//! Error type and specification builders shared by harness tests.

use spring_types::{EndType, SpringSpecification};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("feature not found: {name}")]
    FeatureNotFound { name: String },

    #[error("no result for feature: {name}")]
    NoResult { name: String },

    #[error("no solid for feature: {name}")]
    NoSolid { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("engine error: {0}")]
    Engine(String),

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },
}

// ── Specification Builders ──────────────────────────────────────────────────

/// Stock compression spring with the given end condition.
///
/// Inactive-coil values for the table-driven end types are filled in by the
/// engine's enumeration cascade on the first recompute, so tests only need
/// to set them for [`EndType::UserSpecified`].
pub fn compression_with_end(end_type: EndType) -> SpringSpecification {
    let mut spec = SpringSpecification::compression();
    spec.end_type = end_type;
    if end_type == EndType::UserSpecified {
        spec.coils_inactive = 2.0;
    }
    spec
}

/// Compression spring with a degenerate wire diameter.
///
/// Properties still derive (with zeroed stress terms) but sweep profile
/// construction has nothing to work with, so synthesis must fail.
pub fn degenerate_compression() -> SpringSpecification {
    let mut spec = SpringSpecification::compression();
    spec.wire_diameter = 0.0;
    spec
}
