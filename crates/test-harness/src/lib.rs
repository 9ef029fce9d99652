//! Test harness for scripted spring-design workflows.
//!
//! Drives the real engine recompute path end to end and verifies the
//! outcome at every step, with diagnostic output on failure.
//!
//! # Key Components
//!
//! - [`SpringBuilder`] — Fluent API for building and verifying spring features
//! - [`helpers`] — Specification builders and the shared error type
//! - [`assertions`] — Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod workflow;

pub use helpers::HarnessError;
pub use workflow::SpringBuilder;
