//! Host-facing orchestration of spring features.
//!
//! One recompute event per feature runs the enumeration resolver, the
//! dependent-property calculator, the helix segment planner, and the solid
//! synthesis controller, in that order, on the calling thread.

pub mod engine;
pub mod types;

pub use engine::Engine;
pub use types::{EngineError, Feature, FeatureResult};
