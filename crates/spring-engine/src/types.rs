use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spring_geom::SolidResult;
use spring_kernel::ShapeClass;
use spring_types::{DerivedProperties, HelixSegment, SpringSpecification};

/// A single spring feature owned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Unique identifier.
    pub id: Uuid,
    /// User-visible name.
    pub name: String,
    /// Independent inputs of this spring.
    pub spec: SpringSpecification,
    /// Suppressed features are skipped during recompute.
    pub suppressed: bool,
}

impl Feature {
    pub fn new(name: impl Into<String>, spec: SpringSpecification) -> Feature {
        Feature {
            id: Uuid::new_v4(),
            name: name.into(),
            spec,
            suppressed: false,
        }
    }
}

/// Everything one successful recompute produced for a feature.
///
/// A failed recompute leaves the previous result in place; the failure is
/// reported through [`crate::Engine::errors`] instead.
#[derive(Debug, Clone)]
pub struct FeatureResult {
    pub properties: DerivedProperties,
    pub segments: Vec<HelixSegment>,
    pub solid: SolidResult,
}

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("feature not found: {id}")]
    FeatureNotFound { id: Uuid },

    #[error("kernel error: {0}")]
    Kernel(#[from] spring_kernel::KernelError),

    #[error("synthesis produced a {class:?} shape, not a solid")]
    NotSolid { class: ShapeClass },
}
