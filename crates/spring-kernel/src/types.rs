use serde::{Deserialize, Serialize};

/// Smallest pitch magnitude the kernel will accept; `make_helix` floors
/// the requested pitch to this, preserving sign, instead of dividing by
/// zero downstream.
pub const MIN_PITCH: f64 = 1e-6;

/// Smallest meaningful length. Radii and heights at or below this are
/// degenerate and rejected.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Opaque handle to a path curve in the geometry kernel.
/// NEVER persisted. Valid only for the current kernel session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathHandle(pub(crate) u64);

/// Opaque handle to a planar profile wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileHandle(pub(crate) u64);

/// Opaque handle to a swept/boolean shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub(crate) u64);

impl PathHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

impl ProfileHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

impl ShapeHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Topological classification of a shape. Callers branch on this after a
/// synthesis attempt instead of catching errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeClass {
    Solid,
    Shell,
    Compound,
    Null,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Grow the box by `margin` on every side.
    pub fn inflated(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min: [
                self.min[0] - margin,
                self.min[1] - margin,
                self.min[2] - margin,
            ],
            max: [
                self.max[0] + margin,
                self.max[1] + margin,
                self.max[2] + margin,
            ],
        }
    }

    /// True when `other`'s X/Y footprint contains this box's footprint.
    pub fn covered_in_plan_by(&self, other: &BoundingBox) -> bool {
        other.min[0] <= self.min[0]
            && other.max[0] >= self.max[0]
            && other.min[1] <= self.min[1]
            && other.max[1] >= self.max[1]
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("degenerate helix: {reason}")]
    DegenerateHelix { reason: String },

    #[error("degenerate profile: radius {radius} below tolerance")]
    DegenerateProfile { radius: f64 },

    #[error("degenerate box: extent {extent} below tolerance")]
    DegenerateBox { extent: f64 },

    #[error("paths are not contiguous at joint {index}: gap {gap}")]
    DiscontinuousJoin { index: usize, gap: f64 },

    #[error("sweep failed: {reason}")]
    SweepFailed { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("cannot convert {class:?} shape to solid")]
    ConversionFailed { class: ShapeClass },

    #[error("shape repair failed: {reason}")]
    RepairFailed { reason: String },

    #[error("entity not found: {id}")]
    EntityNotFound { id: u64 },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },
}
