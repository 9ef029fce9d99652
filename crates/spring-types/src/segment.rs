use serde::{Deserialize, Serialize};

/// One planned helix segment of a spring path.
///
/// Ephemeral: produced by the planner and consumed by the synthesis
/// controller within one recompute. `start_z` and `start_angle` are the
/// cumulative placement needed to continue the path contiguously after the
/// previous segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelixSegment {
    /// Which region of the spring this segment forms.
    pub region: SegmentRegion,
    /// Mean coil radius of the helix.
    pub radius: f64,
    pub pitch: f64,
    /// Signed axial height; the path always grows +Z by its magnitude.
    pub height: f64,
    pub coils: f64,
    /// Z offset where this segment starts.
    pub start_z: f64,
    /// Winding angle (radians) accumulated by the preceding segments.
    pub start_angle: f64,
    pub left_handed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SegmentRegion {
    BottomClosed,
    BottomTransition,
    Active,
    TopTransition,
    TopClosed,
}

impl HelixSegment {
    /// Winding angle (radians) swept by this segment, signed by handedness.
    pub fn delta_angle(&self) -> f64 {
        let turn = self.coils * 2.0 * std::f64::consts::PI;
        if self.left_handed {
            -turn
        } else {
            turn
        }
    }

    /// Z where the segment ends.
    pub fn end_z(&self) -> f64 {
        self.start_z + self.height.abs()
    }
}
