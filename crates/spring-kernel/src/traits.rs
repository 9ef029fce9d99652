use crate::types::*;

/// Core geometry kernel trait. Provides all path construction, sweep, and
/// solidification operations the spring features need.
/// Implemented by AnalyticKernel (deterministic in-process backend, also
/// the test double).
pub trait Kernel {
    /// Create a helix path of the given pitch, height, and coil radius
    /// around the Z axis, starting at angle 0 and z 0.
    ///
    /// The pitch magnitude is floored to [`MIN_PITCH`] before use; a
    /// radius or height at or below tolerance is an error.
    fn make_helix(
        &mut self,
        pitch: f64,
        height: f64,
        radius: f64,
        left_handed: bool,
    ) -> Result<PathHandle, KernelError>;

    /// Re-place a path at a base Z offset and start rotation angle,
    /// returning a new path handle.
    fn place_path(&mut self, path: &PathHandle, z: f64, angle: f64)
        -> Result<PathHandle, KernelError>;

    /// Join contiguous paths end-to-start into one path. Errors if any
    /// consecutive pair does not meet within tolerance.
    fn join_paths(&mut self, segments: &[PathHandle]) -> Result<PathHandle, KernelError>;

    /// Start point and unit tangent of a path.
    fn path_start(&self, path: &PathHandle) -> Result<([f64; 3], [f64; 3]), KernelError>;

    /// Create a circular profile wire centered at `center` in the plane
    /// with the given normal.
    fn make_circle(
        &mut self,
        radius: f64,
        center: [f64; 3],
        normal: [f64; 3],
    ) -> Result<ProfileHandle, KernelError>;

    /// Sweep a profile along a path. `solid_hint` asks for a solid result,
    /// but backends may still hand back a shell; `frenet` selects
    /// tangent-following profile orientation.
    fn sweep(
        &mut self,
        path: &PathHandle,
        profile: &ProfileHandle,
        solid_hint: bool,
        frenet: bool,
    ) -> Result<ShapeHandle, KernelError>;

    /// Axis-aligned box solid from a corner and positive extents.
    fn make_box(&mut self, origin: [f64; 3], size: [f64; 3]) -> Result<ShapeHandle, KernelError>;

    /// Boolean subtraction: shape minus tool.
    fn boolean_subtract(
        &mut self,
        shape: &ShapeHandle,
        tool: &ShapeHandle,
    ) -> Result<ShapeHandle, KernelError>;

    /// Rigid translation of a shape, returning a new handle.
    fn translate(
        &mut self,
        shape: &ShapeHandle,
        offset: [f64; 3],
    ) -> Result<ShapeHandle, KernelError>;

    /// Topological classification. Unknown handles classify as Null.
    fn classify(&self, shape: &ShapeHandle) -> ShapeClass;

    /// Direct shell-to-solid conversion. Fails when the shape is not a
    /// closed shell.
    fn solid_from_shell(&mut self, shape: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Generic solidification of any non-null shape.
    fn make_solid(&mut self, shape: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Repair a damaged shape and sew its faces back into a shell.
    fn fix_and_sew(&mut self, shape: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Extract the first piece of a compound.
    fn extract_piece(&mut self, compound: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Bounding box of a shape.
    fn bounding_box(&self, shape: &ShapeHandle) -> Result<BoundingBox, KernelError>;
}
