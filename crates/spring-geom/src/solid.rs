//! Solid synthesis and recovery controller.
//!
//! Drives a [`Kernel`] from planned segments to a classified shape:
//! path build, profile at the start tangent, sweep, optional end grinding,
//! then an ordered solidification fallback chain. Kernel failures never
//! propagate as errors; the controller lands in `Failed` carrying the best
//! shape it reached.

use serde::{Deserialize, Serialize};

use spring_kernel::{Kernel, KernelError, PathHandle, ShapeClass, ShapeHandle};
use spring_types::{EndType, HelixSegment};

/// Progress of one synthesis run. `Ground` is skipped for non-ground end
/// types; `Solidified` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisState {
    Planned,
    Swept,
    Ground,
    Solidified,
    Failed,
}

/// Which step of the solidification fallback chain produced a solid.
/// Variants are ordered; the chain stops at the first success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidifyStrategy {
    AlreadySolid,
    ShellToSolid,
    MakeSolid,
    RepairAndSew,
}

impl SolidifyStrategy {
    /// Position in the fallback chain, 0 first.
    pub fn index(&self) -> usize {
        match self {
            SolidifyStrategy::AlreadySolid => 0,
            SolidifyStrategy::ShellToSolid => 1,
            SolidifyStrategy::MakeSolid => 2,
            SolidifyStrategy::RepairAndSew => 3,
        }
    }
}

/// Outcome of a synthesis run. `Failed` still carries the best non-solid
/// shape reached; callers must inspect `class` rather than assume a solid.
#[derive(Debug, Clone)]
pub struct SolidResult {
    pub shape: Option<ShapeHandle>,
    pub class: ShapeClass,
    pub state: SynthesisState,
    pub strategy: Option<SolidifyStrategy>,
}

impl SolidResult {
    pub fn is_solid(&self) -> bool {
        self.class == ShapeClass::Solid
    }

    fn failed(kernel: &dyn Kernel, shape: Option<ShapeHandle>) -> SolidResult {
        let class = shape
            .as_ref()
            .map(|s| kernel.classify(s))
            .unwrap_or(ShapeClass::Null);
        SolidResult {
            shape,
            class,
            state: SynthesisState::Failed,
            strategy: None,
        }
    }
}

/// Synthesize a compression-spring solid from planned segments.
///
/// Any segment whose helix construction fails aborts the whole plan; no
/// partial shape is returned. Grinding applies only to ground end types,
/// cutting with two oversized slabs flush against the axial boundaries.
/// Non-ground Open and Closed springs are re-centered half a wire diameter
/// up so the wire bottom rests on z = 0.
pub fn synthesize_solid(
    kernel: &mut dyn Kernel,
    segments: &[HelixSegment],
    wire_radius: f64,
    end_type: EndType,
) -> SolidResult {
    if segments.is_empty() {
        return SolidResult::failed(kernel, None);
    }

    let path = match build_path(kernel, segments) {
        Ok(path) => path,
        Err(_) => return SolidResult::failed(kernel, None),
    };

    let mut shape = match sweep_profile(kernel, &path, wire_radius) {
        Ok(shape) => shape,
        Err(_) => return SolidResult::failed(kernel, None),
    };

    if end_type.is_ground() {
        let z_top = segments.last().map(HelixSegment::end_z).unwrap_or(0.0);
        match grind_ends(kernel, &shape, 0.0, z_top, wire_radius) {
            Ok(ground) => shape = ground,
            Err(_) => return SolidResult::failed(kernel, Some(shape)),
        }
    }

    let mut result = solidify(kernel, shape);

    // Open and Closed (non-ground) springs sweep from z = -wire_radius;
    // shift up so the solid sits on the base plane.
    if matches!(end_type, EndType::Open | EndType::Closed) {
        if let Some(current) = result.shape.take() {
            match kernel.translate(&current, [0.0, 0.0, wire_radius]) {
                Ok(moved) => result.shape = Some(moved),
                Err(_) => result.shape = Some(current),
            }
        }
    }
    result
}

/// Synthesize a plain single-coil solid, used by extension and torsion
/// springs. The kernel floors the pitch magnitude, so a zero pitch sweeps
/// a flat coil instead of failing.
pub fn synthesize_coil(
    kernel: &mut dyn Kernel,
    radius: f64,
    pitch: f64,
    height: f64,
    wire_radius: f64,
    left_handed: bool,
) -> SolidResult {
    let path = match kernel.make_helix(pitch, height, radius, left_handed) {
        Ok(path) => path,
        Err(_) => return SolidResult::failed(kernel, None),
    };
    let swept = match sweep_profile(kernel, &path, wire_radius) {
        Ok(shape) => shape,
        Err(_) => return SolidResult::failed(kernel, None),
    };
    solidify(kernel, swept)
}

/// Place each segment at its cumulative z and winding angle, then join
/// them into one contiguous path.
fn build_path(
    kernel: &mut dyn Kernel,
    segments: &[HelixSegment],
) -> Result<PathHandle, KernelError> {
    let mut placed = Vec::with_capacity(segments.len());
    for segment in segments {
        let helix = kernel.make_helix(
            segment.pitch,
            segment.height.abs(),
            segment.radius,
            segment.left_handed,
        )?;
        placed.push(kernel.place_path(&helix, segment.start_z, segment.start_angle)?);
    }
    kernel.join_paths(&placed)
}

/// Circle profile at the path start, oriented to the start tangent, swept
/// along the path.
fn sweep_profile(
    kernel: &mut dyn Kernel,
    path: &PathHandle,
    wire_radius: f64,
) -> Result<ShapeHandle, KernelError> {
    let (start, tangent) = kernel.path_start(path)?;
    let profile = kernel.make_circle(wire_radius, start, tangent)?;
    kernel.sweep(path, &profile, true, true)
}

/// Cut both end faces flat with oversized slabs one wire diameter thick,
/// sitting just outside the axial boundaries.
fn grind_ends(
    kernel: &mut dyn Kernel,
    shape: &ShapeHandle,
    z_bottom: f64,
    z_top: f64,
    wire_radius: f64,
) -> Result<ShapeHandle, KernelError> {
    let wire = 2.0 * wire_radius;
    let bbox = kernel.bounding_box(shape)?.inflated(wire);
    let footprint = [bbox.extent(0), bbox.extent(1)];

    let bottom = kernel.make_box(
        [bbox.min[0], bbox.min[1], z_bottom - wire],
        [footprint[0], footprint[1], wire],
    )?;
    let top = kernel.make_box(
        [bbox.min[0], bbox.min[1], z_top],
        [footprint[0], footprint[1], wire],
    )?;

    let cut = kernel.boolean_subtract(shape, &bottom)?;
    kernel.boolean_subtract(&cut, &top)
}

/// Ordered solidification fallback chain, stopping at the first strategy
/// that yields a solid. A compound left by grinding has its first piece
/// extracted before the chain runs. Exhausting the chain lands in `Failed`
/// with the best (non-solid) shape kept.
fn solidify(kernel: &mut dyn Kernel, shape: ShapeHandle) -> SolidResult {
    let mut current = shape;
    if kernel.classify(&current) == ShapeClass::Compound {
        if let Ok(piece) = kernel.extract_piece(&current) {
            current = piece;
        }
    }

    let strategies = [
        SolidifyStrategy::AlreadySolid,
        SolidifyStrategy::ShellToSolid,
        SolidifyStrategy::MakeSolid,
        SolidifyStrategy::RepairAndSew,
    ];
    for strategy in strategies {
        match apply_strategy(kernel, strategy, &current) {
            Ok(candidate) if kernel.classify(&candidate) == ShapeClass::Solid => {
                return SolidResult {
                    shape: Some(candidate),
                    class: ShapeClass::Solid,
                    state: SynthesisState::Solidified,
                    strategy: Some(strategy),
                };
            }
            _ => {}
        }
    }

    let class = kernel.classify(&current);
    SolidResult {
        shape: Some(current),
        class,
        state: SynthesisState::Failed,
        strategy: None,
    }
}

fn apply_strategy(
    kernel: &mut dyn Kernel,
    strategy: SolidifyStrategy,
    shape: &ShapeHandle,
) -> Result<ShapeHandle, KernelError> {
    match strategy {
        SolidifyStrategy::AlreadySolid => {
            if kernel.classify(shape) == ShapeClass::Solid {
                Ok(shape.clone())
            } else {
                Err(KernelError::ConversionFailed {
                    class: kernel.classify(shape),
                })
            }
        }
        SolidifyStrategy::ShellToSolid => kernel.solid_from_shell(shape),
        SolidifyStrategy::MakeSolid => kernel.make_solid(shape),
        SolidifyStrategy::RepairAndSew => {
            let sewn = kernel.fix_and_sew(shape)?;
            kernel.make_solid(&sewn)
        }
    }
}
