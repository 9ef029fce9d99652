//! AnalyticKernel — deterministic in-process backend implementing Kernel.
//!
//! Shapes are symbolic records (classification + bounding box) but the path
//! math is real: helix endpoints, tangents, and join continuity are computed
//! exactly, so planner output is validated geometrically. Used both as the
//! default backend and as the test double for the synthesis controller.

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::traits::Kernel;
use crate::types::*;

const JOIN_TOLERANCE: f64 = 1e-6;

/// One placed helix around the Z axis.
#[derive(Debug, Clone)]
struct HelixPath {
    pitch: f64,
    height: f64,
    radius: f64,
    left_handed: bool,
    base_z: f64,
    base_angle: f64,
}

impl HelixPath {
    fn turn_sign(&self) -> f64 {
        if self.left_handed {
            -1.0
        } else {
            1.0
        }
    }

    fn coils(&self) -> f64 {
        self.height / self.pitch
    }

    fn start_point(&self) -> [f64; 3] {
        [
            self.radius * self.base_angle.cos(),
            self.radius * self.base_angle.sin(),
            self.base_z,
        ]
    }

    fn end_point(&self) -> [f64; 3] {
        let angle = self.base_angle + self.turn_sign() * TAU * self.coils();
        [
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            self.base_z + self.height,
        ]
    }

    fn start_tangent(&self) -> [f64; 3] {
        // d/du of (r cos(a + s·2πu), r sin(a + s·2πu), z + p·u) at u = 0.
        let s = self.turn_sign();
        normalize([
            -self.radius * s * TAU * self.base_angle.sin(),
            self.radius * s * TAU * self.base_angle.cos(),
            self.pitch,
        ])
    }

    fn bounding_box(&self) -> BoundingBox {
        let z0 = self.base_z.min(self.base_z + self.height);
        let z1 = self.base_z.max(self.base_z + self.height);
        BoundingBox {
            min: [-self.radius, -self.radius, z0],
            max: [self.radius, self.radius, z1],
        }
    }
}

#[derive(Debug, Clone)]
enum PathRecord {
    Helix(HelixPath),
    Joined {
        start_point: [f64; 3],
        start_tangent: [f64; 3],
        end_point: [f64; 3],
        bbox: BoundingBox,
    },
}

impl PathRecord {
    fn start_point(&self) -> [f64; 3] {
        match self {
            PathRecord::Helix(h) => h.start_point(),
            PathRecord::Joined { start_point, .. } => *start_point,
        }
    }

    fn start_tangent(&self) -> [f64; 3] {
        match self {
            PathRecord::Helix(h) => h.start_tangent(),
            PathRecord::Joined { start_tangent, .. } => *start_tangent,
        }
    }

    fn end_point(&self) -> [f64; 3] {
        match self {
            PathRecord::Helix(h) => h.end_point(),
            PathRecord::Joined { end_point, .. } => *end_point,
        }
    }

    fn bounding_box(&self) -> BoundingBox {
        match self {
            PathRecord::Helix(h) => h.bounding_box(),
            PathRecord::Joined { bbox, .. } => *bbox,
        }
    }
}

#[derive(Debug, Clone)]
struct ShapeRecord {
    class: ShapeClass,
    bbox: BoundingBox,
}

#[derive(Debug, Clone)]
struct ProfileRecord {
    radius: f64,
}

/// Deterministic backend for the geometry kernel.
#[derive(Debug, Default)]
pub struct AnalyticKernel {
    next_id: u64,
    paths: HashMap<u64, PathRecord>,
    profiles: HashMap<u64, ProfileRecord>,
    shapes: HashMap<u64, ShapeRecord>,
}

impl AnalyticKernel {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn path(&self, handle: &PathHandle) -> Result<&PathRecord, KernelError> {
        self.paths
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound { id: handle.id() })
    }

    fn shape(&self, handle: &ShapeHandle) -> Result<&ShapeRecord, KernelError> {
        self.shapes
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound { id: handle.id() })
    }

    fn store_shape(&mut self, class: ShapeClass, bbox: BoundingBox) -> ShapeHandle {
        let id = self.alloc();
        self.shapes.insert(id, ShapeRecord { class, bbox });
        ShapeHandle(id)
    }
}

impl Kernel for AnalyticKernel {
    fn make_helix(
        &mut self,
        pitch: f64,
        height: f64,
        radius: f64,
        left_handed: bool,
    ) -> Result<PathHandle, KernelError> {
        if radius <= LENGTH_EPSILON {
            return Err(KernelError::DegenerateHelix {
                reason: format!("radius {radius} below tolerance"),
            });
        }
        if height.abs() <= LENGTH_EPSILON {
            return Err(KernelError::DegenerateHelix {
                reason: format!("height {height} below tolerance"),
            });
        }
        let pitch = floor_pitch(pitch);
        let id = self.alloc();
        self.paths.insert(
            id,
            PathRecord::Helix(HelixPath {
                pitch,
                height,
                radius,
                left_handed,
                base_z: 0.0,
                base_angle: 0.0,
            }),
        );
        Ok(PathHandle(id))
    }

    fn place_path(
        &mut self,
        path: &PathHandle,
        z: f64,
        angle: f64,
    ) -> Result<PathHandle, KernelError> {
        let record = self.path(path)?.clone();
        let PathRecord::Helix(mut helix) = record else {
            return Err(KernelError::NotSupported {
                operation: "place_path on joined path".to_string(),
            });
        };
        helix.base_z = z;
        helix.base_angle = angle;
        let id = self.alloc();
        self.paths.insert(id, PathRecord::Helix(helix));
        Ok(PathHandle(id))
    }

    fn join_paths(&mut self, segments: &[PathHandle]) -> Result<PathHandle, KernelError> {
        if segments.is_empty() {
            return Err(KernelError::NotSupported {
                operation: "join_paths with no segments".to_string(),
            });
        }
        let records: Vec<&PathRecord> = segments
            .iter()
            .map(|h| self.path(h))
            .collect::<Result<_, _>>()?;

        for (i, pair) in records.windows(2).enumerate() {
            let gap = distance(pair[0].end_point(), pair[1].start_point());
            if gap > JOIN_TOLERANCE {
                return Err(KernelError::DiscontinuousJoin { index: i + 1, gap });
            }
        }

        let mut bbox = records[0].bounding_box();
        for r in &records[1..] {
            bbox = union_box(&bbox, &r.bounding_box());
        }
        let joined = PathRecord::Joined {
            start_point: records[0].start_point(),
            start_tangent: records[0].start_tangent(),
            end_point: records[records.len() - 1].end_point(),
            bbox,
        };
        let id = self.alloc();
        self.paths.insert(id, joined);
        Ok(PathHandle(id))
    }

    fn path_start(&self, path: &PathHandle) -> Result<([f64; 3], [f64; 3]), KernelError> {
        let record = self.path(path)?;
        Ok((record.start_point(), record.start_tangent()))
    }

    fn make_circle(
        &mut self,
        radius: f64,
        _center: [f64; 3],
        _normal: [f64; 3],
    ) -> Result<ProfileHandle, KernelError> {
        if radius <= LENGTH_EPSILON {
            return Err(KernelError::DegenerateProfile { radius });
        }
        let id = self.alloc();
        self.profiles.insert(id, ProfileRecord { radius });
        Ok(ProfileHandle(id))
    }

    fn sweep(
        &mut self,
        path: &PathHandle,
        profile: &ProfileHandle,
        _solid_hint: bool,
        _frenet: bool,
    ) -> Result<ShapeHandle, KernelError> {
        let path_box = self.path(path)?.bounding_box();
        let profile = self
            .profiles
            .get(&profile.id())
            .ok_or(KernelError::EntityNotFound { id: profile.id() })?;
        let bbox = path_box.inflated(profile.radius);
        // Pipe shells come back as shells whatever the hint asked for;
        // solidification is a separate step.
        Ok(self.store_shape(ShapeClass::Shell, bbox))
    }

    fn make_box(&mut self, origin: [f64; 3], size: [f64; 3]) -> Result<ShapeHandle, KernelError> {
        for &extent in &size {
            if extent <= LENGTH_EPSILON {
                return Err(KernelError::DegenerateBox { extent });
            }
        }
        let bbox = BoundingBox {
            min: origin,
            max: [origin[0] + size[0], origin[1] + size[1], origin[2] + size[2]],
        };
        Ok(self.store_shape(ShapeClass::Solid, bbox))
    }

    fn boolean_subtract(
        &mut self,
        shape: &ShapeHandle,
        tool: &ShapeHandle,
    ) -> Result<ShapeHandle, KernelError> {
        let target = self.shape(shape)?.clone();
        let tool = self.shape(tool)?.clone();
        if tool.class != ShapeClass::Solid {
            return Err(KernelError::BooleanFailed {
                reason: format!("tool is {:?}, not a solid", tool.class),
            });
        }

        // Symbolic model: a tool whose X/Y footprint covers the target
        // trims the target's Z range; anything else leaves it unchanged.
        if !target.bbox.covered_in_plan_by(&tool.bbox) {
            return Ok(self.store_shape(target.class, target.bbox));
        }
        let (lo, hi) = (target.bbox.min[2], target.bbox.max[2]);
        let (tlo, thi) = (tool.bbox.min[2], tool.bbox.max[2]);

        if thi <= lo || tlo >= hi {
            // No axial overlap.
            Ok(self.store_shape(target.class, target.bbox))
        } else if tlo <= lo && thi >= hi {
            // Tool swallows the whole shape.
            Ok(self.store_shape(
                ShapeClass::Null,
                BoundingBox {
                    min: target.bbox.min,
                    max: target.bbox.min,
                },
            ))
        } else if tlo <= lo {
            let mut bbox = target.bbox;
            bbox.min[2] = thi;
            Ok(self.store_shape(target.class, bbox))
        } else if thi >= hi {
            let mut bbox = target.bbox;
            bbox.max[2] = tlo;
            Ok(self.store_shape(target.class, bbox))
        } else {
            // Interior cut splits the shape in two.
            Ok(self.store_shape(ShapeClass::Compound, target.bbox))
        }
    }

    fn translate(
        &mut self,
        shape: &ShapeHandle,
        offset: [f64; 3],
    ) -> Result<ShapeHandle, KernelError> {
        let record = self.shape(shape)?.clone();
        let bbox = BoundingBox {
            min: [
                record.bbox.min[0] + offset[0],
                record.bbox.min[1] + offset[1],
                record.bbox.min[2] + offset[2],
            ],
            max: [
                record.bbox.max[0] + offset[0],
                record.bbox.max[1] + offset[1],
                record.bbox.max[2] + offset[2],
            ],
        };
        Ok(self.store_shape(record.class, bbox))
    }

    fn classify(&self, shape: &ShapeHandle) -> ShapeClass {
        self.shapes
            .get(&shape.id())
            .map(|r| r.class)
            .unwrap_or(ShapeClass::Null)
    }

    fn solid_from_shell(&mut self, shape: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        let record = self.shape(shape)?.clone();
        if record.class != ShapeClass::Shell {
            return Err(KernelError::ConversionFailed {
                class: record.class,
            });
        }
        Ok(self.store_shape(ShapeClass::Solid, record.bbox))
    }

    fn make_solid(&mut self, shape: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        let record = self.shape(shape)?.clone();
        if record.class == ShapeClass::Null {
            return Err(KernelError::ConversionFailed {
                class: ShapeClass::Null,
            });
        }
        Ok(self.store_shape(ShapeClass::Solid, record.bbox))
    }

    fn fix_and_sew(&mut self, shape: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        let record = self.shape(shape)?.clone();
        if record.class == ShapeClass::Null {
            return Err(KernelError::RepairFailed {
                reason: "nothing to sew".to_string(),
            });
        }
        Ok(self.store_shape(ShapeClass::Shell, record.bbox))
    }

    fn extract_piece(&mut self, compound: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        let record = self.shape(compound)?.clone();
        if record.class != ShapeClass::Compound {
            return Err(KernelError::NotSupported {
                operation: format!("extract_piece on {:?}", record.class),
            });
        }
        Ok(self.store_shape(ShapeClass::Shell, record.bbox))
    }

    fn bounding_box(&self, shape: &ShapeHandle) -> Result<BoundingBox, KernelError> {
        Ok(self.shape(shape)?.bbox)
    }
}

fn floor_pitch(pitch: f64) -> f64 {
    if pitch.abs() >= MIN_PITCH {
        pitch
    } else if pitch < 0.0 {
        -MIN_PITCH
    } else {
        MIN_PITCH
    }
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= LENGTH_EPSILON {
        return [0.0, 0.0, 1.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

fn union_box(a: &BoundingBox, b: &BoundingBox) -> BoundingBox {
    BoundingBox {
        min: [
            a.min[0].min(b.min[0]),
            a.min[1].min(b.min[1]),
            a.min[2].min(b.min[2]),
        ],
        max: [
            a.max[0].max(b.max[0]),
            a.max[1].max(b.max[1]),
            a.max[2].max(b.max[2]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helix_start_is_on_the_x_axis_at_base_z() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(8.0, 80.0, 12.6, false).unwrap();
        let (point, tangent) = k.path_start(&path).unwrap();
        assert!((point[0] - 12.6).abs() < 1e-12);
        assert!(point[1].abs() < 1e-12);
        assert!(point[2].abs() < 1e-12);
        // Tangent leans in +Y for a right-handed helix starting at angle 0.
        assert!(tangent[1] > 0.0);
        assert!(tangent[2] > 0.0);
        let len = (tangent[0].powi(2) + tangent[1].powi(2) + tangent[2].powi(2)).sqrt();
        assert!((len - 1.0).abs() < 1e-12);
    }

    #[test]
    fn left_handed_helix_turns_the_other_way() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(8.0, 80.0, 12.6, true).unwrap();
        let (_, tangent) = k.path_start(&path).unwrap();
        assert!(tangent[1] < 0.0);
    }

    #[test]
    fn whole_coil_count_ends_above_the_start() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(8.0, 24.0, 10.0, false).unwrap();
        let placed = k.place_path(&path, 5.0, 0.0).unwrap();
        let joined = k.join_paths(&[placed]).unwrap();
        let bbox = match k.paths.get(&joined.id()).unwrap() {
            PathRecord::Joined { bbox, .. } => *bbox,
            _ => unreachable!(),
        };
        assert_eq!(bbox.min[2], 5.0);
        assert_eq!(bbox.max[2], 29.0);
    }

    #[test]
    fn discontinuous_segments_refuse_to_join() {
        let mut k = AnalyticKernel::new();
        let a = k.make_helix(2.8, 5.6, 12.6, false).unwrap();
        // Gap: second segment starts 1.0 above the first segment's end.
        let b0 = k.make_helix(8.0, 40.0, 12.6, false).unwrap();
        let b = k.place_path(&b0, 6.6, 0.0).unwrap();
        let err = k.join_paths(&[a, b]).unwrap_err();
        match err {
            KernelError::DiscontinuousJoin { index, gap } => {
                assert_eq!(index, 1);
                assert!((gap - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn contiguous_segments_join_with_matched_angles() {
        let mut k = AnalyticKernel::new();
        // 2 closed coils at pitch 2.8, then active coils starting where
        // they end: z = 5.6, angle = 2 turns = 0 (mod 2π).
        let a = k.make_helix(2.8, 5.6, 12.6, false).unwrap();
        let b0 = k.make_helix(8.0, 40.0, 12.6, false).unwrap();
        let b = k.place_path(&b0, 5.6, 2.0 * TAU).unwrap();
        assert!(k.join_paths(&[a, b]).is_ok());
    }

    #[test]
    fn zero_pitch_is_floored_not_divided_by() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(0.0, 1.0, 5.0, false).unwrap();
        let (_, tangent) = k.path_start(&path).unwrap();
        assert!(tangent[2].is_finite());
    }

    #[test]
    fn degenerate_helix_inputs_error() {
        let mut k = AnalyticKernel::new();
        assert!(k.make_helix(8.0, 80.0, 0.0, false).is_err());
        assert!(k.make_helix(8.0, 0.0, 12.6, false).is_err());
    }

    #[test]
    fn sweep_produces_a_shell_with_inflated_bounds() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(8.0, 80.0, 12.6, false).unwrap();
        let profile = k.make_circle(1.4, [12.6, 0.0, 0.0], [0.0, 1.0, 0.0]).unwrap();
        let shape = k.sweep(&path, &profile, false, true).unwrap();
        assert_eq!(k.classify(&shape), ShapeClass::Shell);
        let bbox = k.bounding_box(&shape).unwrap();
        assert!((bbox.min[2] + 1.4).abs() < 1e-12);
        assert!((bbox.max[0] - 14.0).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_profile_is_rejected() {
        let mut k = AnalyticKernel::new();
        assert!(k.make_circle(0.0, [0.0; 3], [0.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn subtracting_a_covering_slab_trims_the_bottom() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(8.0, 80.0, 12.6, false).unwrap();
        let profile = k.make_circle(1.4, [0.0; 3], [0.0, 1.0, 0.0]).unwrap();
        let shape = k.sweep(&path, &profile, false, true).unwrap();
        // Slab wider than the coil, reaching from below up to z = 0.
        let slab = k.make_box([-50.0, -50.0, -20.0], [100.0, 100.0, 20.0]).unwrap();
        let ground = k.boolean_subtract(&shape, &slab).unwrap();
        let bbox = k.bounding_box(&ground).unwrap();
        assert_eq!(bbox.min[2], 0.0);
        assert_eq!(k.classify(&ground), ShapeClass::Shell);
    }

    #[test]
    fn solidify_chain_operations_behave_by_class() {
        let mut k = AnalyticKernel::new();
        let path = k.make_helix(8.0, 80.0, 12.6, false).unwrap();
        let profile = k.make_circle(1.4, [0.0; 3], [0.0, 1.0, 0.0]).unwrap();
        let shell = k.sweep(&path, &profile, false, true).unwrap();

        let solid = k.solid_from_shell(&shell).unwrap();
        assert_eq!(k.classify(&solid), ShapeClass::Solid);
        // An already-solid shape cannot go through shell conversion again.
        assert!(k.solid_from_shell(&solid).is_err());
        // But generic make_solid accepts it.
        assert!(k.make_solid(&solid).is_ok());

        let sewn = k.fix_and_sew(&shell).unwrap();
        assert_eq!(k.classify(&sewn), ShapeClass::Shell);
    }

    #[test]
    fn unknown_handles_classify_as_null() {
        let k = AnalyticKernel::new();
        assert_eq!(k.classify(&ShapeHandle(999)), ShapeClass::Null);
    }
}
