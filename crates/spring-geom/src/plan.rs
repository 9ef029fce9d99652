//! Helix segment planners.

use spring_types::{HelixSegment, SegmentRegion, SpringSpecification};

const EPSILON: f64 = 1.0e-6;

/// Accumulates contiguous segments: each new segment starts at the z and
/// winding angle where the previous one ended.
struct SegmentBuilder {
    radius: f64,
    left_handed: bool,
    z: f64,
    angle: f64,
    segments: Vec<HelixSegment>,
}

impl SegmentBuilder {
    fn new(radius: f64, left_handed: bool) -> SegmentBuilder {
        SegmentBuilder {
            radius,
            left_handed,
            z: 0.0,
            angle: 0.0,
            segments: Vec::new(),
        }
    }

    fn push(&mut self, region: SegmentRegion, pitch: f64, coils: f64) {
        let segment = HelixSegment {
            region,
            radius: self.radius,
            pitch,
            height: coils * pitch,
            coils,
            start_z: self.z,
            start_angle: self.angle,
            left_handed: self.left_handed,
        };
        self.z = segment.end_z();
        self.angle += segment.delta_angle();
        self.segments.push(segment);
    }
}

/// Plan the helix segments of a compression spring.
///
/// Inactive coils split evenly into bottom and top closed portions wound at
/// the wire diameter; each side with closed coils gets one transition coil
/// whose pitch averages the closed and active pitch. The remaining free
/// length spreads over the active coils, floored to the closed pitch when
/// the inputs leave no room. Segment order is bottom-closed,
/// bottom-transition, active, top-transition, top-closed.
pub fn plan_segments(spec: &SpringSpecification) -> Vec<HelixSegment> {
    let wire = spec.wire_diameter;
    let mean_radius = spec.mean_diameter() / 2.0;
    let closed_bottom = spec.coils_inactive / 2.0;
    let closed_top = spec.coils_inactive - closed_bottom;
    let transition_bottom = if closed_bottom > 0.0 { 1.0 } else { 0.0 };
    let transition_top = if closed_top > 0.0 { 1.0 } else { 0.0 };
    let transition_count = transition_bottom + transition_top;
    let active = (spec.coils_total - spec.coils_inactive).max(0.0);

    let closed_pitch = wire;
    let const_height =
        closed_pitch * (closed_bottom + closed_top) + transition_count * closed_pitch * 0.5;
    let denominator = active + transition_count * 0.5;
    let middle_pitch = if denominator <= EPSILON {
        closed_pitch
    } else {
        let pitch = (spec.length_free - const_height) / denominator;
        if pitch <= EPSILON {
            closed_pitch
        } else {
            pitch
        }
    };
    let transition_pitch = (closed_pitch + middle_pitch) / 2.0;

    let mut builder = SegmentBuilder::new(mean_radius, spec.left_handed);
    if closed_bottom > 0.0 {
        builder.push(SegmentRegion::BottomClosed, closed_pitch, closed_bottom);
        builder.push(SegmentRegion::BottomTransition, transition_pitch, transition_bottom);
    }
    if active > EPSILON {
        builder.push(SegmentRegion::Active, middle_pitch, active);
    }
    if closed_top > 0.0 {
        builder.push(SegmentRegion::TopTransition, transition_pitch, transition_top);
        builder.push(SegmentRegion::TopClosed, closed_pitch, closed_top);
    }
    builder.segments
}

/// Generic planner with an explicit height budget.
///
/// Distributes coils across bottom-closed, active, and top-closed regions
/// at the given active pitch, then rescales the active pitch downward
/// whenever its natural height would overrun what the budget leaves after
/// the closed ends. The stack height never exceeds the budget, even with
/// inconsistent coil and pitch inputs.
pub fn plan_budgeted(
    coils_total: f64,
    coils_inactive: f64,
    wire_diameter: f64,
    active_pitch: f64,
    height_budget: f64,
    mean_radius: f64,
    left_handed: bool,
) -> Vec<HelixSegment> {
    let closed_bottom = coils_inactive / 2.0;
    let closed_top = coils_inactive - closed_bottom;
    let active = (coils_total - coils_inactive).max(0.0);

    let closed_pitch = wire_diameter;
    let closed_height = closed_pitch * (closed_bottom + closed_top);
    let remaining = (height_budget - closed_height).max(0.0);

    let mut pitch = active_pitch;
    if active > EPSILON && active * pitch > remaining {
        pitch = remaining / active;
    }

    let mut builder = SegmentBuilder::new(mean_radius, left_handed);
    if closed_bottom > 0.0 {
        builder.push(SegmentRegion::BottomClosed, closed_pitch, closed_bottom);
    }
    if active > EPSILON {
        builder.push(SegmentRegion::Active, pitch, active);
    }
    if closed_top > 0.0 {
        builder.push(SegmentRegion::TopClosed, closed_pitch, closed_top);
    }
    builder.segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use spring_types::{EndType, SpringSpecification};

    fn closed_spec() -> SpringSpecification {
        let mut spec = SpringSpecification::compression();
        spec.end_type = EndType::Closed;
        spec.coils_inactive = 2.0;
        spec
    }

    #[test]
    fn open_spring_is_one_active_segment() {
        let spec = SpringSpecification::compression();
        let segments = plan_segments(&spec);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].region, SegmentRegion::Active);
        assert_eq!(segments[0].start_z, 0.0);
        assert_eq!(segments[0].coils, 10.0);
    }

    #[test]
    fn closed_spring_has_five_segments_in_order() {
        let segments = plan_segments(&closed_spec());
        let regions: Vec<SegmentRegion> = segments.iter().map(|s| s.region).collect();
        assert_eq!(
            regions,
            vec![
                SegmentRegion::BottomClosed,
                SegmentRegion::BottomTransition,
                SegmentRegion::Active,
                SegmentRegion::TopTransition,
                SegmentRegion::TopClosed,
            ]
        );
    }

    #[test]
    fn segment_heights_sum_to_the_free_length() {
        let segments = plan_segments(&closed_spec());
        let total: f64 = segments.iter().map(|s| s.height.abs()).sum();
        assert!((total - 80.0).abs() < 1e-6, "total height {total}");
    }

    #[test]
    fn heights_sum_to_free_length_across_coil_splits() {
        for (total, inactive, free) in [
            (10.0, 2.0, 80.0),
            (12.0, 4.0, 100.0),
            (8.5, 1.0, 45.0),
            (20.0, 6.0, 300.0),
        ] {
            let mut spec = closed_spec();
            spec.coils_total = total;
            spec.coils_inactive = inactive;
            spec.length_free = free;
            let sum: f64 = plan_segments(&spec).iter().map(|s| s.height.abs()).sum();
            assert!(
                (sum - free).abs() < 1e-6,
                "total={total} inactive={inactive} free={free} sum={sum}"
            );
        }
    }

    #[test]
    fn segments_are_contiguous_in_z_and_angle() {
        let segments = plan_segments(&closed_spec());
        for pair in segments.windows(2) {
            assert!((pair[0].end_z() - pair[1].start_z).abs() < 1e-12);
            assert!(
                (pair[0].start_angle + pair[0].delta_angle() - pair[1].start_angle).abs() < 1e-12
            );
        }
    }

    #[test]
    fn transition_pitch_averages_closed_and_active() {
        let segments = plan_segments(&closed_spec());
        let closed = segments[0].pitch;
        let active = segments[2].pitch;
        assert!((segments[1].pitch - (closed + active) / 2.0).abs() < 1e-12);
        assert_eq!(closed, 2.8);
    }

    #[test]
    fn cramped_free_length_floors_active_pitch_to_closed() {
        let mut spec = closed_spec();
        spec.length_free = 1.0; // far below the closed-coil stack
        let segments = plan_segments(&spec);
        let active = segments.iter().find(|s| s.region == SegmentRegion::Active);
        assert_eq!(active.unwrap().pitch, 2.8);
    }

    #[test]
    fn left_handed_segments_wind_backwards() {
        let mut spec = closed_spec();
        spec.left_handed = true;
        let segments = plan_segments(&spec);
        assert!(segments[1].start_angle < 0.0);
        assert!(segments.iter().all(|s| s.left_handed));
    }

    #[test]
    fn budgeted_plan_never_exceeds_the_budget() {
        // Natural active height 10 × 12 = 120 against a 60 budget.
        let segments = plan_budgeted(14.0, 4.0, 2.0, 12.0, 60.0, 12.0, false);
        let total: f64 = segments.iter().map(|s| s.height.abs()).sum();
        assert!(total <= 60.0 + 1e-9, "total {total}");
        // Closed ends keep their pitch; the active segment absorbed the cut.
        assert_eq!(segments[0].pitch, 2.0);
        let active = &segments[1];
        assert_eq!(active.region, SegmentRegion::Active);
        assert!(active.pitch < 12.0);
        assert!((active.pitch - (60.0 - 8.0) / 10.0).abs() < 1e-9);
    }

    #[test]
    fn budgeted_plan_keeps_natural_pitch_when_it_fits() {
        let segments = plan_budgeted(10.0, 0.0, 2.0, 4.0, 100.0, 12.0, false);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].pitch, 4.0);
        assert_eq!(segments[0].height, 40.0);
    }
}
