//! Compression-spring property derivation.

use std::f64::consts::PI;

use spring_types::{DerivedProperties, EndType, SpringSpecification};

/// Empirical wire-length correction for tapered closed & ground ends,
/// in wire diameters.
const TAPERED_WIRE_LENGTH_CORRECTION: f64 = 3.926;

/// Derive all dependent mechanical properties of a compression spring.
///
/// Fully recomputed on every call. Each property degrades independently
/// when its inputs are degenerate: divisions by a non-positive coil count,
/// rate, or wire diameter yield 0.0, and factors of safety are exactly 1.0
/// whenever the corresponding stress is zero. A spring index of 1 leaves
/// the curvature correction kc unbounded; the stresses derived from it go
/// non-finite but the derivation itself never panics.
pub fn derive_properties(spec: &SpringSpecification) -> DerivedProperties {
    let wire = spec.wire_diameter;
    let mean_diameter = spec.outside_diameter_free - wire;
    let inside_diameter = mean_diameter - wire;
    let spring_index = ratio_or_zero(mean_diameter, wire);
    let kc = (4.0 * spring_index - 1.0) / (4.0 * spring_index - 4.0);
    let ks = kc + 0.615 / spring_index;
    let coils_active = spec.coils_total - spec.coils_inactive;

    let pitch = free_pitch(spec, coils_active);

    let c2 = spring_index * spring_index;
    let rate = if coils_active > 0.0 && spring_index > 0.0 {
        spec.material.hot_factor_kh * (spec.material.torsion_modulus / 1.0e6) * mean_diameter
            / (8.0 * coils_active * c2 * c2)
    } else {
        0.0
    };

    let deflection1 = ratio_or_zero(spec.force_at_deflection1, rate);
    let deflection2 = ratio_or_zero(spec.force_at_deflection2, rate);
    let length_at_deflection1 = spec.length_free - deflection1;
    let length_at_deflection2 = spec.length_free - deflection2;
    let length_stroke = length_at_deflection1 - length_at_deflection2;
    let slenderness = ratio_or_zero(spec.length_free, mean_diameter);

    let length_at_solid = wire * (spec.coils_total + spec.add_coils_at_solid);
    let force_at_solid = rate * (spec.length_free - length_at_solid);

    let stress_factor = if wire > 0.0 {
        ks * 8.0 * mean_diameter / (PI * wire * wire * wire)
    } else {
        0.0
    };
    let stress_at_deflection1 = stress_factor * spec.force_at_deflection1;
    let stress_at_deflection2 = stress_factor * spec.force_at_deflection2;
    let stress_at_solid = stress_factor * force_at_solid;

    let tensile = spec.material.tensile_at(wire);
    let endurance_percent = spec
        .material
        .endurance_percent(spec.life_category.table_index());
    let stress_limit_endurance = tensile * endurance_percent / 100.0;
    let stress_limit_static = tensile * spec.material.percent_tensile_static / 100.0;

    let factor_of_safety_at_deflection2 = safety_factor(stress_limit_static, stress_at_deflection2);
    let factor_of_safety_at_solid = safety_factor(stress_limit_static, stress_at_solid);

    let stress_average = (stress_at_deflection1 + stress_at_deflection2) / 2.0;
    let stress_range = (stress_at_deflection2 - stress_at_deflection1) / 2.0;
    let se2 = stress_limit_endurance / 2.0;
    let cycle_denominator = kc * stress_range * (stress_limit_static - se2) / se2 + stress_average;
    let factor_of_safety_at_cycle_life = safety_factor(stress_limit_static, cycle_denominator);

    let mut wire_length = (spec.length_free * spec.length_free
        + (spec.coils_total * PI * mean_diameter).powi(2))
    .sqrt();
    if spec.end_type == EndType::TaperedClosedGround {
        wire_length -= TAPERED_WIRE_LENGTH_CORRECTION * wire;
    }
    let weight = spec.material.density * (PI * wire * wire / 4.0) * wire_length;

    let percent_available_deflection =
        available_deflection_percent(spec.length_free, length_at_solid, deflection2, wire);

    let energy = 0.5 * rate * (deflection2 * deflection2 - deflection1 * deflection1);

    DerivedProperties {
        mean_diameter,
        inside_diameter,
        spring_index,
        coils_active,
        pitch,
        rate,
        deflection1,
        deflection2,
        length_at_deflection1,
        length_at_deflection2,
        length_stroke,
        slenderness,
        length_at_solid,
        force_at_solid,
        stress_at_deflection1,
        stress_at_deflection2,
        stress_at_solid,
        tensile,
        stress_limit_endurance,
        stress_limit_static,
        factor_of_safety_at_deflection2,
        factor_of_safety_at_solid,
        factor_of_safety_at_cycle_life,
        cycle_life: 0.0,
        weight,
        percent_available_deflection,
        energy,
    }
}

/// Free pitch, selected by the end-type variant. Each variant reserves a
/// different amount of the free length for its end coils.
fn free_pitch(spec: &SpringSpecification, coils_active: f64) -> f64 {
    let wire = spec.wire_diameter;
    let free = spec.length_free;
    match spec.end_type {
        EndType::Open => ratio_or_zero(free - wire, coils_active),
        EndType::OpenGround => ratio_or_zero(free, spec.coils_total),
        EndType::Closed => ratio_or_zero(free - 3.0 * wire, coils_active),
        EndType::ClosedGround => ratio_or_zero(free - 2.0 * wire, coils_active),
        EndType::TaperedClosedGround => ratio_or_zero(free - 1.5 * wire, coils_active),
        EndType::PigTail => ratio_or_zero(free - 2.0 * wire, coils_active),
        EndType::UserSpecified => {
            ratio_or_zero(free - (spec.coils_inactive + 1.0) * wire, coils_active)
        }
    }
}

/// Percent of the solid-travel deflection consumed at working deflection 2.
///
/// Near solid (free length within one wire diameter of solid length) or
/// below it, a penalty value replaces the plain ratio; the smaller of the
/// two candidates wins in the overlap band.
fn available_deflection_percent(
    length_free: f64,
    length_at_solid: f64,
    deflection2: f64,
    wire: f64,
) -> f64 {
    let penalty = || {
        ratio_or_zero(100.0 * deflection2, wire)
            + 10000.0 * (length_at_solid + wire - length_free)
    };
    if length_free > length_at_solid {
        let percent = 100.0 * deflection2 / (length_free - length_at_solid);
        if length_free < length_at_solid + wire {
            percent.min(penalty())
        } else {
            percent
        }
    } else {
        penalty()
    }
}

/// Stress limit over stress, with the documented zero-stress policy:
/// exactly 1.0 when the stress is not positive.
fn safety_factor(limit: f64, stress: f64) -> f64 {
    if stress > 0.0 {
        limit / stress
    } else {
        1.0
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
