//! Closed-form stiffness for extension and torsion springs.
//!
//! No end-type branching and no stress derivation; any non-positive input
//! yields a rate of 0.0 instead of an error.

/// Extension-spring rate in N/mm, shear based.
///
/// Dimensions are millimetres; the shear modulus is in pascals, so wire
/// and mean diameter convert to metres and the N/m result back to N/mm.
pub fn extension_rate(
    outside_diameter: f64,
    wire_diameter: f64,
    coils_total: f64,
    shear_modulus: f64,
) -> f64 {
    let mean_diameter = outside_diameter - wire_diameter;
    if mean_diameter <= 0.0 || wire_diameter <= 0.0 || coils_total <= 0.0 || shear_modulus <= 0.0
    {
        return 0.0;
    }
    let wire_m = wire_diameter / 1000.0;
    let mean_m = mean_diameter / 1000.0;
    let rate_n_per_m = shear_modulus * wire_m.powi(4) / (8.0 * coils_total * mean_m.powi(3));
    rate_n_per_m / 1000.0
}

/// Torsion-spring rate in N·mm per radian, bending based.
pub fn torsion_rate(
    outside_diameter: f64,
    wire_diameter: f64,
    coils_total: f64,
    elastic_modulus: f64,
) -> f64 {
    let mean_diameter = outside_diameter - wire_diameter;
    if mean_diameter <= 0.0 || wire_diameter <= 0.0 || coils_total <= 0.0 || elastic_modulus <= 0.0
    {
        return 0.0;
    }
    let wire_m = wire_diameter / 1000.0;
    let mean_m = mean_diameter / 1000.0;
    let torque_per_radian = elastic_modulus * wire_m.powi(4) / (64.0 * coils_total * mean_m);
    torque_per_radian * 1000.0
}
