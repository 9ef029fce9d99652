use serde::{Deserialize, Serialize};

/// Dependent mechanical properties of a spring.
///
/// Output of the property calculator; fully recomputed on every call with
/// no incremental state. Fields that cannot be computed from the current
/// inputs degrade individually to a neutral value (0.0, or 1.0 for factors
/// of safety) rather than poisoning the whole result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedProperties {
    pub mean_diameter: f64,
    pub inside_diameter: f64,
    /// Mean diameter / wire diameter.
    pub spring_index: f64,
    pub coils_active: f64,
    /// Axial distance per free coil, chosen by the end-type branch.
    pub pitch: f64,
    /// Spring rate (force per unit deflection).
    pub rate: f64,
    pub deflection1: f64,
    pub deflection2: f64,
    pub length_at_deflection1: f64,
    pub length_at_deflection2: f64,
    pub length_stroke: f64,
    /// Free length / mean diameter.
    pub slenderness: f64,
    /// Length with all coils touching.
    pub length_at_solid: f64,
    pub force_at_solid: f64,
    pub stress_at_deflection1: f64,
    pub stress_at_deflection2: f64,
    pub stress_at_solid: f64,
    pub tensile: f64,
    pub stress_limit_endurance: f64,
    pub stress_limit_static: f64,
    pub factor_of_safety_at_deflection2: f64,
    pub factor_of_safety_at_solid: f64,
    pub factor_of_safety_at_cycle_life: f64,
    /// S-N cycle-life interpolation is not implemented; always 0.0.
    pub cycle_life: f64,
    pub weight: f64,
    pub percent_available_deflection: f64,
    /// Elastic energy stored between the two working deflections.
    pub energy: f64,
}
