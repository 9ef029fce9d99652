use serde::{Deserialize, Serialize};

/// Material constants used by the property calculator.
///
/// Tensile strength follows a log-linear law between two reference points
/// (`tensile_ref_small` at `diameter_ref_small`, `tensile_ref_large` at
/// `diameter_ref_large`); `tensile_at` interpolates on log10 of the wire
/// diameter. The percent-tensile constants select the allowable stress as a
/// fraction of tensile strength per life category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Combined ASTM / federal specification string, e.g. "A228/QQW-470".
    pub astm_fed_spec: String,
    /// "Cold Coiled" or "Hot Wound".
    pub process: String,
    pub density: f64,
    /// Shear (torsion) modulus G.
    pub torsion_modulus: f64,
    /// Young's (elastic) modulus E.
    pub elastic_modulus: f64,
    /// Hot-working derating factor Kh (1.0 for cold coiled).
    pub hot_factor_kh: f64,
    /// Small reference wire diameter for the tensile law.
    pub diameter_ref_small: f64,
    /// Large reference wire diameter for the tensile law.
    pub diameter_ref_large: f64,
    /// Tensile strength at the small reference diameter.
    pub tensile_ref_small: f64,
    /// Tensile strength at the large reference diameter.
    pub tensile_ref_large: f64,
    /// Percent-of-tensile endurance constants, unpeened categories 1-4.
    pub percent_tensile_endurance: [f64; 4],
    /// Percent-of-tensile endurance constants, shot-peened categories 6-8.
    /// (Category 5 shares the first unpeened constant.)
    pub percent_tensile_endurance_peened: [f64; 3],
    /// Percent of tensile used for the static stress limit.
    pub percent_tensile_static: f64,
}

impl Material {
    /// Music wire (ASTM A228), the default spring material.
    pub fn music_wire() -> Material {
        Material {
            name: "MUSIC_WIRE".to_string(),
            astm_fed_spec: "A228/QQW-470".to_string(),
            process: "Cold Coiled".to_string(),
            density: 0.00786,
            torsion_modulus: 79.293e9,
            elastic_modulus: 207.0e9,
            hot_factor_kh: 1.0,
            diameter_ref_small: 0.254,
            diameter_ref_large: 10.160,
            tensile_ref_small: 2550.0,
            tensile_ref_large: 1380.0,
            percent_tensile_endurance: [50.0, 36.0, 33.0, 30.0],
            percent_tensile_endurance_peened: [42.0, 39.0, 36.0],
            percent_tensile_static: 50.0,
        }
    }

    /// Tensile strength at a wire diameter via log-linear interpolation.
    ///
    /// Non-positive diameters have no meaningful log; the small-diameter
    /// reference tensile is returned as the neutral value.
    pub fn tensile_at(&self, wire_diameter: f64) -> f64 {
        if wire_diameter <= 0.0 {
            return self.tensile_ref_small;
        }
        let const_term = self.diameter_ref_small.log10();
        let slope_term = (self.tensile_ref_large - self.tensile_ref_small)
            / (self.diameter_ref_large.log10() - const_term);
        slope_term * (wire_diameter.log10() - const_term) + self.tensile_ref_small
    }

    /// Percent-of-tensile endurance constant for a 1-based life-category
    /// index. Index 0 (unresolved selection) and the first peened category
    /// fall back to the first unpeened constant, which is also the static
    /// percentage.
    pub fn endurance_percent(&self, life_category_index: usize) -> f64 {
        match life_category_index {
            2 => self.percent_tensile_endurance[1],
            3 => self.percent_tensile_endurance[2],
            4 => self.percent_tensile_endurance[3],
            6 => self.percent_tensile_endurance_peened[0],
            7 => self.percent_tensile_endurance_peened[1],
            8 => self.percent_tensile_endurance_peened[2],
            // 1, 5 and the unresolved sentinel all use the first constant.
            _ => self.percent_tensile_endurance[0],
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::music_wire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tensile_law_hits_reference_points() {
        let m = Material::music_wire();
        assert!((m.tensile_at(0.254) - 2550.0).abs() < 1e-9);
        assert!((m.tensile_at(10.160) - 1380.0).abs() < 1e-9);
    }

    #[test]
    fn tensile_decreases_with_diameter() {
        let m = Material::music_wire();
        assert!(m.tensile_at(1.0) > m.tensile_at(5.0));
    }

    #[test]
    fn endurance_percent_shares_first_constant() {
        let m = Material::music_wire();
        assert_eq!(m.endurance_percent(1), m.endurance_percent(5));
        assert_eq!(m.endurance_percent(0), m.percent_tensile_static);
        assert_eq!(m.endurance_percent(2), 36.0);
        assert_eq!(m.endurance_percent(8), 36.0);
    }
}
