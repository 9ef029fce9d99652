use serde::{Deserialize, Serialize};

use crate::enums::{EndType, LifeCategory, PropCalcMethod, SpringKind};
use crate::material::Material;

/// Independent inputs of one spring feature.
///
/// Owned by the calling feature; mutated only by explicit user edits or by
/// enumeration-change cascades (`apply_table_value`). Everything derived
/// from these lives in [`crate::DerivedProperties`] and is recomputed from
/// scratch on every recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringSpecification {
    pub kind: SpringKind,

    /// Outer coil diameter at free length.
    pub outside_diameter_free: f64,
    pub wire_diameter: f64,
    /// Length under no applied load.
    pub length_free: f64,
    pub coils_total: f64,
    /// End coils that do not deflect. Table-driven for standard end types.
    pub coils_inactive: f64,
    /// Extra coil count added when computing solid length.
    pub add_coils_at_solid: f64,
    pub force_at_deflection1: f64,
    pub force_at_deflection2: f64,

    pub end_type: EndType,
    pub life_category: LifeCategory,
    pub prop_calc_method: PropCalcMethod,
    pub left_handed: bool,

    pub material: Material,
}

impl SpringSpecification {
    /// Compression spring with the stock defaults of the compression
    /// feature (28 OD, 2.8 wire, 80 free length, 10 coils, music wire).
    pub fn compression() -> SpringSpecification {
        SpringSpecification {
            kind: SpringKind::Compression,
            outside_diameter_free: 28.0,
            wire_diameter: 2.8,
            length_free: 80.0,
            coils_total: 10.0,
            coils_inactive: 0.0,
            add_coils_at_solid: 0.0,
            force_at_deflection1: 50.0,
            force_at_deflection2: 190.0,
            end_type: EndType::Open,
            life_category: LifeCategory::Static,
            prop_calc_method: PropCalcMethod::MaterialTable,
            left_handed: false,
            material: Material::music_wire(),
        }
    }

    pub fn extension() -> SpringSpecification {
        SpringSpecification {
            kind: SpringKind::Extension,
            outside_diameter_free: 10.0,
            wire_diameter: 1.0,
            length_free: 12.0,
            coils_total: 10.0,
            ..SpringSpecification::compression()
        }
    }

    pub fn torsion() -> SpringSpecification {
        SpringSpecification {
            kind: SpringKind::Torsion,
            outside_diameter_free: 8.0,
            wire_diameter: 0.9,
            length_free: 6.0,
            coils_total: 6.0,
            ..SpringSpecification::compression()
        }
    }

    /// Mean coil diameter at free length.
    pub fn mean_diameter(&self) -> f64 {
        self.outside_diameter_free - self.wire_diameter
    }

    /// Apply one secondary table column onto the spec.
    ///
    /// Returns false for column names the spec does not recognize; the
    /// resolver skips those silently.
    pub fn apply_table_value(&mut self, column: &str, value: f64) -> bool {
        match column {
            "coils_inactive" => self.coils_inactive = value,
            "add_coils_at_solid" => self.add_coils_at_solid = value,
            "density" => self.material.density = value,
            "torsion_modulus" => self.material.torsion_modulus = value,
            "elastic_modulus" => self.material.elastic_modulus = value,
            "hot_factor_kh" => self.material.hot_factor_kh = value,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_diameter_is_od_minus_wire() {
        let spec = SpringSpecification::compression();
        assert!((spec.mean_diameter() - 25.2).abs() < 1e-12);
    }

    #[test]
    fn unknown_table_column_is_skipped() {
        let mut spec = SpringSpecification::compression();
        assert!(!spec.apply_table_value("catalog_number", 7.0));
        assert!(spec.apply_table_value("coils_inactive", 2.0));
        assert_eq!(spec.coils_inactive, 2.0);
    }
}
