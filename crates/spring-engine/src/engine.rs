use std::collections::HashMap;

use uuid::Uuid;

use spring_calc::{derive_properties, extension_rate, torsion_rate};
use spring_geom::{plan_segments, synthesize_coil, synthesize_solid};
use spring_kernel::Kernel;
use spring_tables::{apply_table_values, Selection, TableRepository};
use spring_types::{DerivedProperties, EndType, SpringKind, SpringSpecification};

use crate::types::{EngineError, Feature, FeatureResult};

/// Host-facing orchestration of spring features.
///
/// Owns the features and the last good result per feature. `recompute`
/// runs resolver, calculator, planner, and synthesis controller in order,
/// sequentially per feature on the caller's thread. A failed recompute
/// keeps the feature's previous result and records a non-fatal error.
#[derive(Default)]
pub struct Engine {
    features: Vec<Feature>,
    results: HashMap<Uuid, FeatureResult>,
    /// Non-fatal messages from the last recompute.
    pub warnings: Vec<String>,
    /// Features that failed the last recompute, with error messages.
    pub errors: Vec<(Uuid, String)>,
}

impl Engine {
    pub fn new() -> Engine {
        Engine::default()
    }

    pub fn add_feature(&mut self, name: impl Into<String>, spec: SpringSpecification) -> Uuid {
        let feature = Feature::new(name, spec);
        let id = feature.id;
        self.features.push(feature);
        id
    }

    pub fn feature(&self, id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn result(&self, id: Uuid) -> Option<&FeatureResult> {
        self.results.get(&id)
    }

    /// Edit a feature's specification in place. The change takes effect on
    /// the next recompute.
    pub fn edit_feature(
        &mut self,
        id: Uuid,
        edit: impl FnOnce(&mut SpringSpecification),
    ) -> Result<(), EngineError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(EngineError::FeatureNotFound { id })?;
        edit(&mut feature.spec);
        Ok(())
    }

    /// Suppressed features keep their spec and last result but are skipped
    /// by `recompute`.
    pub fn set_suppressed(&mut self, id: Uuid, suppressed: bool) -> Result<(), EngineError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(EngineError::FeatureNotFound { id })?;
        feature.suppressed = suppressed;
        Ok(())
    }

    pub fn remove_feature(&mut self, id: Uuid) -> Result<(), EngineError> {
        let index = self
            .features
            .iter()
            .position(|f| f.id == id)
            .ok_or(EngineError::FeatureNotFound { id })?;
        self.features.remove(index);
        self.results.remove(&id);
        self.errors.retain(|(e, _)| *e != id);
        Ok(())
    }

    /// Recompute every unsuppressed feature in order.
    pub fn recompute(&mut self, kernel: &mut dyn Kernel, tables: &dyn TableRepository) {
        self.warnings.clear();
        self.errors.clear();

        let ids: Vec<Uuid> = self
            .features
            .iter()
            .filter(|f| !f.suppressed)
            .map(|f| f.id)
            .collect();
        for id in ids {
            if let Err(e) = self.recompute_feature(id, kernel, tables) {
                self.errors.push((id, e.to_string()));
            }
        }
    }

    /// Recompute one feature: enumeration cascade, property derivation,
    /// segment planning, solid synthesis. On error the previous result
    /// stays in place.
    pub fn recompute_feature(
        &mut self,
        id: Uuid,
        kernel: &mut dyn Kernel,
        tables: &dyn TableRepository,
    ) -> Result<(), EngineError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(EngineError::FeatureNotFound { id })?;

        let warning = apply_enum_defaults(&mut feature.spec, tables);
        let spec = feature.spec.clone();
        if let Some(warning) = warning {
            self.warnings.push(warning);
        }

        let result = match spec.kind {
            SpringKind::Compression => recompute_compression(&spec, kernel),
            SpringKind::Extension | SpringKind::Torsion => recompute_coil(&spec, kernel),
        }?;
        self.results.insert(id, result);
        Ok(())
    }
}

/// Apply table-driven secondary values for the end-type selection.
///
/// User-specified ends keep whatever inactive-coil values the user set;
/// the other end types are table-driven and read-only. A missing table is
/// not an error, just a warning: the spec keeps its current values.
fn apply_enum_defaults(
    spec: &mut SpringSpecification,
    tables: &dyn TableRepository,
) -> Option<String> {
    if spec.end_type == EndType::UserSpecified {
        return None;
    }
    let applied = apply_table_values(
        spec,
        tables,
        spec.kind.label(),
        "EndType",
        &Selection::from(spec.end_type.label()),
    );
    if applied == 0 {
        Some(format!(
            "no end-type table values for {} {}",
            spec.kind.label(),
            spec.end_type.label()
        ))
    } else {
        None
    }
}

fn recompute_compression(
    spec: &SpringSpecification,
    kernel: &mut dyn Kernel,
) -> Result<FeatureResult, EngineError> {
    let properties = derive_properties(spec);
    let segments = plan_segments(spec);
    let solid = synthesize_solid(kernel, &segments, spec.wire_diameter / 2.0, spec.end_type);
    if !solid.is_solid() {
        return Err(EngineError::NotSolid { class: solid.class });
    }
    Ok(FeatureResult {
        properties,
        segments,
        solid,
    })
}

/// Extension and torsion springs: closed-form rate and a close-wound
/// single-coil solid.
fn recompute_coil(
    spec: &SpringSpecification,
    kernel: &mut dyn Kernel,
) -> Result<FeatureResult, EngineError> {
    let mean_diameter = spec.mean_diameter();
    let rate = match spec.kind {
        SpringKind::Extension => extension_rate(
            spec.outside_diameter_free,
            spec.wire_diameter,
            spec.coils_total,
            spec.material.torsion_modulus,
        ),
        _ => torsion_rate(
            spec.outside_diameter_free,
            spec.wire_diameter,
            spec.coils_total,
            spec.material.elastic_modulus,
        ),
    };
    let properties = DerivedProperties {
        mean_diameter,
        inside_diameter: mean_diameter - spec.wire_diameter,
        coils_active: spec.coils_total,
        rate,
        ..DerivedProperties::default()
    };

    let pitch = spec.wire_diameter;
    let height = spec.coils_total * pitch;
    let solid = synthesize_coil(
        kernel,
        mean_diameter / 2.0,
        pitch,
        height,
        spec.wire_diameter / 2.0,
        spec.left_handed,
    );
    if !solid.is_solid() {
        return Err(EngineError::NotSolid { class: solid.class });
    }
    Ok(FeatureResult {
        properties,
        segments: Vec::new(),
        solid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spring_kernel::AnalyticKernel;
    use spring_tables::InMemoryTables;
    use spring_types::SpringSpecification;

    fn recomputed_engine(spec: SpringSpecification) -> (Engine, Uuid) {
        let mut engine = Engine::new();
        let id = engine.add_feature("Spring", spec);
        let mut kernel = AnalyticKernel::new();
        let tables = InMemoryTables::builtin();
        engine.recompute(&mut kernel, &tables);
        (engine, id)
    }

    #[test]
    fn recompute_produces_properties_and_a_solid() {
        let (engine, id) = recomputed_engine(SpringSpecification::compression());
        assert!(engine.errors.is_empty(), "errors: {:?}", engine.errors);
        let result = engine.result(id).expect("result stored");
        assert!((result.properties.spring_index - 9.0).abs() < 1e-9);
        assert!(!result.segments.is_empty());
        assert!(result.solid.is_solid());
    }

    #[test]
    fn end_type_selection_pulls_table_defaults() {
        let mut spec = SpringSpecification::compression();
        spec.end_type = EndType::Closed;
        spec.coils_inactive = 0.0; // stale, table says 2
        let (engine, id) = recomputed_engine(spec);
        let feature = engine.feature(id).unwrap();
        assert_eq!(feature.spec.coils_inactive, 2.0);
        assert_eq!(feature.spec.add_coils_at_solid, 1.0);
        assert_eq!(engine.result(id).unwrap().segments.len(), 5);
    }

    #[test]
    fn user_specified_end_keeps_user_values() {
        let mut spec = SpringSpecification::compression();
        spec.end_type = EndType::UserSpecified;
        spec.coils_inactive = 3.0;
        let (engine, id) = recomputed_engine(spec);
        assert_eq!(engine.feature(id).unwrap().spec.coils_inactive, 3.0);
    }

    #[test]
    fn failed_recompute_keeps_the_previous_result() {
        let (mut engine, id) = recomputed_engine(SpringSpecification::compression());
        let good_rate = engine.result(id).unwrap().properties.rate;

        engine.edit_feature(id, |spec| spec.wire_diameter = 0.0).unwrap();
        let mut kernel = AnalyticKernel::new();
        let tables = InMemoryTables::builtin();
        engine.recompute(&mut kernel, &tables);

        assert_eq!(engine.errors.len(), 1);
        assert_eq!(engine.errors[0].0, id);
        // Previous geometry and properties are still served.
        let result = engine.result(id).expect("previous result kept");
        assert_eq!(result.properties.rate, good_rate);
        assert!(result.solid.is_solid());
    }

    #[test]
    fn extension_feature_gets_a_rate_and_coil_solid() {
        let (engine, id) = recomputed_engine(SpringSpecification::extension());
        assert!(engine.errors.is_empty(), "errors: {:?}", engine.errors);
        let result = engine.result(id).unwrap();
        assert!(result.properties.rate > 0.0);
        assert!(result.segments.is_empty());
        assert!(result.solid.is_solid());
    }

    #[test]
    fn removing_a_feature_drops_its_result() {
        let (mut engine, id) = recomputed_engine(SpringSpecification::compression());
        engine.remove_feature(id).unwrap();
        assert!(engine.feature(id).is_none());
        assert!(engine.result(id).is_none());
        assert!(engine.remove_feature(id).is_err());
    }

    #[test]
    fn suppressed_features_are_skipped() {
        let mut engine = Engine::new();
        let id = engine.add_feature("Spring", SpringSpecification::compression());
        engine.set_suppressed(id, true).unwrap();
        let mut kernel = AnalyticKernel::new();
        let tables = InMemoryTables::builtin();
        engine.recompute(&mut kernel, &tables);
        assert!(engine.result(id).is_none());
        assert!(engine.errors.is_empty());
    }
}
