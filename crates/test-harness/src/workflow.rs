//! SpringBuilder — fluent API for scripting spring workflows in tests.
//!
//! Wraps a real [`Engine`] with an [`AnalyticKernel`] and the builtin
//! enumeration tables, so scenarios exercise the same recompute path the
//! host application drives. All methods accept string names instead of
//! UUIDs for readability.

use std::collections::HashMap;

use uuid::Uuid;

use spring_engine::{Engine, FeatureResult};
use spring_kernel::{AnalyticKernel, ShapeClass};
use spring_tables::InMemoryTables;
use spring_types::{DerivedProperties, HelixSegment, SpringSpecification};

use crate::helpers::HarnessError;

/// A fluent builder for constructing and verifying spring features in tests.
pub struct SpringBuilder {
    pub engine: Engine,
    kernel: AnalyticKernel,
    tables: InMemoryTables,
    named_features: HashMap<String, Uuid>,
}

impl SpringBuilder {
    /// Engine over the analytic kernel and the builtin enumeration tables.
    pub fn new() -> SpringBuilder {
        SpringBuilder::with_tables(InMemoryTables::builtin())
    }

    /// Same, but with a caller-supplied table repository.
    pub fn with_tables(tables: InMemoryTables) -> SpringBuilder {
        SpringBuilder {
            engine: Engine::new(),
            kernel: AnalyticKernel::new(),
            tables,
            named_features: HashMap::new(),
        }
    }

    // ── Feature Management ──────────────────────────────────────────────

    /// Add a named spring feature. Does not recompute.
    pub fn add_spring(
        &mut self,
        name: &str,
        spec: SpringSpecification,
    ) -> Result<Uuid, HarnessError> {
        if self.named_features.contains_key(name) {
            return Err(HarnessError::DuplicateName { name: name.into() });
        }
        let id = self.engine.add_feature(name, spec);
        self.named_features.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn add_compression(&mut self, name: &str) -> Result<Uuid, HarnessError> {
        self.add_spring(name, SpringSpecification::compression())
    }

    pub fn add_extension(&mut self, name: &str) -> Result<Uuid, HarnessError> {
        self.add_spring(name, SpringSpecification::extension())
    }

    pub fn add_torsion(&mut self, name: &str) -> Result<Uuid, HarnessError> {
        self.add_spring(name, SpringSpecification::torsion())
    }

    /// Edit a feature's specification. Takes effect on the next recompute.
    pub fn edit(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut SpringSpecification),
    ) -> Result<(), HarnessError> {
        let id = self.id(name)?;
        self.engine
            .edit_feature(id, edit)
            .map_err(|e| HarnessError::Engine(e.to_string()))
    }

    pub fn suppress(&mut self, name: &str, suppressed: bool) -> Result<(), HarnessError> {
        let id = self.id(name)?;
        self.engine
            .set_suppressed(id, suppressed)
            .map_err(|e| HarnessError::Engine(e.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Result<(), HarnessError> {
        let id = self.id(name)?;
        self.engine
            .remove_feature(id)
            .map_err(|e| HarnessError::Engine(e.to_string()))?;
        self.named_features.remove(name);
        Ok(())
    }

    /// Recompute every unsuppressed feature through the real engine path.
    pub fn recompute(&mut self) -> &mut Self {
        self.engine.recompute(&mut self.kernel, &self.tables);
        self
    }

    // ── Access ──────────────────────────────────────────────────────────

    pub fn id(&self, name: &str) -> Result<Uuid, HarnessError> {
        self.named_features
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::FeatureNotFound { name: name.into() })
    }

    pub fn spec(&self, name: &str) -> Result<&SpringSpecification, HarnessError> {
        let id = self.id(name)?;
        self.engine
            .feature(id)
            .map(|f| &f.spec)
            .ok_or_else(|| HarnessError::FeatureNotFound { name: name.into() })
    }

    pub fn result(&self, name: &str) -> Result<&FeatureResult, HarnessError> {
        let id = self.id(name)?;
        self.engine
            .result(id)
            .ok_or_else(|| HarnessError::NoResult { name: name.into() })
    }

    pub fn properties(&self, name: &str) -> Result<&DerivedProperties, HarnessError> {
        Ok(&self.result(name)?.properties)
    }

    pub fn segments(&self, name: &str) -> Result<&[HelixSegment], HarnessError> {
        Ok(&self.result(name)?.segments)
    }

    /// The recompute error recorded for a feature, if any.
    pub fn error_for(&self, name: &str) -> Option<&str> {
        let id = self.id(name).ok()?;
        self.engine
            .errors
            .iter()
            .find(|(e, _)| *e == id)
            .map(|(_, msg)| msg.as_str())
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert the last recompute produced a solid body for the feature.
    pub fn assert_solid(&self, name: &str) -> Result<(), HarnessError> {
        let result = self.result(name)?;
        if result.solid.class == ShapeClass::Solid {
            Ok(())
        } else {
            Err(HarnessError::NoSolid { name: name.into() })
        }
    }

    /// Assert no feature failed the last recompute.
    pub fn assert_no_errors(&self) -> Result<(), HarnessError> {
        if self.engine.errors.is_empty() {
            Ok(())
        } else {
            let listed: Vec<String> = self
                .engine
                .errors
                .iter()
                .map(|(id, msg)| format!("  {}: {}", id, msg))
                .collect();
            Err(HarnessError::AssertionFailed {
                detail: format!("expected no engine errors, got:\n{}", listed.join("\n")),
            })
        }
    }

    /// Assert exactly `expected` features failed the last recompute.
    pub fn assert_error_count(&self, expected: usize) -> Result<(), HarnessError> {
        let actual = self.engine.errors.len();
        if actual == expected {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!(
                    "expected {} engine errors, got {}: {:?}",
                    expected, actual, self.engine.errors,
                ),
            })
        }
    }
}

impl Default for SpringBuilder {
    fn default() -> Self {
        SpringBuilder::new()
    }
}
