use std::collections::HashMap;

use crate::table::{EnumTable, TableError};

/// Read-only source of enumeration tables, keyed by (spring type name,
/// enumeration name).
///
/// Injected into the resolver so tests can substitute deterministic
/// doubles; there is no process-wide cache.
pub trait TableRepository {
    fn table(&self, spring_type: &str, enum_name: &str) -> Option<&EnumTable>;
}

/// In-memory repository, pre-parsed at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTables {
    tables: HashMap<(String, String), EnumTable>,
}

impl InMemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding the built-in compression tables shipped with the
    /// crate (end type, life category, property-calculation method).
    pub fn builtin() -> InMemoryTables {
        let mut repo = InMemoryTables::new();
        for (enum_name, json) in [
            (
                "EndType",
                include_str!("../tables/Compression/EndType.json"),
            ),
            (
                "LifeCategory",
                include_str!("../tables/Compression/LifeCategory.json"),
            ),
            (
                "PropCalcMethod",
                include_str!("../tables/Compression/PropCalcMethod.json"),
            ),
        ] {
            // Built-in documents are fixture data; a parse failure here is
            // a packaging bug, so surface it loudly in debug builds and
            // skip the table otherwise.
            match EnumTable::from_json(json) {
                Ok(table) => repo.insert("Compression", enum_name, table),
                Err(e) => debug_assert!(false, "builtin table {enum_name}: {e}"),
            }
        }
        repo
    }

    pub fn insert(&mut self, spring_type: &str, enum_name: &str, table: EnumTable) {
        self.tables
            .insert((spring_type.to_string(), enum_name.to_string()), table);
    }

    /// Parse and insert a JSON table document.
    pub fn insert_json(
        &mut self,
        spring_type: &str,
        enum_name: &str,
        json: &str,
    ) -> Result<(), TableError> {
        let table = EnumTable::from_json(json)?;
        self.insert(spring_type, enum_name, table);
        Ok(())
    }
}

impl TableRepository for InMemoryTables {
    fn table(&self, spring_type: &str, enum_name: &str) -> Option<&EnumTable> {
        self.tables
            .get(&(spring_type.to_string(), enum_name.to_string()))
    }
}
