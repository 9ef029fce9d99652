use spring_types::SpringSpecification;

use crate::repository::TableRepository;

/// A normalized enumeration selection.
///
/// Host property frameworks hand selections over either as a bare value or
/// as a single-element collection; both collapse into this one type at the
/// boundary so core logic never sees the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No selection made.
    None,
    Value(String),
    /// A collection selection; only the first element is active.
    List(Vec<String>),
}

impl Selection {
    /// The active option label, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Value(v) => Some(v),
            Selection::List(items) => items.first().map(String::as_str),
        }
    }
}

impl From<&str> for Selection {
    fn from(v: &str) -> Self {
        Selection::Value(v.to_string())
    }
}

impl From<Option<&str>> for Selection {
    fn from(v: Option<&str>) -> Self {
        match v {
            Some(v) => Selection::Value(v.to_string()),
            None => Selection::None,
        }
    }
}

impl From<Vec<String>> for Selection {
    fn from(items: Vec<String>) -> Self {
        Selection::List(items)
    }
}

/// Resolve a selection to its 1-based row index in an enumeration table.
///
/// Returns 0 — never an error — when there is no selection, no table, or
/// no row whose label matches. Callers treat 0 as "unresolved" and branch
/// to their default behavior.
pub fn resolve_index(
    repo: &dyn TableRepository,
    spring_type: &str,
    enum_name: &str,
    selection: &Selection,
) -> usize {
    let Some(value) = selection.value() else {
        return 0;
    };
    let Some(table) = repo.table(spring_type, enum_name) else {
        return 0;
    };
    table.index_of(value).unwrap_or(0)
}

/// Apply the secondary columns of the selected row onto the spec.
///
/// Every column name the spec recognizes is assigned; unrecognized columns
/// are skipped. No-op when the selection is unresolved or the table has no
/// secondary columns. Returns the number of values applied.
pub fn apply_table_values(
    spec: &mut SpringSpecification,
    repo: &dyn TableRepository,
    spring_type: &str,
    enum_name: &str,
    selection: &Selection,
) -> usize {
    let Some(value) = selection.value() else {
        return 0;
    };
    let Some(table) = repo.table(spring_type, enum_name) else {
        return 0;
    };
    if !table.has_secondary_columns() {
        return 0;
    }
    let Some(row) = table.row(value) else {
        return 0;
    };

    let mut applied = 0;
    for (column, &cell) in table.header.iter().skip(1).zip(row.values.iter()) {
        if spec.apply_table_value(column, cell) {
            applied += 1;
        }
    }
    applied
}
