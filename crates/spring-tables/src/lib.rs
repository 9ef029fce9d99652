pub mod repository;
pub mod resolve;
pub mod table;

pub use repository::{InMemoryTables, TableRepository};
pub use resolve::{apply_table_values, resolve_index, Selection};
pub use table::{EnumRow, EnumTable, TableError};
