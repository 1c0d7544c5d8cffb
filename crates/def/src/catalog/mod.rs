mod table;

pub use table::*;

pub type TableId = u32;
pub type IndexId = u32;
pub type ColumnId = u32;

/// Read access to the table descriptors of a database.
pub trait DatabaseCatalog {
    fn get_table(&self, name: &str) -> Option<&TableDesc>;
}
