pub mod catalog;
mod join;
mod ordering;
pub mod types;
mod value;

pub use {
    catalog::{ColumnId, IndexId, TableId},
    join::JoinType,
    ordering::{ColumnOrderInfo, ColumnOrdering, Direction},
    types::DataType,
    value::{Row, Value},
};
