use {
    super::{ColumnId, IndexId, TableId},
    crate::{ColumnOrdering, DataType},
    common::pub_fields_struct,
};

pub_fields_struct! {
    #[derive(Debug, Clone, PartialEq)]
    struct ColumnDesc {
        id: ColumnId,
        name: String,
        data_type: DataType,
        /// Hidden columns are not expanded by `*` and are skipped by NATURAL joins.
        hidden: bool,
    }

    /// An index this index is interleaved into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct InterleaveAncestor {
        table_id: TableId,
        index_id: IndexId,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Interleave {
        /// Ordered from the root of the hierarchy down to the direct parent.
        ancestors: Vec<InterleaveAncestor>,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct IndexDesc {
        id: IndexId,
        name: String,
        /// Key columns, `column_index` being the ordinal of the column in its table.
        columns: ColumnOrdering,
        interleave: Interleave,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TableDesc {
        id: TableId,
        name: String,
        columns: Vec<ColumnDesc>,
        primary_index: IndexDesc,
    }
}

impl TableDesc {
    /// The interleave hierarchy entry that identifies this table's primary index.
    pub fn as_ancestor(&self) -> InterleaveAncestor {
        InterleaveAncestor {
            table_id: self.id,
            index_id: self.primary_index.id,
        }
    }
}
