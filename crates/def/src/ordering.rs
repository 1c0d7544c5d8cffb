use {common::pub_fields_struct, std::fmt::Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

pub_fields_struct! {
    /// One column of a sort order. What `column_index` refers to depends on the owner:
    /// a column of a data source, or a slot of a join's equality columns.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    struct ColumnOrderInfo {
        column_index: usize,
        direction: Direction,
    }
}

pub type ColumnOrdering = Vec<ColumnOrderInfo>;

impl ColumnOrderInfo {
    pub const fn new(column_index: usize, direction: Direction) -> Self {
        Self {
            column_index,
            direction,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Asc => "+",
                Self::Desc => "-",
            }
        )
    }
}
