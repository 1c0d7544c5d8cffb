use {
    super::Typed,
    def::DataType,
    std::fmt::{Display, Formatter, Result},
};

/// A reference to a column of the data source an expression is evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub index: usize,
    pub name: String,
    pub data_type: DataType,
}

impl Typed for ColumnRef {
    fn return_type(&self) -> DataType {
        self.data_type
    }
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}
