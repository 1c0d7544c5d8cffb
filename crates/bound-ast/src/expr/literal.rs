use {
    super::Typed,
    def::DataType,
    std::fmt::{Display, Formatter, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A NULL takes the type required by its context.
    Null(DataType),
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Typed for Literal {
    fn return_type(&self) -> DataType {
        match self {
            Self::Null(data_type) => *data_type,
            Self::Boolean(_) => DataType::Boolean,
            Self::Int(_) => DataType::BigInt,
            Self::Float(_) => DataType::Double,
            Self::String(s) => DataType::Varchar(s.chars().count().min(u16::MAX as usize) as u16),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Null(_) => write!(f, "NULL"),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
        }
    }
}
