use {crate::DataType, std::fmt::Display};

macro_rules! define_value {
    ($($variant:ident($raw:ty),)*) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum Value {
            Null,
            $($variant($raw),)*
        }

        $(
            impl From<$raw> for Value {
                fn from(raw: $raw) -> Self {
                    Value::$variant(raw)
                }
            }
        )*
    };
}

define_value! {
    Boolean(bool),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    String(String),
}

pub type Row = Vec<Value>;

impl Value {
    /// Whether the value can be stored in a column of the given type.
    pub fn fits(&self, data_type: &DataType) -> bool {
        match (self, data_type) {
            (Self::Null, _) => true,
            (Self::Boolean(_), DataType::Boolean) => true,
            (Self::SmallInt(_), DataType::SmallInt) => true,
            (Self::Int(_), DataType::Int) => true,
            (Self::BigInt(_), DataType::BigInt) => true,
            (Self::Float(_), DataType::Float) => true,
            (Self::Double(_), DataType::Double) => true,
            (Self::String(s), DataType::Char(len) | DataType::Varchar(len)) => {
                s.chars().count() <= *len as usize
            }
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::SmallInt(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::BigInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
        }
    }
}
