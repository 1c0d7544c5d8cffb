use {
    snafu::prelude::*,
    std::{fmt::Display, str::FromStr},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(r#"type "{}" does not exist"#, name))]
    UnknownType { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

macro_rules! define_types {
    (@wildcard $ty:ty) => {
        _
    };

    ($($var:ident$(($ty:ty))? => $name:literal,)*) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        pub enum DataType {
            $($var$(($ty))?,)*
        }

        impl DataType {
            /// The SQL name of the type, without any length modifier.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$var$((define_types!(@wildcard $ty)))? => $name,)*
                }
            }
        }
    };
}

define_types! {
    Boolean => "boolean",

    // Numeric types
    SmallInt => "smallint",
    Int => "integer",
    BigInt => "bigint",
    Float => "float",
    Double => "double",

    // String types
    Char(u16) => "char",
    Varchar(u16) => "varchar",
}

impl DataType {
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::SmallInt | Self::Int | Self::BigInt)
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::SmallInt | Self::Int | Self::BigInt | Self::Float | Self::Double
        )
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Char(_) | Self::Varchar(_))
    }

    const fn integer_width(&self) -> u8 {
        match self {
            Self::SmallInt => 2,
            Self::Int => 4,
            Self::BigInt => 8,
            _ => 0,
        }
    }

    const fn string_len(&self) -> u16 {
        match self {
            Self::Char(len) | Self::Varchar(len) => *len,
            _ => 0,
        }
    }

    /// Returns the type both `self` and `other` can be converted to without loss,
    /// or `None` if the two types cannot be compared.
    pub fn common_type(&self, other: &Self) -> Option<Self> {
        if self == other {
            return Some(*self);
        }

        match (self, other) {
            (lhs, rhs) if lhs.is_integer() && rhs.is_integer() => {
                Some(if lhs.integer_width() >= rhs.integer_width() {
                    *lhs
                } else {
                    *rhs
                })
            }
            (lhs, rhs) if lhs.is_numeric() && rhs.is_numeric() => Some(Self::Double),
            (lhs, rhs) if lhs.is_string() && rhs.is_string() => {
                Some(Self::Varchar(lhs.string_len().max(rhs.string_len())))
            }
            _ => None,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char(len) | Self::Varchar(len) => write!(f, "{}({})", self.name(), len),
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();

        let (name, len) = match lower.split_once('(') {
            Some((name, rest)) => {
                let len = rest
                    .strip_suffix(')')
                    .and_then(|len| len.trim().parse::<u16>().ok())
                    .context(UnknownTypeSnafu { name: s })?;
                (name.trim(), Some(len))
            }
            None => (lower.as_str(), None),
        };

        Ok(match (name, len) {
            ("boolean" | "bool", None) => Self::Boolean,
            ("smallint", None) => Self::SmallInt,
            ("int" | "integer", None) => Self::Int,
            ("bigint", None) => Self::BigInt,
            ("float" | "real", None) => Self::Float,
            ("double", None) => Self::Double,
            ("char", len) => Self::Char(len.unwrap_or(1)),
            ("varchar", Some(len)) => Self::Varchar(len),
            _ => return UnknownTypeSnafu { name: s }.fail(),
        })
    }
}
