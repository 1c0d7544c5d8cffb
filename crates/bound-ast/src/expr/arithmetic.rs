use {
    super::{Expression, Typed},
    def::DataType,
    std::fmt::{Display, Formatter, Result},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArithmeticOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArithmeticExpression {
    Binary {
        op: ArithmeticOperator,
        lhs: Expression,
        rhs: Expression,
        /// The common numeric type of both operands.
        data_type: DataType,
    },
    Negative {
        child: Expression,
    },
}

impl Typed for ArithmeticExpression {
    fn return_type(&self) -> DataType {
        match self {
            Self::Binary { data_type, .. } => *data_type,
            Self::Negative { child } => child.return_type(),
        }
    }
}

impl Display for ArithmeticOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}",
            match self {
                Self::Plus => "+",
                Self::Minus => "-",
                Self::Multiply => "*",
                Self::Divide => "/",
                Self::Modulo => "%",
            }
        )
    }
}

impl Display for ArithmeticExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Binary { op, lhs, rhs, .. } => write!(f, "{} {} {}", lhs, op, rhs),
            Self::Negative { child } => write!(f, "-{}", child),
        }
    }
}
