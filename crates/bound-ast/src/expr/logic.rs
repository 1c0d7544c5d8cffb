use {
    super::{Expression, Typed},
    def::DataType,
    std::fmt::{Display, Formatter, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub enum LogicExpression {
    And { lhs: Expression, rhs: Expression },
    Or { lhs: Expression, rhs: Expression },
    Not { child: Expression },
}

impl Typed for LogicExpression {
    fn return_type(&self) -> DataType {
        DataType::Boolean
    }
}

impl Display for LogicExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::And { lhs, rhs } => write!(f, "({}) AND ({})", lhs, rhs),
            Self::Or { lhs, rhs } => write!(f, "({}) OR ({})", lhs, rhs),
            Self::Not { child } => write!(f, "NOT ({})", child),
        }
    }
}
