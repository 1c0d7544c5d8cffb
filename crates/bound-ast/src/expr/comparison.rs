use {
    super::{Expression, Typed},
    def::DataType,
    std::fmt::{Display, Formatter, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonExpression {
    Equal { lhs: Expression, rhs: Expression },
    NotEqual { lhs: Expression, rhs: Expression },
    LessThan { lhs: Expression, rhs: Expression },
    LessThanOrEqual { lhs: Expression, rhs: Expression },
    GreaterThan { lhs: Expression, rhs: Expression },
    GreaterThanOrEqual { lhs: Expression, rhs: Expression },
    Like { lhs: Expression, rhs: Expression },
}

impl ComparisonExpression {
    pub fn operands(&self) -> (&Expression, &Expression) {
        match self {
            Self::Equal { lhs, rhs }
            | Self::NotEqual { lhs, rhs }
            | Self::LessThan { lhs, rhs }
            | Self::LessThanOrEqual { lhs, rhs }
            | Self::GreaterThan { lhs, rhs }
            | Self::GreaterThanOrEqual { lhs, rhs }
            | Self::Like { lhs, rhs } => (lhs, rhs),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Equal { .. } => "=",
            Self::NotEqual { .. } => "!=",
            Self::LessThan { .. } => "<",
            Self::LessThanOrEqual { .. } => "<=",
            Self::GreaterThan { .. } => ">",
            Self::GreaterThanOrEqual { .. } => ">=",
            Self::Like { .. } => "LIKE",
        }
    }
}

impl Typed for ComparisonExpression {
    fn return_type(&self) -> DataType {
        DataType::Boolean
    }
}

impl Display for ComparisonExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (lhs, rhs) = self.operands();
        write!(f, "{} {} {}", lhs, self.symbol(), rhs)
    }
}
