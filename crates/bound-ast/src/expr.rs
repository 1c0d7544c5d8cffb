mod arithmetic;
mod column;
mod comparison;
mod literal;
mod logic;

pub use {
    arithmetic::{ArithmeticExpression, ArithmeticOperator},
    column::ColumnRef,
    comparison::ComparisonExpression,
    literal::Literal,
    logic::LogicExpression,
};

use {
    def::DataType,
    std::fmt::{Display, Formatter, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(ColumnRef),
    Literal(Literal),
    Logic(Box<LogicExpression>),
    Arithmetic(Box<ArithmeticExpression>),
    Comparison(Box<ComparisonExpression>),
    IsNull {
        child: Box<Expression>,
        negated: bool,
    },
}

pub trait Typed {
    fn return_type(&self) -> DataType;
}

impl Typed for Expression {
    fn return_type(&self) -> DataType {
        match self {
            Self::Column(expr) => expr.return_type(),
            Self::Literal(expr) => expr.return_type(),
            Self::Logic(expr) => expr.return_type(),
            Self::Arithmetic(expr) => expr.return_type(),
            Self::Comparison(expr) => expr.return_type(),
            Self::IsNull { .. } => DataType::Boolean,
        }
    }
}

impl Expression {
    /// Ordinals of all the input columns the expression reads, in order of appearance.
    pub fn referenced_columns(&self) -> Vec<usize> {
        let mut columns = vec![];
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, columns: &mut Vec<usize>) {
        match self {
            Self::Column(col) => columns.push(col.index),
            Self::Literal(_) => {}
            Self::Logic(expr) => match expr.as_ref() {
                LogicExpression::And { lhs, rhs } | LogicExpression::Or { lhs, rhs } => {
                    lhs.collect_columns(columns);
                    rhs.collect_columns(columns);
                }
                LogicExpression::Not { child } => child.collect_columns(columns),
            },
            Self::Arithmetic(expr) => match expr.as_ref() {
                ArithmeticExpression::Binary { lhs, rhs, .. } => {
                    lhs.collect_columns(columns);
                    rhs.collect_columns(columns);
                }
                ArithmeticExpression::Negative { child } => child.collect_columns(columns),
            },
            Self::Comparison(expr) => {
                let (lhs, rhs) = expr.operands();
                lhs.collect_columns(columns);
                rhs.collect_columns(columns);
            }
            Self::IsNull { child, .. } => child.collect_columns(columns),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Column(expr) => expr.fmt(f),
            Self::Literal(expr) => expr.fmt(f),
            Self::Logic(expr) => expr.fmt(f),
            Self::Arithmetic(expr) => expr.fmt(f),
            Self::Comparison(expr) => expr.fmt(f),
            Self::IsNull { child, negated } => {
                write!(f, "{} IS {}NULL", child, if *negated { "NOT " } else { "" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(index: usize, name: &str, data_type: DataType) -> Expression {
        Expression::Column(ColumnRef {
            index,
            name: name.into(),
            data_type,
        })
    }

    #[test]
    fn display_and_columns() {
        let expr = Expression::Logic(Box::new(LogicExpression::And {
            lhs: Expression::Comparison(Box::new(ComparisonExpression::Equal {
                lhs: column(0, "a.x", DataType::Int),
                rhs: column(3, "b.x", DataType::Int),
            })),
            rhs: Expression::IsNull {
                child: Box::new(column(1, "y", DataType::Boolean)),
                negated: true,
            },
        }));

        assert_eq!(expr.to_string(), "(a.x = b.x) AND (y IS NOT NULL)");
        assert_eq!(expr.referenced_columns(), vec![0, 3, 1]);
        assert_eq!(expr.return_type(), DataType::Boolean);
    }

    #[test]
    fn arithmetic_type() {
        let expr = Expression::Arithmetic(Box::new(ArithmeticExpression::Binary {
            op: ArithmeticOperator::Multiply,
            lhs: column(0, "a", DataType::Int),
            rhs: Expression::Literal(Literal::Float(1.5)),
            data_type: DataType::Double,
        }));

        assert_eq!(expr.return_type(), DataType::Double);
        assert_eq!(expr.to_string(), "a * 1.5");
    }
}
