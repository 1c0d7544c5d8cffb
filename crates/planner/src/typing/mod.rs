mod special;

pub use special::reject_special;

use {
    crate::{
        error::{ExprTypeSnafu, InternalSnafu, OperatorTypeSnafu, UnknownFunctionSnafu},
        DataSourceInfo, Result,
    },
    ast::expr::{Expression as Expr, Literal as AstLiteral, Operation},
    bound_ast::{
        ArithmeticExpression, ArithmeticOperator, ColumnRef, ComparisonExpression, Expression,
        Literal, LogicExpression, Typed,
    },
    def::DataType,
    snafu::prelude::*,
};

/// Turns untyped expressions into typed ones over a data source.
pub trait TypeChecker {
    /// Binds `expr` against `source` and checks that it has type `required`.
    /// `clause` names the clause the expression appears in, for diagnostics.
    fn check(
        &self,
        expr: &Expr,
        required: DataType,
        source: &DataSourceInfo,
        clause: &'static str,
    ) -> Result<Expression>;
}

/// The default checker: scalar operators over columns and literals, no functions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExprTyper;

impl TypeChecker for ExprTyper {
    fn check(
        &self,
        expr: &Expr,
        required: DataType,
        source: &DataSourceInfo,
        clause: &'static str,
    ) -> Result<Expression> {
        let binder = Binder { source, clause };
        let expr = binder.bind(expr, Some(required))?;

        let actual = expr.return_type();
        ensure!(
            actual == required,
            ExprTypeSnafu {
                clause,
                expected: required,
                actual,
            }
        );

        Ok(expr)
    }
}

struct Binder<'a> {
    source: &'a DataSourceInfo,
    clause: &'static str,
}

impl<'a> Binder<'a> {
    /// `hint` is the type a NULL literal takes in this position.
    fn bind(&self, expr: &Expr, hint: Option<DataType>) -> Result<Expression> {
        Ok(match expr {
            Expr::Column(col) => {
                let table = col.table.as_ref().map(|t| t.0.as_str());
                let index = self.source.find_column(table, &col.column.0, self.clause)?;

                Expression::Column(ColumnRef {
                    index,
                    name: col.to_string(),
                    data_type: self.source.columns()[index].data_type,
                })
            }

            Expr::Literal(literal) => Expression::Literal(match literal {
                AstLiteral::Null => Literal::Null(hint.unwrap_or(DataType::Boolean)),
                AstLiteral::Boolean(v) => Literal::Boolean(*v),
                AstLiteral::Integer(v) => Literal::Int(*v),
                AstLiteral::Float(v) => Literal::Float(*v),
                AstLiteral::String(v) => Literal::String(v.clone()),
            }),

            Expr::IsNull { expr, negated } => Expression::IsNull {
                child: Box::new(self.bind(expr, None)?),
                negated: *negated,
            },

            Expr::Operation(op) => self.bind_operation(op)?,

            Expr::FunctionCall { func, .. } => {
                reject_special(expr, self.clause)?;
                return UnknownFunctionSnafu { name: &func.0 }.fail();
            }
            Expr::Subquery(_) | Expr::Exists(_) => {
                reject_special(expr, self.clause)?;
                return InternalSnafu {
                    details: "subquery accepted by the special function check",
                }
                .fail();
            }
        })
    }

    fn bind_operation(&self, op: &Operation) -> Result<Expression> {
        Ok(match op {
            Operation::Not(child) => {
                let child = self.bind_boolean(child, "NOT")?;
                Expression::Logic(Box::new(LogicExpression::Not { child }))
            }
            Operation::And(lhs, rhs) => {
                let (lhs, rhs) = (self.bind_boolean(lhs, "AND")?, self.bind_boolean(rhs, "AND")?);
                Expression::Logic(Box::new(LogicExpression::And { lhs, rhs }))
            }
            Operation::Or(lhs, rhs) => {
                let (lhs, rhs) = (self.bind_boolean(lhs, "OR")?, self.bind_boolean(rhs, "OR")?);
                Expression::Logic(Box::new(LogicExpression::Or { lhs, rhs }))
            }

            Operation::Positive(child) => self.bind_numeric(child, "+")?,
            Operation::Negative(child) => {
                let child = self.bind_numeric(child, "-")?;
                Expression::Arithmetic(Box::new(ArithmeticExpression::Negative { child }))
            }

            Operation::Equal(lhs, rhs) => self.bind_comparison(lhs, rhs, "=", |lhs, rhs| {
                ComparisonExpression::Equal { lhs, rhs }
            })?,
            Operation::NotEqual(lhs, rhs) => self.bind_comparison(lhs, rhs, "!=", |lhs, rhs| {
                ComparisonExpression::NotEqual { lhs, rhs }
            })?,
            Operation::LessThan(lhs, rhs) => self.bind_comparison(lhs, rhs, "<", |lhs, rhs| {
                ComparisonExpression::LessThan { lhs, rhs }
            })?,
            Operation::LessThanOrEqual(lhs, rhs) => {
                self.bind_comparison(lhs, rhs, "<=", |lhs, rhs| {
                    ComparisonExpression::LessThanOrEqual { lhs, rhs }
                })?
            }
            Operation::GreaterThan(lhs, rhs) => self.bind_comparison(lhs, rhs, ">", |lhs, rhs| {
                ComparisonExpression::GreaterThan { lhs, rhs }
            })?,
            Operation::GreaterThanOrEqual(lhs, rhs) => {
                self.bind_comparison(lhs, rhs, ">=", |lhs, rhs| {
                    ComparisonExpression::GreaterThanOrEqual { lhs, rhs }
                })?
            }
            Operation::Like(lhs, rhs) => {
                let (lhs, rhs) = self.bind_pair(lhs, rhs)?;
                let (left, right) = (lhs.return_type(), rhs.return_type());
                ensure!(
                    left.is_string() && right.is_string(),
                    OperatorTypeSnafu {
                        op: "LIKE",
                        left,
                        right
                    }
                );

                Expression::Comparison(Box::new(ComparisonExpression::Like { lhs, rhs }))
            }

            Operation::Add(lhs, rhs) => self.bind_arithmetic(lhs, rhs, ArithmeticOperator::Plus)?,
            Operation::Subtract(lhs, rhs) => {
                self.bind_arithmetic(lhs, rhs, ArithmeticOperator::Minus)?
            }
            Operation::Multiply(lhs, rhs) => {
                self.bind_arithmetic(lhs, rhs, ArithmeticOperator::Multiply)?
            }
            Operation::Divide(lhs, rhs) => {
                self.bind_arithmetic(lhs, rhs, ArithmeticOperator::Divide)?
            }
            Operation::Modulo(lhs, rhs) => {
                self.bind_arithmetic(lhs, rhs, ArithmeticOperator::Modulo)?
            }
        })
    }

    /// Binds both operands of a binary operator. A NULL operand takes the type of the other one.
    fn bind_pair(&self, lhs: &Expr, rhs: &Expr) -> Result<(Expression, Expression)> {
        if matches!(lhs, Expr::Literal(AstLiteral::Null)) {
            let rhs = self.bind(rhs, None)?;
            let lhs = self.bind(lhs, Some(rhs.return_type()))?;
            Ok((lhs, rhs))
        } else {
            let lhs = self.bind(lhs, None)?;
            let rhs = self.bind(rhs, Some(lhs.return_type()))?;
            Ok((lhs, rhs))
        }
    }

    fn bind_boolean(&self, expr: &Expr, op: &'static str) -> Result<Expression> {
        let expr = self.bind(expr, Some(DataType::Boolean))?;
        let actual = expr.return_type();
        ensure!(
            actual == DataType::Boolean,
            ExprTypeSnafu {
                clause: op,
                expected: DataType::Boolean,
                actual,
            }
        );

        Ok(expr)
    }

    fn bind_numeric(&self, expr: &Expr, op: &'static str) -> Result<Expression> {
        let expr = self.bind(expr, Some(DataType::BigInt))?;
        let actual = expr.return_type();
        ensure!(
            actual.is_numeric(),
            OperatorTypeSnafu {
                op,
                left: actual,
                right: actual,
            }
        );

        Ok(expr)
    }

    fn bind_comparison(
        &self,
        lhs: &Expr,
        rhs: &Expr,
        op: &'static str,
        build: impl FnOnce(Expression, Expression) -> ComparisonExpression,
    ) -> Result<Expression> {
        let (lhs, rhs) = self.bind_pair(lhs, rhs)?;
        let (left, right) = (lhs.return_type(), rhs.return_type());
        ensure!(
            left.common_type(&right).is_some(),
            OperatorTypeSnafu { op, left, right }
        );

        Ok(Expression::Comparison(Box::new(build(lhs, rhs))))
    }

    fn bind_arithmetic(
        &self,
        lhs: &Expr,
        rhs: &Expr,
        op: ArithmeticOperator,
    ) -> Result<Expression> {
        let (lhs, rhs) = self.bind_pair(lhs, rhs)?;
        let (left, right) = (lhs.return_type(), rhs.return_type());

        let data_type = left
            .common_type(&right)
            .filter(DataType::is_numeric)
            .context(OperatorTypeSnafu {
                op: arithmetic_symbol(op),
                left,
                right,
            })?;

        Ok(Expression::Arithmetic(Box::new(ArithmeticExpression::Binary {
            op,
            lhs,
            rhs,
            data_type,
        })))
    }
}

const fn arithmetic_symbol(op: ArithmeticOperator) -> &'static str {
    match op {
        ArithmeticOperator::Plus => "+",
        ArithmeticOperator::Minus => "-",
        ArithmeticOperator::Multiply => "*",
        ArithmeticOperator::Divide => "/",
        ArithmeticOperator::Modulo => "%",
    }
}
