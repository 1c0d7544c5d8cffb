//! Untyped expressions as written in the query text.
use {
    crate::{
        common::{ColumnRef, Identifier},
        token::{Keyword, Token},
        Query,
    },
    common::pub_fields_struct,
    def::Direction,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(ColumnRef),
    Literal(Literal),
    FunctionCall {
        func: Identifier,
        arguments: Vec<Expression>,
        /// Present when the call is a window function application.
        over: Option<WindowSpec>,
    },
    Operation(Operation),
    IsNull {
        expr: Box<Expression>,
        negated: bool,
    },
    Subquery(Box<Query>),
    Exists(Box<Query>),
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Operation> for Expression {
    fn from(op: Operation) -> Self {
        Self::Operation(op)
    }
}

impl From<ColumnRef> for Expression {
    fn from(column: ColumnRef) -> Self {
        Self::Column(column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

pub_fields_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct WindowSpec {
        partition_by: Vec<Expression>,
        order_by: Vec<(Expression, Direction)>,
    }
}

pub trait Operator: Sized {
    /// Looks up the corresponding operator for a token, if one exists
    fn from(token: &Token) -> Option<Self>;

    /// Returns the operator's associativity
    fn assoc(&self) -> u8;

    /// Returns the operator's precedence
    fn prec(&self) -> u8;
}

macro_rules! op_variants {
    ($((unary, $($uop:ident)*))* $((binary, $($bop:ident)*))*) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum Operation {
            $($($uop(Box<Expression>),)*)*
            $($($bop(Box<Expression>, Box<Expression>),)*)*
        }
    }
}

macro_rules! build_expr {
    (unary { $($op:ident)* }) => {
        pub fn build_expr(&self, expr: Expression) -> Expression {
            let expr = Box::new(expr);

            match self {
                $( Self::$op => Operation::$op(expr), )*
            }
            .into()
        }
    };
    (binary { $($op:ident)* }) => {
        pub fn build_expr(&self, lhs: Expression, rhs: Expression) -> Expression {
            let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));

            match self {
                $( Self::$op => Operation::$op(lhs, rhs), )*
            }
            .into()
        }
    };
}

macro_rules! operations {
    {
        $(
            $ty:ident $id:ident {
                $( ($op:ident, ($token:pat), $prec:literal, $assoc:literal), )*
            }
        )*
    }
    => {
        op_variants!($(($ty, $($op)*))*);

        $(
            #[derive(Debug, PartialEq)]
            pub enum $id {
                $( $op, )*
            }

            impl $id {
                build_expr!($ty {$($op)*});
            }

            impl Operator for $id {
                fn from(token: &Token) -> Option<Self> {
                    Some(match token {
                        $( $token => Self::$op, )*
                        _ => return None,
                    })
                }

                fn assoc(&self) -> u8 {
                    match self {
                        $( Self::$op => $assoc, )*
                    }
                }

                fn prec(&self) -> u8 {
                    match self {
                        $( Self::$op => $prec, )*
                    }
                }
            }
        )*
    }
}

/// Precedence of `IS [NOT] NULL`, which is parsed as a postfix operator.
pub const IS_NULL_PREC: u8 = 4;

operations!(
    unary PrefixOperator {
        (Not, (Token::Keyword(Keyword::NOT)), 3, 1),
        (Positive, (Token::Plus), 8, 1),
        (Negative, (Token::Minus), 8, 1),
    }

    binary InfixOperator {
        (Or, (Token::Keyword(Keyword::OR)), 1, 1),
        (And, (Token::Keyword(Keyword::AND)), 2, 1),

        (Equal, (Token::Equal), 4, 1),
        (NotEqual, (Token::NotEqual | Token::LessOrGreaterThan), 4, 1),
        (Like, (Token::Keyword(Keyword::LIKE)), 4, 1),
        (GreaterThan, (Token::GreaterThan), 5, 1),
        (GreaterThanOrEqual, (Token::GreaterThanOrEqual), 5, 1),
        (LessThan, (Token::LessThan), 5, 1),
        (LessThanOrEqual, (Token::LessThanOrEqual), 5, 1),

        (Add, (Token::Plus), 6, 1),
        (Subtract, (Token::Minus), 6, 1),
        (Multiply, (Token::Asterisk), 7, 1),
        (Divide, (Token::Slash), 7, 1),
        (Modulo, (Token::Percent), 7, 1),
    }
);

impl Expression {
    /// Visits `self` and every sub-expression in pre-order. Queries nested in subqueries
    /// are not entered.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expression)) {
        visit(self);

        match self {
            Self::Column(_) | Self::Literal(_) | Self::Subquery(_) | Self::Exists(_) => {}
            Self::FunctionCall {
                arguments, over, ..
            } => {
                arguments.iter().for_each(|arg| arg.walk(visit));
                if let Some(over) = over {
                    over.partition_by.iter().for_each(|expr| expr.walk(visit));
                    over.order_by.iter().for_each(|(expr, _)| expr.walk(visit));
                }
            }
            Self::IsNull { expr, .. } => expr.walk(visit),
            Self::Operation(op) => match op {
                Operation::Not(child) | Operation::Positive(child) | Operation::Negative(child) => {
                    child.walk(visit)
                }
                Operation::Or(lhs, rhs)
                | Operation::And(lhs, rhs)
                | Operation::Equal(lhs, rhs)
                | Operation::NotEqual(lhs, rhs)
                | Operation::Like(lhs, rhs)
                | Operation::GreaterThan(lhs, rhs)
                | Operation::GreaterThanOrEqual(lhs, rhs)
                | Operation::LessThan(lhs, rhs)
                | Operation::LessThanOrEqual(lhs, rhs)
                | Operation::Add(lhs, rhs)
                | Operation::Subtract(lhs, rhs)
                | Operation::Multiply(lhs, rhs)
                | Operation::Divide(lhs, rhs)
                | Operation::Modulo(lhs, rhs) => {
                    lhs.walk(visit);
                    rhs.walk(visit);
                }
            },
        }
    }
}
