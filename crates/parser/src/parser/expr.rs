use {
    super::{
        common::match_token,
        error::{Error, Result},
        Parser,
    },
    ast::{
        expr::{
            Expression, InfixOperator, Literal, Operator, PrefixOperator, WindowSpec,
            IS_NULL_PREC,
        },
        token::{Keyword, Token},
        ColumnRef, Spanned,
    },
    def::Direction,
};

impl<'a> Parser<'a> {
    pub(super) fn parse_expr(&mut self) -> Result<Expression> {
        self.parse_expr_recursive(0)
    }

    fn parse_expr_recursive(&mut self, min_prec: u8) -> Result<Expression> {
        let mut expr = match self.try_match_operator::<PrefixOperator>(min_prec) {
            Some(op) => op.build_expr(self.parse_expr_recursive(op.prec())?),
            None => self.parse_expr_atom()?,
        };

        loop {
            if let Some(op) = self.try_match_operator::<InfixOperator>(min_prec) {
                expr = op.build_expr(expr, self.parse_expr_recursive(op.assoc() + op.prec())?);
            } else if min_prec <= IS_NULL_PREC && self.try_match_keyword(Keyword::IS) {
                let negated = self.try_match_keyword(Keyword::NOT);
                self.must_match(Token::Keyword(Keyword::NULL))?;

                expr = Expression::IsNull {
                    expr: Box::new(expr),
                    negated,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn try_match_operator<T: Operator>(&mut self, min_prec: u8) -> Option<T> {
        let op = match self.tokens.peek()? {
            Ok(Spanned(t, _)) => T::from(t),
            _ => None,
        }
        .filter(|op| op.prec() >= min_prec);

        if op.is_some() {
            self.tokens.next();
        }

        op
    }

    fn parse_expr_atom(&mut self) -> Result<Expression> {
        Ok(match_token!(self.tokens.next(), {
            Spanned(Token::Identifier, span) => {
                let id = self.identifier_from_span(span);

                if self.next_is(Token::LeftParen) {
                    let Spanned(arguments, _) =
                        self.parse_comma_separated_within_parentheses(Self::parse_expr, true)?;
                    let over = self.parse_window_spec()?;

                    Expression::FunctionCall { func: id, arguments, over }
                } else if self.try_match(Token::Period).is_some() {
                    let column = self.parse_identifier()?;

                    ColumnRef { column, table: Some(id) }.into()
                } else {
                    ColumnRef { column: id, table: None }.into()
                }
            },
            Spanned(Token::Number { is_float }, span) => {
                if is_float {
                    Literal::Float(self.number_from_span(span)?).into()
                } else {
                    Literal::Integer(self.number_from_span(span)?).into()
                }
            },
            Spanned(Token::LeftParen, _) => {
                let expr = if self.try_match_keyword(Keyword::SELECT) {
                    Expression::Subquery(Box::new(self.parse_select()?))
                } else {
                    self.parse_expr()?
                };
                self.must_match(Token::RightParen)?;

                expr
            },
            Spanned(Token::Keyword(Keyword::EXISTS), _) => {
                self.must_match(Token::LeftParen)?;
                self.must_match(Token::Keyword(Keyword::SELECT))?;
                let query = self.parse_select()?;
                self.must_match(Token::RightParen)?;

                Expression::Exists(Box::new(query))
            },
            Spanned(Token::String, span) => Literal::String(self.string_from_span(span)).into(),
            Spanned(Token::Keyword(Keyword::TRUE), _) => Literal::Boolean(true).into(),
            Spanned(Token::Keyword(Keyword::FALSE), _) => Literal::Boolean(false).into(),
            Spanned(Token::Keyword(Keyword::NULL), _) => Literal::Null.into(),
        }))
    }

    /// Parses `OVER ([PARTITION BY ...] [ORDER BY ...])` following a function call.
    fn parse_window_spec(&mut self) -> Result<Option<WindowSpec>> {
        if !self.try_match_keyword(Keyword::OVER) {
            return Ok(None);
        }

        self.must_match(Token::LeftParen)?;
        let mut spec = WindowSpec::default();

        if self.try_match_keyword(Keyword::PARTITION) {
            self.must_match(Token::Keyword(Keyword::BY))?;
            spec.partition_by = self.parse_comma_separated(Self::parse_expr)?;
        }

        if self.try_match_keyword(Keyword::ORDER) {
            self.must_match(Token::Keyword(Keyword::BY))?;
            spec.order_by = self.parse_comma_separated(|parser| {
                let expr = parser.parse_expr()?;
                let direction = if parser.try_match_keyword(Keyword::DESC) {
                    Direction::Desc
                } else {
                    parser.try_match_keyword(Keyword::ASC);
                    Direction::Asc
                };

                Ok((expr, direction))
            })?;
        }

        self.must_match(Token::RightParen)?;

        Ok(Some(spec))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        ast::{expr::Operation, identifier_from_str},
    };

    fn column(table: Option<&str>, name: &str) -> Box<Expression> {
        Box::new(Expression::Column(ColumnRef {
            column: identifier_from_str(name),
            table: table.map(identifier_from_str),
        }))
    }

    #[test]
    fn it_works() {
        let input = "a + b.c + 1 >= +3.5";
        let expected_output = Expression::Operation(Operation::GreaterThanOrEqual(
            Box::new(Expression::Operation(Operation::Add(
                Box::new(Expression::Operation(Operation::Add(
                    column(None, "a"),
                    column(Some("b"), "c"),
                ))),
                Box::new(Expression::Literal(Literal::Integer(1))),
            ))),
            Box::new(Expression::Operation(Operation::Positive(Box::new(
                Expression::Literal(Literal::Float(3.5)),
            )))),
        ));

        let output = Parser::new(input).parse_expr().unwrap();

        assert_eq!(output, expected_output);
    }

    #[test]
    fn logical_precedence() {
        let input = "NOT a = b AND c IS NOT NULL OR d";
        let expected_output = Expression::Operation(Operation::Or(
            Box::new(Expression::Operation(Operation::And(
                Box::new(Expression::Operation(Operation::Not(Box::new(
                    Expression::Operation(Operation::Equal(column(None, "a"), column(None, "b"))),
                )))),
                Box::new(Expression::IsNull {
                    expr: column(None, "c"),
                    negated: true,
                }),
            ))),
            column(None, "d"),
        ));

        let output = Parser::new(input).parse_expr().unwrap();

        assert_eq!(output, expected_output);
    }

    #[test]
    fn window_function_and_subqueries() {
        let output = Parser::new("rank() OVER (PARTITION BY a ORDER BY b DESC)")
            .parse_expr()
            .unwrap();

        assert_eq!(
            output,
            Expression::FunctionCall {
                func: identifier_from_str("rank"),
                arguments: vec![],
                over: Some(WindowSpec {
                    partition_by: vec![*column(None, "a")],
                    order_by: vec![(*column(None, "b"), Direction::Desc)],
                }),
            }
        );

        assert!(matches!(
            Parser::new("(SELECT * FROM t)").parse_expr(),
            Ok(Expression::Subquery(_))
        ));
        assert!(matches!(
            Parser::new("EXISTS (SELECT * FROM t)").parse_expr(),
            Ok(Expression::Exists(_))
        ));
    }

    #[test]
    fn unexpected_end() {
        assert_eq!(Parser::new("a +").parse_expr(), Err(Error::UnexpectedEnd));
        assert_eq!(Parser::new("a IS").parse_expr(), Err(Error::UnexpectedEnd));
    }
}
