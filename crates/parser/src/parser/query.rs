use {
    super::{
        common::match_token,
        error::{Error, Result},
        Parser,
    },
    ast::{
        token::{Keyword, Token},
        JoinCond, JoinItem, Query, Spanned, TableFactor, TableReference, TargetElem,
    },
    def::JoinType,
};

impl<'a> Parser<'a> {
    pub(super) fn parse_select(&mut self) -> Result<Query> {
        let distinct = self.try_match_keyword(Keyword::DISTINCT);
        let targets = self.parse_comma_separated(Self::parse_select_target)?;
        let from = self.parse_from_clause()?;

        Ok(Query {
            distinct,
            targets,
            from,
        })
    }

    fn parse_select_target(&mut self) -> Result<TargetElem> {
        if self.try_match(Token::Asterisk).is_some() {
            return Ok(TargetElem::Wildcard);
        }

        let expr = self.parse_expr()?;
        let alias = self.parse_alias()?;

        Ok(TargetElem::Expr { expr, alias })
    }

    fn parse_from_clause(&mut self) -> Result<Option<TableReference>> {
        if !self.try_match_keyword(Keyword::FROM) {
            return Ok(None);
        };

        let factor = self.parse_table_factor()?;
        let mut joins = vec![];

        while let Some(join) = self.parse_join_item()? {
            joins.push(join);
        }

        Ok(Some(TableReference { factor, joins }))
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor> {
        Ok(match_token!(self.tokens.next(), {
            Spanned(Token::Identifier, span) => {
                let name = self.identifier_from_span(span);
                let alias = self.parse_alias()?;

                TableFactor::Table { name, alias }
            },
            Spanned(Token::LeftParen, _) => {
                self.must_match(Token::Keyword(Keyword::SELECT))?;
                let query = self.parse_select()?;
                let Spanned(_, span) = self.must_match(Token::RightParen)?;

                // a derived table must be named
                let alias = self.parse_alias()?.ok_or(Error::SyntaxError(span))?;

                TableFactor::Derived {
                    query: Box::new(query),
                    alias,
                }
            },
        }))
    }

    fn parse_join_item(&mut self) -> Result<Option<JoinItem>> {
        // `FROM a, b` is a cross join
        if self.try_match(Token::Comma).is_some() {
            return Ok(Some(JoinItem {
                join_type: JoinType::Cross,
                factor: self.parse_table_factor()?,
                cond: JoinCond::None,
            }));
        }

        let natural = self.try_match(Token::Keyword(Keyword::NATURAL));

        let join_type = match self.tokens.peek() {
            Some(Ok(Spanned(Token::Keyword(Keyword::JOIN), _))) => JoinType::Inner,
            Some(Ok(Spanned(Token::Keyword(Keyword::CROSS), _))) if natural.is_none() => {
                self.tokens.next();
                JoinType::Cross
            }
            Some(Ok(Spanned(Token::Keyword(Keyword::INNER), _))) => {
                self.tokens.next();
                JoinType::Inner
            }
            Some(Ok(Spanned(
                Token::Keyword(keyword @ (Keyword::LEFT | Keyword::RIGHT | Keyword::FULL)),
                _,
            ))) => {
                let join_type = match keyword {
                    Keyword::LEFT => JoinType::LeftOuter,
                    Keyword::RIGHT => JoinType::RightOuter,
                    _ => JoinType::FullOuter,
                };
                self.tokens.next();
                self.try_match_keyword(Keyword::OUTER);
                join_type
            }
            _ => {
                return match natural {
                    Some(Spanned(_, span)) => Err(Error::SyntaxError(span)),
                    None => Ok(None),
                }
            }
        };
        self.must_match(Token::Keyword(Keyword::JOIN))?;

        let factor = self.parse_table_factor()?;

        let cond = if natural.is_some() {
            JoinCond::Natural
        } else if join_type == JoinType::Cross {
            JoinCond::None
        } else {
            match_token!(self.tokens.next(), {
                Spanned(Token::Keyword(Keyword::ON), _) => JoinCond::On(self.parse_expr()?),
                Spanned(Token::Keyword(Keyword::USING), _) => {
                    let Spanned(columns, _) = self
                        .parse_comma_separated_within_parentheses(Self::parse_identifier, false)?;
                    JoinCond::Using(columns)
                },
            })
        };

        Ok(Some(JoinItem {
            join_type,
            factor,
            cond,
        }))
    }
}
