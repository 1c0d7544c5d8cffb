mod common;
mod error;
mod expr;
mod query;

pub use self::error::{Error, Result};

use {
    crate::lexer::Lexer,
    ast::{
        token::{Keyword, Token},
        Spanned, Statement,
    },
    std::iter::Peekable,
};

pub struct Parser<'a> {
    src: &'a str,
    tokens: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            tokens: Lexer::new(src).peekable(),
        }
    }

    pub fn parse(sql: &'a str) -> Result<Vec<Statement>> {
        Self::new(sql).collect()
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_semicolons();

        Some(match self.tokens.next()? {
            Ok(Spanned(Token::Keyword(Keyword::SELECT), _)) => self
                .parse_select()
                .and_then(|select| self.expect_statement_end().map(|_| select))
                .map(Statement::Select),
            Ok(Spanned(_, span)) => Err(Error::SyntaxError(span)),
            Err(e) => Err(Error::LexingError(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_statements() {
        let sql = "
            SELECT * FROM a;;
            select * from a cross join b;
        ";

        let output = Parser::parse(sql).unwrap();

        assert_eq!(output.len(), 2);
    }

    #[test]
    fn reject_unknown_statement() {
        assert!(matches!(
            Parser::parse("DROP TABLE a"),
            Err(Error::SyntaxError(_))
        ));
        assert!(matches!(
            Parser::parse("SELECT * FROM a b c"),
            Err(Error::SyntaxError(_))
        ));
    }
}
