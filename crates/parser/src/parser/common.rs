use {
    super::{
        error::{Error, Result},
        Parser,
    },
    ast::{
        token::{Keyword, Token},
        Identifier, Span, Spanned,
    },
    core::str::FromStr,
};

macro_rules! match_token {
    ( $token:expr, { $( $($t:pat_param)|* $(if $cond:expr)? => $e:expr, )* } ) => {
        match $token {
            $( $( Some(Ok($t)) )|* $(if $cond)? => $e,)*

            Some(Ok(Spanned(_, span))) => return Err(Error::SyntaxError(span)),
            Some(Err(e)) => return Err(Error::LexingError(e)),
            None => return Err(Error::UnexpectedEnd),
        }
    };
}

pub(super) use match_token;

impl<'a> Parser<'a> {
    /// Quoted identifiers keep their case, everything else is folded to lower case.
    pub(super) fn identifier_from_span(&self, span: Span) -> Identifier {
        let text = &self.src[span.clone()];

        let name = match text.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Some(quoted) => quoted.replace("\"\"", "\""),
            None => text.to_lowercase(),
        };

        Spanned(name, span)
    }

    pub(super) fn string_from_span(&self, span: Span) -> String {
        // Modify the start and end of the span to trim the opening and closing single quotes,
        // and then escape single quotes.
        let (start, end) = (span.start() + 1, *span.end());
        self.src[start..end].replace("''", "'")
    }

    pub(super) fn number_from_span<T: FromStr>(&self, span: Span) -> Result<T> {
        self.src[span.clone()]
            .parse::<T>()
            .map_err(|_| Error::SyntaxError(span))
    }

    pub(super) fn skip_semicolons(&mut self) {
        while self
            .tokens
            .next_if(|token| matches!(token, Ok(Spanned(Token::Semicolon, _))))
            .is_some()
        {}
    }

    /// A statement ends with a semicolon or with the end of input.
    pub(super) fn expect_statement_end(&mut self) -> Result<()> {
        match self.tokens.peek() {
            None | Some(Ok(Spanned(Token::Semicolon, _))) => Ok(()),
            Some(Ok(Spanned(_, span))) => Err(Error::SyntaxError(span.clone())),
            Some(Err(e)) => Err(Error::LexingError(e.clone())),
        }
    }

    pub(super) fn must_match(&mut self, token: Token) -> Result<Spanned<Token>> {
        match_token!(self.tokens.next(), {
            Spanned(t, span) if t == token => {
                Ok(Spanned(t, span))
            },
        })
    }

    pub(super) fn try_match(&mut self, token: Token) -> Option<Spanned<Token>> {
        match self.tokens.next_if(|item| match item {
            Ok(Spanned(t, _)) => *t == token,
            _ => false,
        }) {
            Some(Ok(spanned)) => Some(spanned),
            _ => None,
        }
    }

    pub(super) fn try_match_keyword(&mut self, keyword: Keyword) -> bool {
        self.try_match(Token::Keyword(keyword)).is_some()
    }

    pub(super) fn next_is(&mut self, token: Token) -> bool {
        matches!(self.tokens.peek(), Some(Ok(Spanned(t, _))) if *t == token)
    }

    pub(super) fn parse_identifier(&mut self) -> Result<Identifier> {
        match_token!(self.tokens.next(), {
            Spanned(Token::Identifier, span) => Ok(self.identifier_from_span(span)),
        })
    }

    pub(super) fn parse_alias(&mut self) -> Result<Option<Identifier>> {
        if self.try_match_keyword(Keyword::AS) {
            return Ok(Some(self.parse_identifier()?));
        }

        Ok(self
            .try_match(Token::Identifier)
            .map(|Spanned(_, span)| self.identifier_from_span(span)))
    }

    pub(super) fn parse_comma_separated_within_parentheses<T, F>(
        &mut self,
        func: F,
        allow_empty: bool,
    ) -> Result<Spanned<Vec<T>>>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T>,
    {
        let Spanned(_, s1) = self.must_match(Token::LeftParen)?;

        if allow_empty {
            if let Some(Spanned(_, s2)) = self.try_match(Token::RightParen) {
                return Ok(Spanned(Vec::new(), *s1.start()..=*s2.end()));
            }
        }

        let result = self.parse_comma_separated(func)?;
        let Spanned(_, s2) = self.must_match(Token::RightParen)?;

        Ok(Spanned(result, *s1.start()..=*s2.end()))
    }

    pub(super) fn parse_comma_separated<T, F>(&mut self, mut func: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T>,
    {
        let mut v = vec![];

        loop {
            v.push(func(self)?);

            if self.try_match(Token::Comma).is_none() {
                break;
            }
        }

        Ok(v)
    }
}
