mod error;

pub(crate) use self::error::{Error, Result};

use {
    ast::{
        token::{Keyword, Token},
        Spanned,
    },
    std::{
        iter::Peekable,
        str::{CharIndices, FromStr},
    },
};

pub(crate) struct Lexer<'a> {
    src: &'a str,
    iter: Peekable<CharIndices<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Spanned<Token>>;

    fn next(&mut self) -> Option<Self::Item> {
        // consume whitespace
        self.iter_next_while(|c| c.is_whitespace());

        let &(location, c) = self.iter.peek()?;

        match c {
            '\'' => Some(self.scan_quoted('\'', Token::String)),
            '"' => Some(self.scan_quoted('"', Token::Identifier)),
            c if c.is_ascii_digit() => Some(Ok(self.scan_number())),
            c if c.is_alphabetic() || c == '_' => Some(Ok(self.scan_identifier())),
            _ => Some(
                self.scan_symbol()
                    .ok_or(Error::UnexpectedChar { c, location }),
            ),
        }
    }
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            iter: src.char_indices().peekable(),
        }
    }

    fn iter_next_while(&mut self, func: impl Fn(&char) -> bool) {
        while self.iter.next_if(|(_, c)| func(c)).is_some() {}
    }

    /// The byte offset of the last char consumed.
    fn last_offset(&mut self) -> usize {
        self.iter
            .peek()
            .map(|&(i, _)| i)
            .unwrap_or(self.src.len())
            .saturating_sub(1)
    }

    /// Scans a string literal or a quoted identifier. A doubled quote escapes itself.
    fn scan_quoted(&mut self, quote: char, token: Token) -> Result<Spanned<Token>> {
        let begin = match self.iter.next() {
            Some((i, _)) => i,
            None => unreachable!("the opening quote has been peeked"),
        };

        while let Some((i, c)) = self.iter.next() {
            if c != quote {
                continue;
            }

            match self.iter.peek() {
                Some(&(_, next)) if next == quote => _ = self.iter.next(),
                _ => return Ok(Spanned(token, begin..=i)),
            }
        }

        let span = begin..=self.src.len() - 1;
        Err(match token {
            Token::String => Error::NoClosingQuoteForString(span),
            _ => Error::NoClosingQuoteForIdentifier(span),
        })
    }

    fn scan_number(&mut self) -> Spanned<Token> {
        let begin = self.iter.peek().map(|&(i, _)| i).unwrap_or_default();

        self.iter_next_while(|c| c.is_ascii_digit());

        let is_float = self.iter.next_if(|&(_, c)| c == '.').is_some();
        self.iter_next_while(|c| c.is_ascii_digit());

        let is_float = match self.iter.next_if(|&(_, c)| c == 'e' || c == 'E') {
            Some(_) => {
                self.iter.next_if(|&(_, c)| c == '+' || c == '-');
                self.iter_next_while(|c| c.is_ascii_digit());
                true
            }
            None => is_float,
        };

        Spanned(Token::Number { is_float }, begin..=self.last_offset())
    }

    fn scan_identifier(&mut self) -> Spanned<Token> {
        let begin = self.iter.peek().map(|&(i, _)| i).unwrap_or_default();

        self.iter_next_while(|&c| c.is_alphanumeric() || c == '_');

        let range = begin..=self.last_offset();
        let ident = &self.src[range.clone()];

        let token = Keyword::from_str(ident)
            .map(Token::Keyword)
            .unwrap_or(Token::Identifier);

        Spanned(token, range)
    }

    fn scan_symbol(&mut self) -> Option<Spanned<Token>> {
        let (begin, c) = self.iter.next()?;

        let symbol = match c {
            '.' => Token::Period,
            '=' => Token::Equal,
            '<' => {
                if self.iter.next_if(|&(_, c)| c == '>').is_some() {
                    Token::LessOrGreaterThan
                } else if self.iter.next_if(|&(_, c)| c == '=').is_some() {
                    Token::LessThanOrEqual
                } else {
                    Token::LessThan
                }
            }
            '>' => {
                if self.iter.next_if(|&(_, c)| c == '=').is_some() {
                    Token::GreaterThanOrEqual
                } else {
                    Token::GreaterThan
                }
            }
            '!' => {
                self.iter.next_if(|&(_, c)| c == '=')?;
                Token::NotEqual
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Asterisk,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            _ => return None,
        };

        Some(Spanned(symbol, begin..=self.last_offset()))
    }
}
