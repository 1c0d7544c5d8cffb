use ast::Span;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    NoClosingQuoteForString(Span),
    NoClosingQuoteForIdentifier(Span),
    UnexpectedChar { c: char, location: usize },
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::NoClosingQuoteForString(_) => "no closing quote for string".to_string(),
                Self::NoClosingQuoteForIdentifier(_) =>
                    "no closing quote for identifier".to_string(),
                Self::UnexpectedChar { c, location } =>
                    format!("unexpected char {:?} at position {}", c, location),
            }
        )
    }
}
