use crate::lexer::{LexicalError, Span, TokenKind};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("expected next token to be {expected}, got {actual} instead")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFunction(TokenKind),
    #[error("no infix parse function for {0} found")]
    NoInfixParseFunction(TokenKind),
    #[error("could not parse {0} as integer")]
    InvalidInteger(CompactString),
    #[error("{0}")]
    LexicalError(LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
}

impl ParserError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "PE001",
            ParserErrorKind::NoPrefixParseFunction(_) => "PE002",
            ParserErrorKind::NoInfixParseFunction(_) => "PE003",
            ParserErrorKind::InvalidInteger(_) => "PE004",
            ParserErrorKind::LexicalError(ref e) => e.code(),
        }
    }
}

impl From<LexicalError> for ParserError {
    fn from(value: LexicalError) -> Self {
        Self {
            span: value.span,
            kind: ParserErrorKind::LexicalError(value),
        }
    }
}
