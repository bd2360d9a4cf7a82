use super::{
    token::{Token, TokenKind},
    LineBreaks,
};
use crate::lexer::{Lexer, LexicalError, LexicalErrorKind};
use crate::report::ReportSource;
use std::path::Path;

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

pub trait ToFormatter<F>
where
    F: TokenFormatter,
{
    fn create_formatter(&self) -> F;
}

/// One token per line: `(line) KIND lexeme`.
pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }

    pub fn get_line_breaks(&self) -> &LineBreaks {
        &self.line_breaks
    }
}

impl<'src> ToFormatter<BasicFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> BasicFormatter {
        BasicFormatter {
            line_breaks: self.get_line_breaks(),
        }
    }
}

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        let line = self.line_breaks.get_line_from_span(token.span);
        match token.kind {
            TokenKind::Ident | TokenKind::Integer => {
                format!("({line}) {} {}", token.kind, token.lexeme)
            }
            TokenKind::String => format!("({line}) {} {:?}", token.kind, token.lexeme.as_str()),
            TokenKind::Eof => format!("({line}) EOF"),
            kind => format!("({line}) {kind}"),
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => format!("({line}) ILLEGAL {c}"),
            LexicalErrorKind::UnclosedString => format!("({line}) ILLEGAL unterminated string"),
            LexicalErrorKind::UnknownEscape(c) => format!("({line}) ILLEGAL escape \\{c}"),
        }
    }
}

pub struct DebugFormatter;

impl<'src> ToFormatter<DebugFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter {}
    }
}

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

pub struct PrettyFormatter<'src> {
    source: ReportSource<'src>,
    basic: BasicFormatter,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            source: ReportSource::new(text, path),
            basic: BasicFormatter::new(text),
        }
    }
}

impl<'src> TokenFormatter for PrettyFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        self.basic.format(token)
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let label = match error.kind {
            LexicalErrorKind::Unrecognized(c) => format!("{c:?} is not part of the language"),
            LexicalErrorKind::UnclosedString => "String starts here...".into(),
            LexicalErrorKind::UnknownEscape(c) => format!("\\{c} is not a valid escape"),
        };
        self.source
            .render(error.code(), &error.to_string(), error.span, &label)
    }
}
