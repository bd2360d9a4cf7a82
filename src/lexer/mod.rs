mod cursor;
mod error;
pub mod formatter;
mod token;

use compact_str::CompactString;
use cursor::SourceChar;
pub use error::{LexicalError, LexicalErrorKind};
use std::{ops::Range, rc::Rc, str::CharIndices};
pub use token::{Span, SpanIndex, SpanLength, Token, TokenKind, KEYWORD_HASHMAP};

/// A pull-based supply of tokens.
///
/// After the end of the input is reached every further call yields another
/// [`TokenKind::Eof`] token.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexicalError>;
}

#[derive(Debug, Clone)]
pub struct LineBreaks {
    line_breaks: Rc<[Range<SpanIndex>]>,
}

impl LineBreaks {
    pub fn new(text: &str) -> Self {
        let line_breaks = if !text.is_empty() {
            let mut line_breaks = Vec::new();
            let mut cursor: SpanIndex = 0.into();
            for (offset, byte) in text.bytes().enumerate() {
                let offset = (offset + 1).into();
                if byte == b'\n' {
                    line_breaks.push(cursor..offset);
                    cursor = offset;
                }
            }
            if !text.ends_with('\n') {
                line_breaks.push(cursor..(text.len() + 1).into());
            }
            line_breaks
        } else {
            vec![0.into()..1.into()]
        };
        Self {
            line_breaks: line_breaks.into(),
        }
    }

    pub fn get_max_line(&self) -> u32 {
        (self.line_breaks.len() + 1) as u32
    }

    pub fn get_line(&self, offset: SpanIndex) -> u32 {
        self.line_breaks
            .binary_search_by(|r| {
                if offset < r.start {
                    std::cmp::Ordering::Greater
                } else if offset >= r.end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .map(|v| (v + 1) as u32)
            .unwrap_or(self.get_max_line())
    }

    pub fn get_line_from_span(&self, span: Span) -> u32 {
        self.get_line(span.start)
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    chars: CharIndices<'src>,
    lookahead: Option<SourceChar>,
    line_breaks: LineBreaks,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices(),
            lookahead: None,
            line_breaks: LineBreaks::new(source),
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_line_breaks(&self) -> LineBreaks {
        self.line_breaks.clone()
    }
}

impl<'src> Lexer<'src> {
    fn next_char(&mut self) -> Option<SourceChar> {
        if let Some(c) = self.lookahead.take() {
            return Some(c);
        }
        self.chars.next().map(|(offset, value)| SourceChar {
            value,
            offset: offset.into(),
        })
    }

    fn put_back_char(&mut self, c: SourceChar) {
        self.lookahead = Some(c);
    }

    fn eat_if(&mut self, expected: char) -> Option<SourceChar> {
        let c = self.next_char()?;
        if c.value == expected {
            Some(c)
        } else {
            self.put_back_char(c);
            None
        }
    }

    fn make_token(&self, kind: TokenKind, start: SpanIndex, end: SpanIndex) -> Token {
        let span = Span {
            start,
            length: end - start,
        };
        Token {
            kind,
            lexeme: self.source[span.range()].into(),
            span,
        }
    }

    fn just(&self, kind: TokenKind, c: SourceChar) -> Token {
        self.make_token(kind, c.offset, c.next_offset())
    }

    /// Lexes a one or two character operator where the second character is `second`.
    fn one_or_two(
        &mut self,
        c: SourceChar,
        second: char,
        double: TokenKind,
        single: TokenKind,
    ) -> Token {
        match self.eat_if(second) {
            Some(next) => self.make_token(double, c.offset, next.next_offset()),
            None => self.just(single, c),
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.next_char() {
            if c.value == '\n' {
                break;
            }
        }
    }

    fn lex_while(
        &mut self,
        first: SourceChar,
        predicate: impl Fn(char) -> bool,
    ) -> (SpanIndex, SpanIndex) {
        let mut end = first.next_offset();
        while let Some(c) = self.next_char() {
            if !predicate(c.value) {
                self.put_back_char(c);
                break;
            }
            end = c.next_offset();
        }
        (first.offset, end)
    }

    fn lex_ident_or_keyword(&mut self, first: SourceChar) -> Token {
        let (start, end) = self.lex_while(first, |c| c.is_ascii_alphanumeric() || c == '_');
        let mut token = self.make_token(TokenKind::Ident, start, end);
        if let Some(kind) = KEYWORD_HASHMAP.get(token.lexeme.as_str()) {
            token.kind = *kind;
        }
        token
    }

    fn lex_integer(&mut self, first: SourceChar) -> Token {
        let (start, end) = self.lex_while(first, |c| c.is_ascii_digit());
        self.make_token(TokenKind::Integer, start, end)
    }

    fn lex_string(&mut self, quote: SourceChar) -> Result<Token, LexicalError> {
        let start = quote.offset;
        let mut value = CompactString::default();
        let mut invalid_escape = None;
        loop {
            let Some(c) = self.next_char() else {
                return Err(LexicalError {
                    kind: LexicalErrorKind::UnclosedString,
                    span: Span {
                        start,
                        length: (self.source.len() - start.to_usize()).into(),
                    },
                });
            };
            match c.value {
                '"' => {
                    let span = Span {
                        start,
                        length: c.next_offset() - start,
                    };
                    if let Some(kind) = invalid_escape {
                        return Err(LexicalError { kind, span });
                    }
                    return Ok(Token {
                        kind: TokenKind::String,
                        lexeme: value,
                        span,
                    });
                }
                '\\' => {
                    let Some(escaped) = self.next_char() else {
                        continue;
                    };
                    match escaped.value {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        other => {
                            invalid_escape.get_or_insert(LexicalErrorKind::UnknownEscape(other));
                        }
                    }
                }
                other => value.push(other),
            }
        }
    }
}

impl<'src> TokenSource for Lexer<'src> {
    fn next_token(&mut self) -> Result<Token, LexicalError> {
        loop {
            let Some(c) = self.next_char() else {
                let end = self.source.len().into();
                return Ok(self.make_token(TokenKind::Eof, end, end));
            };

            let token = match c.value {
                '(' => self.just(TokenKind::LeftParenthesis, c),
                ')' => self.just(TokenKind::RightParenthesis, c),
                '{' => self.just(TokenKind::LeftBrace, c),
                '}' => self.just(TokenKind::RightBrace, c),
                '[' => self.just(TokenKind::LeftBracket, c),
                ']' => self.just(TokenKind::RightBracket, c),
                ',' => self.just(TokenKind::Comma, c),
                ';' => self.just(TokenKind::Semicolon, c),
                ':' => self.just(TokenKind::Colon, c),
                '+' => self.just(TokenKind::Plus, c),
                '-' => self.just(TokenKind::Minus, c),
                '*' => self.just(TokenKind::Asterisk, c),
                '=' => self.one_or_two(c, '=', TokenKind::Equal, TokenKind::Assign),
                '!' => self.one_or_two(c, '=', TokenKind::NotEqual, TokenKind::Bang),
                '<' => self.one_or_two(c, '=', TokenKind::LessThanEqual, TokenKind::LessThan),
                '>' => self.one_or_two(
                    c,
                    '=',
                    TokenKind::GreaterThanEqual,
                    TokenKind::GreaterThan,
                ),
                '/' => {
                    if self.eat_if('/').is_some() {
                        self.skip_line_comment();
                        continue;
                    }
                    self.just(TokenKind::Slash, c)
                }
                '"' => return self.lex_string(c),
                v if v.is_ascii_digit() => self.lex_integer(c),
                v if v.is_ascii_alphabetic() || v == '_' => self.lex_ident_or_keyword(c),
                v if v.is_whitespace() => continue,
                v => {
                    return Err(LexicalError {
                        kind: LexicalErrorKind::Unrecognized(v),
                        span: Span {
                            start: c.offset,
                            length: v.len_utf8().into(),
                        },
                    })
                }
            };
            return Ok(token);
        }
    }
}
