mod error;
pub mod expression;
pub mod formatter;
mod program;
pub mod statement;

pub use error::{ParserError, ParserErrorKind};
pub use program::Program;

use crate::{
    lexer::{Lexer, Span, Token, TokenKind, TokenSource},
    stack::ensure_sufficient_stack,
    string::Ident,
};
use expression::{
    Expression, ExpressionNode, FunctionLiteral, InfixOperator, Precedence, PrefixOperator,
};
use statement::{BlockStatement, ExpressionStatement, LetStatement, ReturnStatement, Statement};
use std::rc::Rc;

/// Parses the token in current position into the start of an expression.
type PrefixParseFn<S> = fn(&mut Parser<S>) -> Result<Expression, ParserError>;
/// Folds the token in current position and what follows it onto `lhs`.
type InfixParseFn<S> = fn(&mut Parser<S>, Expression) -> Result<Expression, ParserError>;

/// A Pratt parser over a [`TokenSource`].
///
/// Parse functions start with `current` on the first token of their construct
/// and leave `current` on its last token.
pub struct Parser<S> {
    source: S,
    current: Token,
    peek: Token,
    errors: Vec<ParserError>,
    /// Braces opened and not yet closed before `current`.
    nesting: usize,
}

impl<'src> Parser<Lexer<'src>> {
    pub fn new(source: &'src str) -> Self {
        Self::from_source(Lexer::new(source))
    }
}

impl<S: TokenSource> Parser<S> {
    pub fn from_source(source: S) -> Self {
        let placeholder = Token {
            kind: TokenKind::Eof,
            lexeme: Default::default(),
            span: Span::default(),
        };
        let mut parser = Self {
            source,
            current: placeholder.clone(),
            peek: placeholder,
            errors: Vec::new(),
            nesting: 0,
        };
        parser.advance();
        parser.advance();
        parser
    }

    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParserError> {
        self.errors
    }

    fn pull(&mut self) -> Token {
        loop {
            match self.source.next_token() {
                Ok(token) => return token,
                Err(error) => {
                    tracing::trace!(%error, "skipping unlexable input");
                    self.errors.push(error.into());
                }
            }
        }
    }

    fn advance(&mut self) {
        match self.current.kind {
            TokenKind::LeftBrace => self.nesting += 1,
            TokenKind::RightBrace => self.nesting = self.nesting.saturating_sub(1),
            _ => {}
        }
        let next = self.pull();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn expect_peek(&mut self, expected: TokenKind) -> Result<(), ParserError> {
        if self.peek.kind == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParserError {
                kind: ParserErrorKind::UnexpectedToken {
                    expected,
                    actual: self.peek.kind,
                },
                span: self.peek.span,
            })
        }
    }

    fn eat_peek(&mut self, next: TokenKind) -> bool {
        if self.peek.kind == next {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_ident(&self) -> Ident {
        Ident {
            name: self.current.lexeme.clone(),
            span: self.current.span,
        }
    }

    /// Skips to the start of the next statement at brace depth `depth`.
    ///
    /// Blocks left open by the abandoned statement are skipped up to their
    /// closing brace, so nothing inside them resurfaces as a statement.
    fn synchronize(&mut self, depth: usize) {
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon if self.nesting <= depth => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
            if self.nesting <= depth
                && matches!(
                    self.current.kind,
                    TokenKind::KeywordLet | TokenKind::KeywordReturn
                )
            {
                return;
            }
        }
    }
}

// Parse program/statements
impl<S: TokenSource> Parser<S> {
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current.is_eof() {
            let depth = self.nesting;
            match self.parse_statement() {
                Ok(statement) => {
                    statements.push(statement);
                    self.advance();
                }
                Err(error) => {
                    tracing::trace!(%error, "recovering from parse error");
                    self.errors.push(error);
                    self.synchronize(depth);
                }
            }
        }

        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Program::new(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.current.kind {
            TokenKind::KeywordLet => self.parse_let_statement().map(Statement::Let),
            TokenKind::KeywordReturn => self.parse_return_statement().map(Statement::Return),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Result<LetStatement, ParserError> {
        let start = self.current.span;
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current_ident();
        self.expect_peek(TokenKind::Assign)?;
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.eat_peek(TokenKind::Semicolon);

        Ok(LetStatement {
            name,
            value,
            span: start.merge(&self.current.span),
        })
    }

    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParserError> {
        let start = self.current.span;
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.eat_peek(TokenKind::Semicolon);

        Ok(ReturnStatement {
            value,
            span: start.merge(&self.current.span),
        })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParserError> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        let span = expr.span;
        // Optional so that `1 + 2` works at the prompt.
        self.eat_peek(TokenKind::Semicolon);

        Ok(ExpressionStatement { expr, span })
    }

    fn parse_block_statement(&mut self) -> Result<BlockStatement, ParserError> {
        let start = self.current.span;
        let mut statements = Vec::new();
        self.advance();

        while self.current.kind != TokenKind::RightBrace {
            if self.current.is_eof() {
                return Err(ParserError {
                    kind: ParserErrorKind::UnexpectedToken {
                        expected: TokenKind::RightBrace,
                        actual: TokenKind::Eof,
                    },
                    span: self.current.span,
                });
            }
            statements.push(self.parse_statement()?);
            self.advance();
        }

        Ok(BlockStatement {
            statements,
            span: start.merge(&self.current.span),
        })
    }
}

// Pratt parser for expressions
impl<S: TokenSource> Parser<S> {
    pub fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ParserError> {
        ensure_sufficient_stack(|| {
            let Some(prefix) = Self::prefix_parse_fn(self.current.kind) else {
                return Err(ParserError {
                    kind: ParserErrorKind::NoPrefixParseFunction(self.current.kind),
                    span: self.current.span,
                });
            };
            let mut lhs = prefix(self)?;

            while self.peek.kind != TokenKind::Semicolon
                && precedence < Precedence::of(self.peek.kind)
            {
                let Some(infix) = Self::infix_parse_fn(self.peek.kind) else {
                    return Ok(lhs);
                };
                self.advance();
                lhs = infix(self, lhs)?;
            }

            Ok(lhs)
        })
    }

    fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn<S>> {
        let parse: PrefixParseFn<S> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Integer => Self::parse_integer_literal,
            TokenKind::String => Self::parse_string_literal,
            TokenKind::KeywordTrue | TokenKind::KeywordFalse => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix_expression,
            TokenKind::LeftParenthesis => Self::parse_grouped_expression,
            TokenKind::KeywordIf => Self::parse_if_expression,
            TokenKind::KeywordFn => Self::parse_function_literal,
            TokenKind::LeftBracket => Self::parse_array_literal,
            TokenKind::LeftBrace => Self::parse_hash_literal,
            _ => return None,
        };
        Some(parse)
    }

    fn infix_parse_fn(kind: TokenKind) -> Option<InfixParseFn<S>> {
        let parse: InfixParseFn<S> = match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::LessThan
            | TokenKind::LessThanEqual
            | TokenKind::GreaterThan
            | TokenKind::GreaterThanEqual
            | TokenKind::Equal
            | TokenKind::NotEqual => Self::parse_infix_expression,
            TokenKind::LeftParenthesis => Self::parse_call_expression,
            TokenKind::LeftBracket => Self::parse_index_expression,
            _ => return None,
        };
        Some(parse)
    }

    fn parse_identifier(&mut self) -> Result<Expression, ParserError> {
        let ident = self.current_ident();
        let span = ident.span;
        Ok(Expression::new(ExpressionNode::Identifier(ident), span))
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParserError> {
        let token = &self.current;
        let value = token.lexeme.parse::<i64>().map_err(|_| ParserError {
            kind: ParserErrorKind::InvalidInteger(token.lexeme.clone()),
            span: token.span,
        })?;
        Ok(Expression::new(ExpressionNode::Integer(value), token.span))
    }

    fn parse_string_literal(&mut self) -> Result<Expression, ParserError> {
        Ok(Expression::new(
            ExpressionNode::StringLiteral(self.current.lexeme.clone()),
            self.current.span,
        ))
    }

    fn parse_boolean(&mut self) -> Result<Expression, ParserError> {
        let value = self.current.kind == TokenKind::KeywordTrue;
        Ok(Expression::new(
            ExpressionNode::Boolean(value),
            self.current.span,
        ))
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression, ParserError> {
        let start = self.current.span;
        let operator = PrefixOperator::from_token(self.current.kind).ok_or(ParserError {
            kind: ParserErrorKind::NoPrefixParseFunction(self.current.kind),
            span: start,
        })?;
        self.advance();

        let rhs = self.parse_expression(Precedence::Prefix)?;
        let span = start.merge(&rhs.span);
        Ok(Expression::new(
            ExpressionNode::Prefix {
                operator,
                rhs: Box::new(rhs),
            },
            span,
        ))
    }

    fn parse_infix_expression(&mut self, lhs: Expression) -> Result<Expression, ParserError> {
        let operator = InfixOperator::from_token(self.current.kind).ok_or(ParserError {
            kind: ParserErrorKind::NoInfixParseFunction(self.current.kind),
            span: self.current.span,
        })?;
        let precedence = Precedence::of(self.current.kind);
        self.advance();

        let rhs = self.parse_expression(precedence)?;
        let span = lhs.span.merge(&rhs.span);
        Ok(Expression::new(
            ExpressionNode::Infix {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        ))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression, ParserError> {
        self.advance();
        let inner = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParenthesis)?;
        Ok(inner)
    }

    fn parse_if_expression(&mut self) -> Result<Expression, ParserError> {
        let start = self.current.span;
        self.expect_peek(TokenKind::LeftParenthesis)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParenthesis)?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block_statement()?;

        let mut alternative = None;
        if self.eat_peek(TokenKind::KeywordElse) {
            if self.eat_peek(TokenKind::KeywordIf) {
                // `else if` nests the chained conditional as the sole statement of the branch.
                let nested = self.parse_if_expression()?;
                let span = nested.span;
                alternative = Some(BlockStatement {
                    statements: vec![Statement::Expression(ExpressionStatement {
                        expr: nested,
                        span,
                    })],
                    span,
                });
            } else {
                self.expect_peek(TokenKind::LeftBrace)?;
                alternative = Some(self.parse_block_statement()?);
            }
        }

        Ok(Expression::new(
            ExpressionNode::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            start.merge(&self.current.span),
        ))
    }

    fn parse_function_literal(&mut self) -> Result<Expression, ParserError> {
        let start = self.current.span;
        self.expect_peek(TokenKind::LeftParenthesis)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LeftBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::new(
            ExpressionNode::Function(FunctionLiteral {
                parameters: parameters.into(),
                body: Rc::new(body),
            }),
            start.merge(&self.current.span),
        ))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Ident>, ParserError> {
        let mut parameters = Vec::new();
        if self.eat_peek(TokenKind::RightParenthesis) {
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.current_ident());
        while self.eat_peek(TokenKind::Comma) {
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.current_ident());
        }
        self.expect_peek(TokenKind::RightParenthesis)?;

        Ok(parameters)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Result<Expression, ParserError> {
        let arguments = self.parse_expression_list(TokenKind::RightParenthesis)?;
        let span = callee.span.merge(&self.current.span);
        Ok(Expression::new(
            ExpressionNode::Call {
                callee: Box::new(callee),
                arguments,
            },
            span,
        ))
    }

    fn parse_array_literal(&mut self) -> Result<Expression, ParserError> {
        let start = self.current.span;
        let elements = self.parse_expression_list(TokenKind::RightBracket)?;
        Ok(Expression::new(
            ExpressionNode::Array(elements),
            start.merge(&self.current.span),
        ))
    }

    fn parse_index_expression(&mut self, object: Expression) -> Result<Expression, ParserError> {
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightBracket)?;

        let span = object.span.merge(&self.current.span);
        Ok(Expression::new(
            ExpressionNode::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
            span,
        ))
    }

    fn parse_hash_literal(&mut self) -> Result<Expression, ParserError> {
        let start = self.current.span;
        let mut pairs = Vec::new();

        while self.peek.kind != TokenKind::RightBrace {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if self.peek.kind != TokenKind::RightBrace {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::RightBrace)?;

        Ok(Expression::new(
            ExpressionNode::Hash(pairs),
            start.merge(&self.current.span),
        ))
    }

    /// Parses comma separated expressions up to and including `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>, ParserError> {
        let mut list = Vec::new();
        if self.eat_peek(end) {
            return Ok(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.eat_peek(TokenKind::Comma) {
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;

        Ok(list)
    }
}
