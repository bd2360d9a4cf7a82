use super::{
    expression::{Expression, ExpressionNode},
    statement::{BlockStatement, Statement},
    ParserError, ParserErrorKind, Program,
};
use crate::lexer::{LineBreaks, TokenKind};
use crate::report::ReportSource;
use crate::stack::ensure_sufficient_stack;
use std::path::Path;

pub trait ProgramFormatter {
    fn format(&self, program: &Program) -> String;
}

pub struct DebugProgramFormatter;

impl ProgramFormatter for DebugProgramFormatter {
    fn format(&self, program: &Program) -> String {
        format!("{program:#?}")
    }
}

/// Renders the program back into fully parenthesized source text.
pub struct SourceProgramFormatter;

impl ProgramFormatter for SourceProgramFormatter {
    fn format(&self, program: &Program) -> String {
        program
            .iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders one s-expression per top level statement.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    pub fn format_statement(statement: &Statement) -> String {
        let mut buffer = String::new();
        Self::write_statement(&mut buffer, statement);
        buffer
    }

    pub fn format_expression(expr: &Expression) -> String {
        let mut buffer = String::new();
        Self::write_expression(&mut buffer, expr);
        buffer
    }

    fn write_statement(buffer: &mut String, statement: &Statement) {
        match statement {
            Statement::Let(stmt) => {
                buffer.push_str(&format!("(let {} ", stmt.name));
                Self::write_expression(buffer, &stmt.value);
                buffer.push(')');
            }
            Statement::Return(stmt) => {
                buffer.push_str("(return ");
                Self::write_expression(buffer, &stmt.value);
                buffer.push(')');
            }
            Statement::Expression(stmt) => Self::write_expression(buffer, &stmt.expr),
            Statement::Block(block) => Self::write_block(buffer, block),
        }
    }

    fn write_block(buffer: &mut String, block: &BlockStatement) {
        buffer.push_str("(block");
        for statement in block.statements.iter() {
            buffer.push(' ');
            Self::write_statement(buffer, statement);
        }
        buffer.push(')');
    }

    fn write_list<'a>(buffer: &mut String, items: impl Iterator<Item = &'a Expression>) {
        for item in items {
            buffer.push(' ');
            Self::write_expression(buffer, item);
        }
        buffer.push(')');
    }

    fn write_expression(buffer: &mut String, expr: &Expression) {
        ensure_sufficient_stack(|| match &expr.node {
            ExpressionNode::Identifier(ident) => buffer.push_str(&ident.name),
            ExpressionNode::Integer(v) => buffer.push_str(&v.to_string()),
            ExpressionNode::Boolean(v) => buffer.push_str(&v.to_string()),
            ExpressionNode::StringLiteral(v) => buffer.push_str(&format!("{:?}", v.as_str())),
            ExpressionNode::Prefix { operator, rhs } => {
                buffer.push_str(&format!("({operator} "));
                Self::write_expression(buffer, rhs);
                buffer.push(')');
            }
            ExpressionNode::Infix { operator, lhs, rhs } => {
                buffer.push_str(&format!("({operator} "));
                Self::write_expression(buffer, lhs);
                buffer.push(' ');
                Self::write_expression(buffer, rhs);
                buffer.push(')');
            }
            ExpressionNode::If {
                condition,
                consequence,
                alternative,
            } => {
                buffer.push_str("(if ");
                Self::write_expression(buffer, condition);
                buffer.push(' ');
                Self::write_block(buffer, consequence);
                if let Some(alternative) = alternative {
                    buffer.push(' ');
                    Self::write_block(buffer, alternative);
                }
                buffer.push(')');
            }
            ExpressionNode::Function(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                buffer.push_str(&format!("(fn ({parameters}) "));
                Self::write_block(buffer, &function.body);
                buffer.push(')');
            }
            ExpressionNode::Call { callee, arguments } => {
                buffer.push_str("(call ");
                Self::write_expression(buffer, callee);
                Self::write_list(buffer, arguments.iter());
            }
            ExpressionNode::Array(elements) => {
                buffer.push_str("(array");
                Self::write_list(buffer, elements.iter());
            }
            ExpressionNode::Index { object, index } => {
                buffer.push_str("(index ");
                Self::write_expression(buffer, object);
                buffer.push(' ');
                Self::write_expression(buffer, index);
                buffer.push(')');
            }
            ExpressionNode::Hash(pairs) => {
                buffer.push_str("(hash");
                for (key, value) in pairs.iter() {
                    buffer.push_str(" (");
                    Self::write_expression(buffer, key);
                    buffer.push(' ');
                    Self::write_expression(buffer, value);
                    buffer.push(')');
                }
                buffer.push(')');
            }
        })
    }
}

impl ProgramFormatter for SExpressionFormatter {
    fn format(&self, program: &Program) -> String {
        program
            .iter()
            .map(SExpressionFormatter::format_statement)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub trait ParserFormatter {
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugParserFormatter;

impl ParserFormatter for DebugParserFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

/// `(line) message`
pub struct BasicParserFormatter {
    line_breaks: LineBreaks,
}

impl BasicParserFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }
}

impl ParserFormatter for BasicParserFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("({line}) {error}")
    }
}

pub struct PrettyParserFormatter<'src> {
    source: ReportSource<'src>,
}

impl<'src> PrettyParserFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            source: ReportSource::new(text, path),
        }
    }
}

impl<'src> ParserFormatter for PrettyParserFormatter<'src> {
    fn format_error(&self, error: &ParserError) -> String {
        let (message, label) = match &error.kind {
            ParserErrorKind::UnexpectedToken {
                expected,
                actual: TokenKind::Eof,
            } => (
                "Unexpected end of input".to_string(),
                format!("Expected {expected} before the input ends"),
            ),
            ParserErrorKind::UnexpectedToken { expected, actual } => (
                "Expected a different token".to_string(),
                format!("Expected {expected} but got {actual}"),
            ),
            ParserErrorKind::NoPrefixParseFunction(kind) => (
                "Expected an expression".to_string(),
                format!("{kind} cannot start an expression"),
            ),
            ParserErrorKind::NoInfixParseFunction(kind) => (
                "Expected an operator".to_string(),
                format!("{kind} is not an infix operator"),
            ),
            ParserErrorKind::InvalidInteger(lexeme) => (
                "Invalid integer literal".to_string(),
                format!("{lexeme} does not fit in a 64-bit integer"),
            ),
            ParserErrorKind::LexicalError(e) => ("Invalid input".to_string(), e.to_string()),
        };
        self.source
            .render(error.code(), &message, error.span, &label)
    }
}
