use super::error::{RuntimeError, RuntimeErrorKind};
use super::Value;
use crate::lexer::LineBreaks;
use crate::report::ReportSource;
use std::path::Path;

pub trait ValueFormatter {
    fn format(&self, value: &Value) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

/// Plain output: values as they print in the REPL, errors as `(line) ERROR: message`.
pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        let line_breaks = LineBreaks::new(text);
        Self { line_breaks }
    }
}

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("({line}) ERROR: {error}")
    }
}

pub struct PrettyFormatter<'src> {
    source: ReportSource<'src>,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            source: ReportSource::new(text, path),
        }
    }
}

impl<'src> ValueFormatter for PrettyFormatter<'src> {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let (message, label) = match &error.kind {
            RuntimeErrorKind::TypeMismatch { lhs, operator, rhs } => (
                "Operands have different types",
                format!("Cannot apply `{operator}` to {lhs} and {rhs}"),
            ),
            RuntimeErrorKind::UnknownPrefixOperator { operator, operand } => (
                "Unsupported prefix operator",
                format!("`{operator}` is not defined for {operand}"),
            ),
            RuntimeErrorKind::UnknownInfixOperator { lhs, operator, rhs } => (
                "Unsupported infix operator",
                format!("`{operator}` is not defined for {lhs} and {rhs}"),
            ),
            RuntimeErrorKind::IdentifierNotFound(name) => (
                "Attempted to access an undefined identifier",
                format!("`{name}` has not been bound"),
            ),
            RuntimeErrorKind::NotAFunction(kind) => (
                "Attempted to call a value that is not callable",
                format!("{kind} is not callable"),
            ),
            RuntimeErrorKind::WrongArgumentCount { expected, actual } => (
                "Wrong number of arguments",
                format!("Expected {expected} arguments but got {actual}"),
            ),
            RuntimeErrorKind::WrongBuiltinArgumentCount { expected, actual } => (
                "Wrong number of builtin arguments",
                format!("Expected {expected} arguments but got {actual}"),
            ),
            RuntimeErrorKind::UnsupportedArgument { function, actual } => (
                "Unsupported builtin argument",
                format!("`{function}` does not accept {actual}"),
            ),
            RuntimeErrorKind::DivisionByZero => {
                ("Division by zero", "The divisor evaluated to 0".to_string())
            }
            RuntimeErrorKind::IndexNotSupported(object) => (
                "Unsupported index operation",
                format!("{object} values cannot be indexed this way"),
            ),
            RuntimeErrorKind::UnusableHashKey(kind) => (
                "Unusable hash key",
                format!("{kind} values cannot be used as hash keys"),
            ),
            RuntimeErrorKind::CallDepthExceeded(depth) => (
                "Call stack exhausted",
                format!("Nested calls exceeded the limit of {depth}"),
            ),
        };
        self.source.render(error.code(), message, error.span, &label)
    }
}
