use crate::lexer::Span;
use crate::parser::expression::{InfixOperator, PrefixOperator};
use crate::string::IdentName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("type mismatch: {lhs} {operator} {rhs}")]
    TypeMismatch {
        lhs: &'static str,
        operator: InfixOperator,
        rhs: &'static str,
    },
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: &'static str,
    },
    #[error("unknown operator: {lhs} {operator} {rhs}")]
    UnknownInfixOperator {
        lhs: &'static str,
        operator: InfixOperator,
        rhs: &'static str,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(IdentName),
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("wrong number of arguments: want={expected}, got={actual}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("wrong number of arguments. got={actual}, want={expected}")]
    WrongBuiltinArgumentCount { expected: usize, actual: usize },
    #[error("argument to `{function}` not supported, got {actual}")]
    UnsupportedArgument {
        function: &'static str,
        actual: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(&'static str),
    #[error("maximum call depth of {0} exceeded")]
    CallDepthExceeded(usize),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::TypeMismatch { .. } => "RT001",
            RuntimeErrorKind::UnknownPrefixOperator { .. } => "RT002",
            RuntimeErrorKind::UnknownInfixOperator { .. } => "RT003",
            RuntimeErrorKind::IdentifierNotFound(_) => "RT004",
            RuntimeErrorKind::NotAFunction(_) => "RT005",
            RuntimeErrorKind::WrongArgumentCount { .. } => "RT006",
            RuntimeErrorKind::WrongBuiltinArgumentCount { .. } => "RT007",
            RuntimeErrorKind::UnsupportedArgument { .. } => "RT008",
            RuntimeErrorKind::DivisionByZero => "RT009",
            RuntimeErrorKind::IndexNotSupported(_) => "RT010",
            RuntimeErrorKind::UnusableHashKey(_) => "RT011",
            RuntimeErrorKind::CallDepthExceeded(_) => "RT012",
        }
    }
}
