pub mod error;
pub mod formatter;

use crate::environment::Environment;
use crate::evaluator::SystemContext;
use crate::parser::expression::{write_separated, InfixOperator, PrefixOperator};
use crate::parser::statement::BlockStatement;
use crate::string::Ident;
use compact_str::{CompactString, CompactStringExt};
use error::{RuntimeError, RuntimeErrorKind};
use std::{collections::BTreeMap, fmt, rc::Rc};

pub trait NativeFunction: fmt::Debug {
    fn get_name(&self) -> &'static str;
    fn call(
        &self,
        arguments: &[Value],
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind>;
}

/// A function literal paired with the environment it was evaluated in.
#[derive(Clone)]
pub struct Function {
    pub parameters: Rc<[Ident]>,
    pub body: Rc<BlockStatement>,
    pub closure: Environment,
}

// The closure can reach this function again, so it is left out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        write_separated(f, self.parameters.iter())?;
        write!(f, ") {{\n{}\n}}", self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(CompactString),
}

impl From<HashKey> for Value {
    fn from(key: HashKey) -> Self {
        match key {
            HashKey::Integer(v) => Value::Integer(v),
            HashKey::Boolean(v) => Value::Boolean(v),
            HashKey::String(v) => Value::String(v),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(v) => write!(f, "{v}"),
            HashKey::Boolean(v) => write!(f, "{v}"),
            HashKey::String(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(CompactString),
    Null,
    Array(Rc<Vec<Value>>),
    Hash(Rc<BTreeMap<HashKey, Value>>),
    Function(Rc<Function>),
    NativeFunction(Rc<dyn NativeFunction>),
    /// Carries a returned value up to the nearest function body or program.
    Return(Box<Value>),
    /// Carries a runtime error up to the program.
    Error(RuntimeError),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => lhs == rhs,
            (Value::Boolean(lhs), Value::Boolean(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            (Value::Null, Value::Null) => true,
            (Value::Array(lhs), Value::Array(rhs)) => lhs == rhs,
            (Value::Hash(lhs), Value::Hash(rhs)) => lhs == rhs,
            (Value::Function(lhs), Value::Function(rhs)) => Rc::ptr_eq(lhs, rhs),
            (Value::NativeFunction(lhs), Value::NativeFunction(rhs)) => {
                lhs.get_name() == rhs.get_name()
            }
            (Value::Return(lhs), Value::Return(rhs)) => lhs == rhs,
            (Value::Error(lhs), Value::Error(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
            Self::Array(elements) => {
                write!(f, "[")?;
                write_separated(f, elements.iter())?;
                write!(f, "]")
            }
            Self::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::Function(func) => write!(f, "{func}"),
            Self::NativeFunction(_) => write!(f, "builtin function"),
            Self::Return(v) => write!(f, "{v}"),
            Self::Error(e) => write!(f, "ERROR: {e}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(CompactString::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Rc::new(value))
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::NativeFunction(_) => "BUILTIN",
            Value::Return(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    /// Return and error values stop evaluation of the enclosing construct.
    pub fn is_signal(&self) -> bool {
        matches!(self, Value::Return(_) | Value::Error(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn unwrap_return(self) -> Value {
        match self {
            Value::Return(v) => *v,
            v => v,
        }
    }

    pub fn hash_key(&self) -> Result<HashKey, RuntimeErrorKind> {
        match self {
            Value::Integer(v) => Ok(HashKey::Integer(*v)),
            Value::Boolean(v) => Ok(HashKey::Boolean(*v)),
            Value::String(v) => Ok(HashKey::String(v.clone())),
            v => Err(RuntimeErrorKind::UnusableHashKey(v.type_name())),
        }
    }

    fn mismatch(&self, operator: InfixOperator, other: &Value) -> RuntimeErrorKind {
        let (lhs, rhs) = (self.type_name(), other.type_name());
        if lhs == rhs {
            RuntimeErrorKind::UnknownInfixOperator { lhs, operator, rhs }
        } else {
            RuntimeErrorKind::TypeMismatch { lhs, operator, rhs }
        }
    }
}

// Unary operators
impl Value {
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn logical_not(&self) -> Value {
        Value::Boolean(!self.is_truthy())
    }

    pub fn numeric_negate(&self) -> Result<Value, RuntimeErrorKind> {
        match self {
            Value::Integer(v) => Ok(Value::Integer(v.wrapping_neg())),
            v => Err(RuntimeErrorKind::UnknownPrefixOperator {
                operator: PrefixOperator::Minus,
                operand: v.type_name(),
            }),
        }
    }
}

// Binary operators. Integer arithmetic wraps on overflow.
impl Value {
    pub fn add(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Integer(lhs.wrapping_add(*rhs))),
            (Value::String(lhs), Value::String(rhs)) => {
                Ok(Value::String([lhs, rhs].concat_compact()))
            }
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::Add, rhs)),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Integer(lhs.wrapping_sub(*rhs))),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::Subtract, rhs)),
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Integer(lhs.wrapping_mul(*rhs))),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::Multiply, rhs)),
        }
    }

    pub fn divide(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(_), Value::Integer(0)) => Err(RuntimeErrorKind::DivisionByZero),
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Integer(lhs.wrapping_div(*rhs))),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::Divide, rhs)),
        }
    }

    pub fn less_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Boolean(lhs < rhs)),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::LessThan, rhs)),
        }
    }

    pub fn less_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Boolean(lhs <= rhs)),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::LessThanEqual, rhs)),
        }
    }

    pub fn greater_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Boolean(lhs > rhs)),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::GreaterThan, rhs)),
        }
    }

    pub fn greater_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Boolean(lhs >= rhs)),
            (lhs, rhs) => Err(lhs.mismatch(InfixOperator::GreaterThanEqual, rhs)),
        }
    }

    fn same_scalar(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Some(lhs == rhs),
            (Value::Boolean(lhs), Value::Boolean(rhs)) => Some(lhs == rhs),
            (Value::String(lhs), Value::String(rhs)) => Some(lhs == rhs),
            (Value::Null, Value::Null) => Some(true),
            // Booleans and null compare by identity.
            (Value::Boolean(_), Value::Null) | (Value::Null, Value::Boolean(_)) => Some(false),
            _ => None,
        }
    }

    pub fn is_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.same_scalar(other)
            .map(Value::Boolean)
            .ok_or_else(|| self.mismatch(InfixOperator::Equal, other))
    }

    pub fn is_not_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.same_scalar(other)
            .map(|equal| Value::Boolean(!equal))
            .ok_or_else(|| self.mismatch(InfixOperator::NotEqual, other))
    }

    pub fn index(&self, index: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, index) {
            (Value::Array(elements), Value::Integer(i)) => Ok(usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .unwrap_or(Value::Null)),
            (Value::Hash(pairs), key) => {
                let key = key.hash_key()?;
                Ok(pairs.get(&key).cloned().unwrap_or(Value::Null))
            }
            (object, _) => Err(RuntimeErrorKind::IndexNotSupported(object.type_name())),
        }
    }
}
