//! Builtin functions, resolved after the environment chain.

use crate::evaluator::SystemContext;
use crate::value::{error::RuntimeErrorKind, NativeFunction, Value};
use std::rc::Rc;

pub const BUILTIN_NAMES: [&str; 6] = ["len", "first", "last", "rest", "push", "puts"];

pub fn lookup(name: &str) -> Option<Value> {
    let function: Rc<dyn NativeFunction> = match name {
        "len" => Rc::new(NativeLen),
        "first" => Rc::new(NativeFirst),
        "last" => Rc::new(NativeLast),
        "rest" => Rc::new(NativeRest),
        "push" => Rc::new(NativePush),
        "puts" => Rc::new(NativePuts),
        _ => return None,
    };
    Some(Value::NativeFunction(function))
}

fn check_arity(arguments: &[Value], expected: usize) -> Result<(), RuntimeErrorKind> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(RuntimeErrorKind::WrongBuiltinArgumentCount {
            expected,
            actual: arguments.len(),
        })
    }
}

fn unsupported(function: &'static str, argument: &Value) -> RuntimeErrorKind {
    RuntimeErrorKind::UnsupportedArgument {
        function,
        actual: argument.type_name(),
    }
}

#[derive(Debug)]
pub struct NativeLen;

impl NativeFunction for NativeLen {
    fn get_name(&self) -> &'static str {
        "len"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        check_arity(arguments, 1)?;
        // Counts characters rather than bytes.
        let length = match &arguments[0] {
            Value::String(v) => v.chars().count(),
            Value::Array(elements) => elements.len(),
            v => return Err(unsupported(self.get_name(), v)),
        };
        Ok(Value::Integer(length as i64))
    }
}

#[derive(Debug)]
pub struct NativeFirst;

impl NativeFunction for NativeFirst {
    fn get_name(&self) -> &'static str {
        "first"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        check_arity(arguments, 1)?;
        match &arguments[0] {
            Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
            v => Err(unsupported(self.get_name(), v)),
        }
    }
}

#[derive(Debug)]
pub struct NativeLast;

impl NativeFunction for NativeLast {
    fn get_name(&self) -> &'static str {
        "last"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        check_arity(arguments, 1)?;
        match &arguments[0] {
            Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
            v => Err(unsupported(self.get_name(), v)),
        }
    }
}

#[derive(Debug)]
pub struct NativeRest;

impl NativeFunction for NativeRest {
    fn get_name(&self) -> &'static str {
        "rest"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        check_arity(arguments, 1)?;
        match &arguments[0] {
            Value::Array(elements) if elements.is_empty() => Ok(Value::Null),
            Value::Array(elements) => Ok(Value::from(elements[1..].to_vec())),
            v => Err(unsupported(self.get_name(), v)),
        }
    }
}

/// Returns a new array; the argument is left untouched.
#[derive(Debug)]
pub struct NativePush;

impl NativeFunction for NativePush {
    fn get_name(&self) -> &'static str {
        "push"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        check_arity(arguments, 2)?;
        match &arguments[0] {
            Value::Array(elements) => {
                let mut pushed = Vec::with_capacity(elements.len() + 1);
                pushed.extend(elements.iter().cloned());
                pushed.push(arguments[1].clone());
                Ok(Value::from(pushed))
            }
            v => Err(unsupported(self.get_name(), v)),
        }
    }
}

#[derive(Debug)]
pub struct NativePuts;

impl NativeFunction for NativePuts {
    fn get_name(&self) -> &'static str {
        "puts"
    }

    fn call(
        &self,
        arguments: &[Value],
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        for argument in arguments {
            context.writeln(&argument.to_string());
        }
        Ok(Value::Null)
    }
}
