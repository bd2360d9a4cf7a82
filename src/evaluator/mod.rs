pub mod context;

use crate::environment::{native, Environment};
use crate::lexer::Span;
use crate::parser::expression::{Expression, ExpressionNode, InfixOperator, PrefixOperator};
use crate::parser::statement::{BlockStatement, Statement};
use crate::parser::Program;
use crate::stack::ensure_sufficient_stack;
use crate::value::error::{RuntimeError, RuntimeErrorKind};
use crate::value::{Function, Value};
use std::collections::BTreeMap;
use std::rc::Rc;

pub use context::{BufferedContext, StdioContext};

/// Where `puts` output goes.
pub trait SystemContext {
    fn writeln(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Number of nested function calls allowed before evaluation fails.
    pub max_call_depth: usize,
}

impl EvaluatorConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(value: &'a Program) -> Self {
        Node::Program(value)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(value: &'a Statement) -> Self {
        Node::Statement(value)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(value: &'a Expression) -> Self {
        Node::Expression(value)
    }
}

/// Returns early from the enclosing evaluation when a value is a return or
/// error signal.
macro_rules! propagate {
    ($value:expr) => {{
        let value = $value;
        if value.is_signal() {
            return value;
        }
        value
    }};
}

fn lift(result: Result<Value, RuntimeErrorKind>, span: Span) -> Value {
    result.unwrap_or_else(|kind| Value::Error(RuntimeError::new(kind, span)))
}

fn error(kind: RuntimeErrorKind, span: Span) -> Value {
    Value::Error(RuntimeError::new(kind, span))
}

/// Tree walking evaluator. Runtime failures come back as [`Value::Error`].
pub struct Evaluator<C> {
    context: C,
    config: EvaluatorConfig,
    depth: usize,
}

impl<C: SystemContext> Evaluator<C> {
    pub fn new(context: C) -> Self {
        Self::with_config(context, EvaluatorConfig::default())
    }

    pub fn with_config(context: C, config: EvaluatorConfig) -> Self {
        Self {
            context,
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn eval<'a>(&mut self, node: impl Into<Node<'a>>, environment: &Environment) -> Value {
        match node.into() {
            Node::Program(program) => self.eval_program(program, environment),
            Node::Statement(statement) => self.eval_statement(statement, environment),
            Node::Expression(expr) => self.eval_expression(expr, environment),
        }
    }

    fn eval_program(&mut self, program: &Program, environment: &Environment) -> Value {
        tracing::debug!(statements = program.len(), "evaluating program");
        let mut result = Value::Null;
        for statement in program.iter() {
            result = self.eval_statement(statement, environment);
            if let Value::Error(e) = &result {
                tracing::debug!(error = %e, code = e.code(), "runtime error");
                return result;
            }
            if result.is_signal() {
                return result.unwrap_return();
            }
        }
        result
    }

    // Return signals are left wrapped so they reach the enclosing call.
    fn eval_block(&mut self, block: &BlockStatement, environment: &Environment) -> Value {
        let mut result = Value::Null;
        for statement in block.statements.iter() {
            result = propagate!(self.eval_statement(statement, environment));
        }
        result
    }

    fn eval_statement(&mut self, statement: &Statement, environment: &Environment) -> Value {
        match statement {
            Statement::Let(stmt) => {
                let value = propagate!(self.eval_expression(&stmt.value, environment));
                environment.declare(stmt.name.name.clone(), value);
                Value::Null
            }
            Statement::Return(stmt) => {
                let value = propagate!(self.eval_expression(&stmt.value, environment));
                Value::Return(Box::new(value))
            }
            Statement::Expression(stmt) => self.eval_expression(&stmt.expr, environment),
            Statement::Block(block) => self.eval_block(block, environment),
        }
    }

    fn eval_expression(&mut self, expr: &Expression, environment: &Environment) -> Value {
        ensure_sufficient_stack(|| self.eval_expression_node(expr, environment))
    }

    fn eval_expression_node(&mut self, expr: &Expression, environment: &Environment) -> Value {
        match &expr.node {
            ExpressionNode::Identifier(ident) => environment
                .access(&ident.name)
                .or_else(|| native::lookup(&ident.name))
                .unwrap_or_else(|| {
                    error(
                        RuntimeErrorKind::IdentifierNotFound(ident.name.clone()),
                        ident.span,
                    )
                }),
            ExpressionNode::Integer(v) => Value::Integer(*v),
            ExpressionNode::Boolean(v) => Value::Boolean(*v),
            ExpressionNode::StringLiteral(v) => Value::String(v.clone()),
            ExpressionNode::Prefix { operator, rhs } => {
                let operand = propagate!(self.eval_expression(rhs, environment));
                let result = match operator {
                    PrefixOperator::Bang => Ok(operand.logical_not()),
                    PrefixOperator::Minus => operand.numeric_negate(),
                };
                lift(result, expr.span)
            }
            ExpressionNode::Infix { operator, lhs, rhs } => {
                let lhs = propagate!(self.eval_expression(lhs, environment));
                let rhs = propagate!(self.eval_expression(rhs, environment));
                let result = match operator {
                    InfixOperator::Add => lhs.add(&rhs),
                    InfixOperator::Subtract => lhs.subtract(&rhs),
                    InfixOperator::Multiply => lhs.multiply(&rhs),
                    InfixOperator::Divide => lhs.divide(&rhs),
                    InfixOperator::LessThan => lhs.less_than(&rhs),
                    InfixOperator::LessThanEqual => lhs.less_than_or_equal(&rhs),
                    InfixOperator::GreaterThan => lhs.greater_than(&rhs),
                    InfixOperator::GreaterThanEqual => lhs.greater_than_or_equal(&rhs),
                    InfixOperator::Equal => lhs.is_equal(&rhs),
                    InfixOperator::NotEqual => lhs.is_not_equal(&rhs),
                };
                lift(result, expr.span)
            }
            ExpressionNode::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = propagate!(self.eval_expression(condition, environment));
                if condition.is_truthy() {
                    self.eval_block(consequence, environment)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, environment)
                } else {
                    Value::Null
                }
            }
            ExpressionNode::Function(literal) => Value::Function(Rc::new(Function {
                parameters: literal.parameters.clone(),
                body: literal.body.clone(),
                closure: environment.clone(),
            })),
            ExpressionNode::Call { callee, arguments } => {
                let function = propagate!(self.eval_expression(callee, environment));
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments.iter() {
                    values.push(propagate!(self.eval_expression(argument, environment)));
                }
                self.apply_function(function, &values, expr.span)
            }
            ExpressionNode::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements.iter() {
                    values.push(propagate!(self.eval_expression(element, environment)));
                }
                Value::from(values)
            }
            ExpressionNode::Index { object, index } => {
                let object = propagate!(self.eval_expression(object, environment));
                let index = propagate!(self.eval_expression(index, environment));
                lift(object.index(&index), expr.span)
            }
            ExpressionNode::Hash(pairs) => {
                let mut hash = BTreeMap::new();
                for (key_expr, value_expr) in pairs.iter() {
                    let key = propagate!(self.eval_expression(key_expr, environment));
                    let key = match key.hash_key() {
                        Ok(key) => key,
                        Err(kind) => return error(kind, key_expr.span),
                    };
                    let value = propagate!(self.eval_expression(value_expr, environment));
                    hash.insert(key, value);
                }
                Value::Hash(Rc::new(hash))
            }
        }
    }

    fn apply_function(&mut self, function: Value, arguments: &[Value], span: Span) -> Value {
        match function {
            Value::Function(function) => {
                if function.parameters.len() != arguments.len() {
                    return error(
                        RuntimeErrorKind::WrongArgumentCount {
                            expected: function.parameters.len(),
                            actual: arguments.len(),
                        },
                        span,
                    );
                }
                if self.depth >= self.config.max_call_depth {
                    tracing::debug!(depth = self.depth, "call depth limit reached");
                    return error(
                        RuntimeErrorKind::CallDepthExceeded(self.config.max_call_depth),
                        span,
                    );
                }

                let scope = function.closure.new_scope();
                for (parameter, argument) in function.parameters.iter().zip(arguments) {
                    scope.declare(parameter.name.clone(), argument.clone());
                }

                self.depth += 1;
                tracing::trace!(depth = self.depth, arity = arguments.len(), "calling function");
                let result = self.eval_block(&function.body, &scope);
                self.depth -= 1;
                result.unwrap_return()
            }
            Value::NativeFunction(native) => {
                tracing::trace!(name = native.get_name(), "calling builtin");
                lift(native.call(arguments, &mut self.context), span)
            }
            v => error(RuntimeErrorKind::NotAFunction(v.type_name()), span),
        }
    }
}
