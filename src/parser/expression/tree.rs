use std::rc::Rc;

use compact_str::CompactString;

use super::{InfixOperator, PrefixOperator};
use crate::lexer::Span;
use crate::parser::statement::{BlockStatement, Statement};
use crate::stack::ensure_sufficient_stack;
use crate::string::Ident;

/// An expression node and the source it was parsed from.
///
/// Operator chains nest one `Expression` per term, so every trait that walks
/// the tree grows the stack as it goes and `Drop` tears it down iteratively.
pub struct Expression {
    pub node: ExpressionNode,
    pub span: Span,
}

impl Expression {
    pub fn new(node: ExpressionNode, span: Span) -> Self {
        Self { node, span }
    }

    /// Moves every child expression of this node onto `worklist`, leaving the
    /// node itself childless.
    fn detach_children(&mut self, worklist: &mut Vec<Expression>) {
        let node = std::mem::replace(&mut self.node, ExpressionNode::Boolean(false));
        match node {
            ExpressionNode::Identifier(_)
            | ExpressionNode::Integer(_)
            | ExpressionNode::Boolean(_)
            | ExpressionNode::StringLiteral(_) => {}
            ExpressionNode::Prefix { rhs, .. } => worklist.push(*rhs),
            ExpressionNode::Infix { lhs, rhs, .. } => {
                worklist.push(*lhs);
                worklist.push(*rhs);
            }
            ExpressionNode::If {
                condition,
                consequence,
                alternative,
            } => {
                worklist.push(*condition);
                detach_block(consequence, worklist);
                if let Some(alternative) = alternative {
                    detach_block(alternative, worklist);
                }
            }
            // Closures may still share the body.
            ExpressionNode::Function(literal) => {
                if let Ok(body) = std::rc::Rc::try_unwrap(literal.body) {
                    detach_block(body, worklist);
                }
            }
            ExpressionNode::Call { callee, arguments } => {
                worklist.push(*callee);
                worklist.extend(arguments);
            }
            ExpressionNode::Array(elements) => worklist.extend(elements),
            ExpressionNode::Index { object, index } => {
                worklist.push(*object);
                worklist.push(*index);
            }
            ExpressionNode::Hash(pairs) => {
                for (key, value) in pairs {
                    worklist.push(key);
                    worklist.push(value);
                }
            }
        }
    }
}

fn detach_block(block: BlockStatement, worklist: &mut Vec<Expression>) {
    for statement in block.statements {
        match statement {
            Statement::Let(stmt) => worklist.push(stmt.value),
            Statement::Return(stmt) => worklist.push(stmt.value),
            Statement::Expression(stmt) => worklist.push(stmt.expr),
            Statement::Block(block) => detach_block(block, worklist),
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut worklist = Vec::new();
        self.detach_children(&mut worklist);
        while let Some(mut expr) = worklist.pop() {
            expr.detach_children(&mut worklist);
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| Self {
            node: self.node.clone(),
            span: self.span,
        })
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.span == other.span && self.node == other.node)
    }
}

impl std::fmt::Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("Expression")
                .field("node", &self.node)
                .field("span", &self.span)
                .finish()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Identifier(Ident),
    Integer(i64),
    Boolean(bool),
    StringLiteral(CompactString),
    Prefix {
        operator: PrefixOperator,
        rhs: Box<Expression>,
    },
    Infix {
        operator: InfixOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function(FunctionLiteral),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Array(Vec<Expression>),
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    Hash(Vec<(Expression, Expression)>),
}

/// Parameters and body are shared with every closure created from the literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Rc<[Ident]>,
    pub body: Rc<BlockStatement>,
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ensure_sufficient_stack(|| write!(f, "{}", self.node))
    }
}

impl std::fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::StringLiteral(v) => write!(f, "{v}"),
            Self::Prefix { operator, rhs } => write!(f, "({operator}{rhs})"),
            Self::Infix { operator, lhs, rhs } => write!(f, "({lhs} {operator} {rhs})"),
            Self::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            Self::Function(function) => write!(f, "{function}"),
            Self::Call { callee, arguments } => {
                write!(f, "{callee}(")?;
                write_separated(f, arguments.iter())?;
                write!(f, ")")
            }
            Self::Array(elements) => {
                write!(f, "[")?;
                write_separated(f, elements.iter())?;
                write!(f, "]")
            }
            Self::Index { object, index } => write!(f, "({object}[{index}])"),
            Self::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl std::fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn(")?;
        write_separated(f, self.parameters.iter())?;
        write!(f, ") {}", self.body)
    }
}

pub(crate) fn write_separated<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> std::fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
