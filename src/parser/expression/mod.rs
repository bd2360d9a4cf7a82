mod operator;
mod tree;

pub use operator::{InfixOperator, Precedence, PrefixOperator};
pub(crate) use tree::write_separated;
pub use tree::{Expression, ExpressionNode, FunctionLiteral};
