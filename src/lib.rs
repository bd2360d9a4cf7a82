pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
mod report;
mod stack;
pub mod string;
pub mod value;

use parser::{Parser, ParserError, Program};

/// Parses `source` into a program, returning every diagnostic found on the way.
pub fn parse(source: &str) -> (Program, Vec<ParserError>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    (program, parser.into_errors())
}
