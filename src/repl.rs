//! Line oriented read-eval-print loop.
//!
//! Every line is parsed and evaluated as a whole program against one
//! environment that lives for the whole session, so bindings made on one line
//! are visible on the next.

use crate::environment::Environment;
use crate::evaluator::{BufferedContext, Evaluator, EvaluatorConfig};
use crate::parser::statement::Statement;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = ">> ";

/// Runs the loop until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: EvaluatorConfig,
) -> io::Result<()> {
    let environment = Environment::new();
    let mut evaluator = Evaluator::with_config(BufferedContext::new(), config);
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let (program, errors) = crate::parse(&line);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "line rejected by parser");
            writeln!(output, "parser errors:")?;
            for error in errors.iter() {
                writeln!(output, "\t{error}")?;
            }
            continue;
        }

        let value = evaluator.eval(&program, &environment);
        output.write_all(evaluator.context_mut().take().as_bytes())?;

        let binds_only = matches!(program.statements().last(), None | Some(Statement::Let(_)));
        if value.is_error() || !binds_only {
            writeln!(output, "{value}")?;
        }
    }
}
