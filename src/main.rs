use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use monkey::evaluator::EvaluatorConfig;
use monkey::parser::ParserError;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

const EXIT_DATA_ERROR: u8 = 65;
const EXIT_SOFTWARE_ERROR: u8 = 70;

#[derive(Debug, Parser)]
#[clap(name = "monkey", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: MonkeyCommand,
}

#[derive(Debug, Subcommand)]
pub enum MonkeyCommand {
    /// Print the tokens of a source file.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the syntax tree of a source file.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "source")]
        format: ProgramFormat,
    },
    /// Evaluate a source file.
    Run {
        path: PathBuf,
        #[clap(
            long = "max-call-depth",
            env = "MONKEY_MAX_CALL_DEPTH",
            default_value_t = EvaluatorConfig::DEFAULT_MAX_CALL_DEPTH
        )]
        max_call_depth: usize,
        /// Report errors as single lines instead of annotated source.
        #[clap(long)]
        plain: bool,
    },
    /// Start an interactive session on standard input.
    Repl {
        #[clap(
            long = "max-call-depth",
            env = "MONKEY_MAX_CALL_DEPTH",
            default_value_t = EvaluatorConfig::DEFAULT_MAX_CALL_DEPTH
        )]
        max_call_depth: usize,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
    Pretty,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    Source,
    #[clap(name = "sexpr")]
    SExpr,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();
    let args = CLArgs::parse();
    match args.routine {
        MonkeyCommand::Tokenize { path, format } => {
            let src = read_source(&path)?;
            Ok(tokenize(&src, &path, &format))
        }
        MonkeyCommand::Parse { path, format } => {
            let src = read_source(&path)?;
            Ok(parse(&src, &path, &format))
        }
        MonkeyCommand::Run {
            path,
            max_call_depth,
            plain,
        } => {
            let src = read_source(&path)?;
            Ok(run(&src, &path, EvaluatorConfig { max_call_depth }, plain))
        }
        MonkeyCommand::Repl { max_call_depth } => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            monkey::repl::start(stdin, stdout, EvaluatorConfig { max_call_depth })
                .wrap_err("REPL input/output failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Installs a stderr subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_source(path: &Path) -> Result<String> {
    tracing::debug!(?path, "reading source");
    read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

fn tokenize(src: &str, path: &Path, format: &TokenFormat) -> ExitCode {
    use monkey::lexer::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ToFormatter, TokenFormatter,
    };
    use monkey::lexer::{Lexer, TokenSource};

    let mut lexer = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter + '_> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(&lexer)),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(&lexer)),
        TokenFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
    };
    let mut succeeded = true;
    loop {
        match lexer.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if token.is_eof() {
                    break;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_lexical_error(&error));
                succeeded = false;
            }
        }
    }
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DATA_ERROR)
    }
}

fn report_parser_errors(src: &str, path: &Path, errors: &[ParserError], plain: bool) {
    use monkey::parser::formatter::{BasicParserFormatter, ParserFormatter, PrettyParserFormatter};

    let formatter: Box<dyn ParserFormatter + '_> = if plain {
        Box::new(BasicParserFormatter::new(src))
    } else {
        Box::new(PrettyParserFormatter::new(src, path))
    };
    for error in errors {
        eprintln!("{}", formatter.format_error(error));
    }
}

fn parse(src: &str, path: &Path, format: &ProgramFormat) -> ExitCode {
    use monkey::parser::formatter::{
        DebugProgramFormatter, ProgramFormatter, SExpressionFormatter, SourceProgramFormatter,
    };

    let (program, errors) = monkey::parse(src);
    if !errors.is_empty() {
        report_parser_errors(src, path, &errors, false);
        return ExitCode::from(EXIT_DATA_ERROR);
    }
    let formatter: Box<dyn ProgramFormatter> = match format {
        ProgramFormat::Debug => Box::new(DebugProgramFormatter),
        ProgramFormat::Source => Box::new(SourceProgramFormatter),
        ProgramFormat::SExpr => Box::new(SExpressionFormatter),
    };
    println!("{}", formatter.format(&program));
    ExitCode::SUCCESS
}

fn run(src: &str, path: &Path, config: EvaluatorConfig, plain: bool) -> ExitCode {
    use monkey::environment::Environment;
    use monkey::evaluator::{Evaluator, StdioContext};
    use monkey::value::formatter::{BasicFormatter, PrettyFormatter, ValueFormatter};
    use monkey::value::Value;

    let (program, errors) = monkey::parse(src);
    if !errors.is_empty() {
        report_parser_errors(src, path, &errors, plain);
        return ExitCode::from(EXIT_DATA_ERROR);
    }

    let mut evaluator = Evaluator::with_config(StdioContext, config);
    let environment = Environment::new();
    match evaluator.eval(&program, &environment) {
        Value::Error(error) => {
            let formatter: Box<dyn ValueFormatter + '_> = if plain {
                Box::new(BasicFormatter::new(src))
            } else {
                Box::new(PrettyFormatter::new(src, path))
            };
            eprintln!("{}", formatter.format_error(&error));
            ExitCode::from(EXIT_SOFTWARE_ERROR)
        }
        _ => ExitCode::SUCCESS,
    }
}
