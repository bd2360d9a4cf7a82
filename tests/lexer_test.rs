use color_eyre::eyre::{Context, Result};
use proptest::prelude::*;
use std::{
    fs::{read_dir, read_to_string},
    path::Path,
};

use monkey::lexer::{
    formatter::{BasicFormatter, ToFormatter, TokenFormatter},
    Lexer, LexicalErrorKind, Token, TokenKind, TokenSource,
};

fn check(input: &str, expected: &str, test_name: &str) {
    let mut scanner = Lexer::new(input);
    let formatter: BasicFormatter = scanner.create_formatter();
    let mut buffer = String::new();
    loop {
        match scanner.next_token() {
            Ok(token) => {
                buffer.push_str(&formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                buffer.push_str(&formatter.format_lexical_error(&error));
            }
        }
        buffer.push('\n');
    }

    assert_eq!(buffer, expected.trim_end(), "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check("", "(1) EOF", "smoke");
}

#[test]
fn test_operators() {
    check(
        "=+(){}[],;:!-/*<><=>===!=",
        "(1) =\n(1) +\n(1) (\n(1) )\n(1) {\n(1) }\n(1) [\n(1) ]\n(1) ,\n(1) ;\n(1) :\n\
         (1) !\n(1) -\n(1) /\n(1) *\n(1) <\n(1) >\n(1) <=\n(1) >=\n(1) ==\n(1) !=\n(1) EOF",
        "operators",
    );
}

#[test]
fn test_keywords_and_identifiers() {
    check(
        "fn let true false if else return returned _x",
        "(1) FUNCTION\n(1) LET\n(1) TRUE\n(1) FALSE\n(1) IF\n(1) ELSE\n(1) RETURN\n\
         (1) IDENT returned\n(1) IDENT _x\n(1) EOF",
        "keywords",
    );
}

#[test]
fn test_strings() {
    check(
        r#""foobar" "foo bar" "a\tb\n" "say \"hi\"" """#,
        "(1) STRING \"foobar\"\n(1) STRING \"foo bar\"\n(1) STRING \"a\\tb\\n\"\n\
         (1) STRING \"say \\\"hi\\\"\"\n(1) STRING \"\"\n(1) EOF",
        "strings",
    );
}

#[test]
fn test_unterminated_string() {
    check(
        "let s = \"abc",
        "(1) LET\n(1) IDENT s\n(1) =\n(1) ILLEGAL unterminated string\n(1) EOF",
        "unterminated",
    );
}

#[test]
fn test_unknown_escape_is_reported_once() {
    check(
        r#""a\qb\z" 1"#,
        "(1) ILLEGAL escape \\q\n(1) INT 1\n(1) EOF",
        "escape",
    );
}

#[test]
fn test_illegal_characters() {
    check(
        "let @ = 1 # 2;",
        "(1) LET\n(1) ILLEGAL @\n(1) =\n(1) INT 1\n(1) ILLEGAL #\n(1) INT 2\n(1) ;\n(1) EOF",
        "illegal",
    );
}

#[test]
fn test_comments_are_skipped() {
    check(
        "1 // two\n3 // trailing",
        "(1) INT 1\n(2) INT 3\n(2) EOF",
        "comments",
    );
}

#[test]
fn test_spans_cover_lexemes() {
    let source = "let abc = 12;";
    let mut lexer = Lexer::new(source);
    let mut lexemes = Vec::new();
    loop {
        let token = lexer.next_token().expect("valid input");
        if token.is_eof() {
            assert_eq!(token.span.start.to_usize(), source.len());
            break;
        }
        lexemes.push(&source[token.span.range()]);
    }
    assert_eq!(lexemes, vec!["let", "abc", "=", "12", ";"]);
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().map(|t| t.kind), Ok(TokenKind::Ident));
    assert_eq!(lexer.next_token().map(|t| t.kind), Ok(TokenKind::Eof));
    assert_eq!(lexer.next_token().map(|t| t.kind), Ok(TokenKind::Eof));
}

#[test]
fn test_error_kinds() {
    let mut lexer = Lexer::new("\"open");
    let error = lexer.next_token().expect_err("unterminated string");
    assert_eq!(error.kind, LexicalErrorKind::UnclosedString);
    assert_eq!(error.span.range(), 0..5);
    assert_eq!(error.code(), "LX002");
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/lexer/in");
    let output_dir = Path::new("./test_data/lexer/out");

    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "mk" {
            continue;
        }

        let test_name = AsRef::<Path>::as_ref(
            path.file_name()
                .expect("File name can't be none as the path is to a real file."),
        );

        let input = read_to_string(&path).context("Failed to open input test data file")?;

        let expected = {
            let output_file_name = test_name.with_extension("txt");
            let output_path = output_dir.join(output_file_name);
            read_to_string(output_path).context("Failed to open output test data file")?
        };

        let res = std::panic::catch_unwind(|| {
            check(&input, &expected, &test_name.to_string_lossy());
        });
        if res.is_err() {
            succeeded = false;
        }
    }

    assert!(succeeded);

    Ok(())
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(",".to_string()),
        Just(";".to_string()),
        Just(":".to_string()),
        Just("-".to_string()),
        Just("+".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("!".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
    ]
}

fn integer_literal_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,18}".prop_map(|s| s)
}

fn string_literal_strategy() -> impl Strategy<Value = String> {
    "[^\"\\\\]*".prop_map(|s: String| format!("\"{}\"", s))
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]*".prop_map(|s: String| s)
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("fn".to_string()),
        Just("let".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("return".to_string()),
    ]
}

fn token_sequence_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            integer_literal_strategy(),
            string_literal_strategy(),
            identifier_strategy(),
            keyword_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_counts_valid_tokens(input in token_sequence_strategy()) {
        // Add 1 to include EOF token
        let expected_num_tokens = input.len() + 1;
        let input = input.join(" ");
        let mut scanner = Lexer::new(&input);
        let mut num_tokens = 0;
        loop {
            num_tokens += 1;
            match scanner.next_token() {
                Ok(Token { kind: TokenKind::Eof, .. }) => {
                    break;
                }
                token => {
                    prop_assert!(token.is_ok());
                }
            }
        }
        prop_assert_eq!(num_tokens, expected_num_tokens);
    }

    #[test]
    fn lexer_always_reaches_eof(input in "\\PC{0,200}") {
        let mut scanner = Lexer::new(&input);
        let mut steps = 0;
        loop {
            if let Ok(Token { kind: TokenKind::Eof, .. }) = scanner.next_token() {
                break;
            }
            steps += 1;
            prop_assert!(steps <= input.len());
        }
    }
}
