use monkey::environment::{native, Environment};
use monkey::evaluator::{BufferedContext, Evaluator, EvaluatorConfig};
use monkey::parser::statement::Statement;
use monkey::value::error::RuntimeErrorKind;
use monkey::value::{HashKey, Value};
use proptest::prelude::*;

fn eval_with(input: &str, config: EvaluatorConfig) -> (Value, String) {
    let (program, errors) = monkey::parse(input);
    assert!(
        errors.is_empty(),
        "Unexpected parser errors for {input:?}: {:?}",
        errors.iter().map(|e| e.to_string()).collect::<Vec<_>>()
    );
    let mut evaluator = Evaluator::with_config(BufferedContext::new(), config);
    let value = evaluator.eval(&program, &Environment::new());
    (value, evaluator.into_context().into_data())
}

fn eval(input: &str) -> Value {
    eval_with(input, EvaluatorConfig::default()).0
}

fn eval_error(input: &str) -> String {
    match eval(input) {
        Value::Error(e) => e.to_string(),
        other => panic!("Expected an error for {input:?}, got {other:?}"),
    }
}

fn check_values(cases: &[(&str, Value)]) {
    for (input, expected) in cases {
        assert_eq!(&eval(input), expected, "Input: {input:?}");
    }
}

fn check_errors(cases: &[(&str, &str)]) {
    for (input, expected) in cases {
        assert_eq!(eval_error(input), *expected, "Input: {input:?}");
    }
}

#[test]
fn test_integer_expressions() {
    check_values(&[
        ("5", Value::Integer(5)),
        ("10", Value::Integer(10)),
        ("-5", Value::Integer(-5)),
        ("-10", Value::Integer(-10)),
        ("5 + 5 + 5 + 5 - 10", Value::Integer(10)),
        ("2 * 2 * 2 * 2 * 2", Value::Integer(32)),
        ("-50 + 100 + -50", Value::Integer(0)),
        ("5 * 2 + 10", Value::Integer(20)),
        ("5 + 2 * 10", Value::Integer(25)),
        ("20 + 2 * -10", Value::Integer(0)),
        ("50 / 2 * 2 + 10", Value::Integer(60)),
        ("2 * (5 + 10)", Value::Integer(30)),
        ("3 * 3 * 3 + 10", Value::Integer(37)),
        ("3 * (3 * 3) + 10", Value::Integer(37)),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", Value::Integer(50)),
        ("7 / 2", Value::Integer(3)),
    ]);
}

#[test]
fn test_integer_overflow_wraps() {
    check_values(&[
        ("9223372036854775807 + 1", Value::Integer(i64::MIN)),
        ("-9223372036854775807 - 2", Value::Integer(i64::MAX)),
    ]);
}

#[test]
fn test_boolean_expressions() {
    check_values(&[
        ("true", Value::Boolean(true)),
        ("false", Value::Boolean(false)),
        ("1 < 2", Value::Boolean(true)),
        ("1 > 2", Value::Boolean(false)),
        ("1 < 1", Value::Boolean(false)),
        ("1 > 1", Value::Boolean(false)),
        ("1 <= 1", Value::Boolean(true)),
        ("2 >= 3", Value::Boolean(false)),
        ("1 == 1", Value::Boolean(true)),
        ("1 != 1", Value::Boolean(false)),
        ("1 == 2", Value::Boolean(false)),
        ("1 != 2", Value::Boolean(true)),
        ("true == true", Value::Boolean(true)),
        ("false == false", Value::Boolean(true)),
        ("true == false", Value::Boolean(false)),
        ("true != false", Value::Boolean(true)),
        ("(1 < 2) == true", Value::Boolean(true)),
        ("(1 < 2) == false", Value::Boolean(false)),
        ("(1 > 2) == true", Value::Boolean(false)),
        ("(1 > 2) == false", Value::Boolean(true)),
    ]);
}

#[test]
fn test_null_compares_by_identity_with_booleans() {
    check_values(&[
        ("let n = if (false) { 1 }; n == false", Value::Boolean(false)),
        ("let n = if (false) { 1 }; true != n", Value::Boolean(true)),
        ("let n = if (false) { 1 }; n == n", Value::Boolean(true)),
        ("if (false) { 1 } != if (false) { 2 }", Value::Boolean(false)),
    ]);
    check_errors(&[
        ("let n = if (false) { 1 }; n == 0", "type mismatch: NULL == INTEGER"),
        ("let n = if (false) { 1 }; n < false", "type mismatch: NULL < BOOLEAN"),
    ]);
}

#[test]
fn test_bang_operator() {
    check_values(&[
        ("!true", Value::Boolean(false)),
        ("!false", Value::Boolean(true)),
        ("!5", Value::Boolean(false)),
        ("!!true", Value::Boolean(true)),
        ("!!false", Value::Boolean(false)),
        ("!!5", Value::Boolean(true)),
        ("!\"\"", Value::Boolean(false)),
        ("![]", Value::Boolean(false)),
    ]);
}

#[test]
fn test_if_else_expressions() {
    check_values(&[
        ("if (true) { 10 }", Value::Integer(10)),
        ("if (false) { 10 }", Value::Null),
        ("if (1) { 10 }", Value::Integer(10)),
        ("if (0) { 10 }", Value::Integer(10)),
        ("if (1 < 2) { 10 }", Value::Integer(10)),
        ("if (1 > 2) { 10 }", Value::Null),
        ("if (1 > 2) { 10 } else { 20 }", Value::Integer(20)),
        ("if (1 < 2) { 10 } else { 20 }", Value::Integer(10)),
        ("if (if (false) { 1 }) { 10 } else { 20 }", Value::Integer(20)),
        ("if (1 > 2) { 1 } else if (2 > 1) { 2 } else { 3 }", Value::Integer(2)),
        ("if (true) { }", Value::Null),
    ]);
}

#[test]
fn test_return_statements() {
    check_values(&[
        ("return 10;", Value::Integer(10)),
        ("return 10; 9;", Value::Integer(10)),
        ("return 2 * 5; 9;", Value::Integer(10)),
        ("9; return 2 * 5; 9;", Value::Integer(10)),
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            Value::Integer(10),
        ),
        (
            "let f = fn(x) { return x; x + 10; }; f(10);",
            Value::Integer(10),
        ),
        (
            "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
            Value::Integer(20),
        ),
        (
            "let f = fn() { let g = fn() { return 1; }; g(); 2 }; f()",
            Value::Integer(2),
        ),
    ]);
}

#[test]
fn test_return_from_argument_stops_enclosing_function() {
    check_values(&[(
        "let id = fn(x) { x }; let f = fn() { id(if (true) { return 1; }); 2 }; f()",
        Value::Integer(1),
    )]);
}

#[test]
fn test_error_handling() {
    check_errors(&[
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("1 == true", "type mismatch: INTEGER == BOOLEAN"),
        ("\"a\" != 1", "type mismatch: STRING != INTEGER"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("-\"a\"", "unknown operator: -STRING"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("true < false;", "unknown operator: BOOLEAN < BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
        ("[1] == [1]", "unknown operator: ARRAY == ARRAY"),
        ("1 / 0", "division by zero"),
        ("5(1)", "not a function: INTEGER"),
        ("\"f\"()", "not a function: STRING"),
        ("fn(x) { x }(1, 2)", "wrong number of arguments: want=1, got=2"),
        ("fn(x, y) { x }(1)", "wrong number of arguments: want=2, got=1"),
        ("1[0]", "index operator not supported: INTEGER"),
        ("[1][true]", "index operator not supported: ARRAY"),
        (
            "{\"name\": \"Monkey\"}[fn(x) { x }];",
            "unusable as hash key: FUNCTION",
        ),
        ("{[1]: 2}", "unusable as hash key: ARRAY"),
    ]);
}

#[test]
fn test_first_error_wins() {
    check_errors(&[
        ("a + b", "identifier not found: a"),
        ("[1, x, y]", "identifier not found: x"),
        ("f(x)", "identifier not found: f"),
        ("let a = b; a", "identifier not found: b"),
        ("len(x, y)", "identifier not found: x"),
    ]);
}

#[test]
fn test_error_span_and_code() {
    let Value::Error(error) = eval("let x = 1;\n1 + true") else {
        panic!("Expected an error");
    };
    assert_eq!(error.span.range(), 11..19);
    assert_eq!(error.code(), "RT001");
    assert_eq!(
        Value::Error(error).to_string(),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );
}

#[test]
fn test_let_statements() {
    check_values(&[
        ("let a = 5; a;", Value::Integer(5)),
        ("let a = 5 * 5; a;", Value::Integer(25)),
        ("let a = 5; let b = a; b;", Value::Integer(5)),
        ("let a = 5; let b = a; let c = a + b + 5; c;", Value::Integer(15)),
        ("let a = 5;", Value::Null),
        ("let a = 1; let a = a + 1; a", Value::Integer(2)),
    ]);
}

#[test]
fn test_let_shadows_without_mutating_outer_scope() {
    check_values(&[
        (
            "let x = 1; let f = fn() { let x = 2; x }; f() + x",
            Value::Integer(3),
        ),
        (
            "let x = 1; let f = fn(x) { x }; f(10); x",
            Value::Integer(1),
        ),
    ]);
}

#[test]
fn test_blocks_share_the_enclosing_scope() {
    check_values(&[("if (true) { let y = 7; }; y", Value::Integer(7))]);
}

#[test]
fn test_function_object() {
    let Value::Function(function) = eval("fn(x) { x + 2; };") else {
        panic!("Expected a function");
    };
    assert_eq!(function.parameters.len(), 1);
    assert_eq!(function.parameters[0].name, "x");
    assert_eq!(function.body.to_string(), "(x + 2)");
    assert_eq!(
        Value::Function(function).to_string(),
        "fn(x) {\n(x + 2)\n}"
    );
}

#[test]
fn test_function_application() {
    check_values(&[
        ("let identity = fn(x) { x; }; identity(5);", Value::Integer(5)),
        ("let identity = fn(x) { return x; }; identity(5);", Value::Integer(5)),
        ("let double = fn(x) { x * 2; }; double(5);", Value::Integer(10)),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", Value::Integer(10)),
        (
            "let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));",
            Value::Integer(20),
        ),
        ("fn(x) { x; }(5)", Value::Integer(5)),
        ("fn() { }()", Value::Null),
    ]);
}

#[test]
fn test_closures() {
    check_values(&[
        (
            "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
            Value::Integer(4),
        ),
        (
            "let counter = fn(start) { fn() { start + 1 } }; let a = counter(1); let b = counter(10); a() + b()",
            Value::Integer(13),
        ),
    ]);
}

#[test]
fn test_recursion() {
    check_values(&[(
        "let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } }; fib(15)",
        Value::Integer(610),
    )]);
}

#[test]
fn test_deep_recursion_within_default_limit() {
    check_values(&[(
        "let count = fn(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } }; count(800)",
        Value::Integer(800),
    )]);
}

#[test]
fn test_long_operator_chain_evaluates_and_drops() {
    let terms = 300_000;
    let chain = format!("{}1", "1 + ".repeat(terms));
    assert_eq!(eval(&chain), Value::Integer(terms as i64 + 1));

    let source = format!("let f = fn() {{ {chain} }}; f()");
    let (program, errors) = monkey::parse(&source);
    assert!(errors.is_empty());
    let environment = Environment::new();
    let mut evaluator = Evaluator::new(BufferedContext::new());
    assert_eq!(
        evaluator.eval(&program, &environment),
        Value::Integer(terms as i64 + 1)
    );
    drop(program);
    drop(environment);
}

#[test]
fn test_call_depth_limit() {
    let config = EvaluatorConfig { max_call_depth: 50 };
    let (value, _) = eval_with("let f = fn(n) { f(n + 1) }; f(0)", config);
    let Value::Error(error) = value else {
        panic!("Expected an error, got {value:?}");
    };
    assert_eq!(error.kind, RuntimeErrorKind::CallDepthExceeded(50));
    assert_eq!(error.to_string(), "maximum call depth of 50 exceeded");

    let (value, _) = eval_with(
        "let count = fn(n) { if (n == 0) { 0 } else { count(n - 1) } }; count(40)",
        config,
    );
    assert_eq!(value, Value::Integer(0));
}

#[test]
fn test_call_depth_resets_after_error() {
    let config = EvaluatorConfig { max_call_depth: 10 };
    let (program, errors) = monkey::parse("let f = fn(n) { f(n + 1) }; f(0)");
    assert!(errors.is_empty());
    let environment = Environment::new();
    let mut evaluator = Evaluator::with_config(BufferedContext::new(), config);
    assert!(evaluator.eval(&program, &environment).is_error());

    let (program, errors) = monkey::parse("let g = fn(n) { if (n == 0) { 0 } else { g(n - 1) } }; g(8)");
    assert!(errors.is_empty());
    assert_eq!(evaluator.eval(&program, &environment), Value::Integer(0));
}

#[test]
fn test_string_expressions() {
    check_values(&[
        ("\"Hello World!\"", Value::from("Hello World!")),
        ("\"Hello\" + \" \" + \"World!\"", Value::from("Hello World!")),
        ("\"a\" == \"a\"", Value::Boolean(true)),
        ("\"a\" != \"b\"", Value::Boolean(true)),
        ("\"tab\\there\"", Value::from("tab\there")),
    ]);
}

#[test]
fn test_builtin_functions() {
    check_values(&[
        ("len(\"\")", Value::Integer(0)),
        ("len(\"four\")", Value::Integer(4)),
        ("len(\"hello world\")", Value::Integer(11)),
        ("len(\"héllo\")", Value::Integer(5)),
        ("len([1, 2, 3])", Value::Integer(3)),
        ("len([])", Value::Integer(0)),
        ("first([1, 2, 3])", Value::Integer(1)),
        ("first([])", Value::Null),
        ("last([1, 2, 3])", Value::Integer(3)),
        ("last([])", Value::Null),
        (
            "rest([1, 2, 3])",
            Value::from(vec![Value::Integer(2), Value::Integer(3)]),
        ),
        ("rest([1])", Value::from(Vec::new())),
        ("rest([])", Value::Null),
        ("push([], 1)", Value::from(vec![Value::Integer(1)])),
        (
            "let a = [1]; let b = push(a, 2); a",
            Value::from(vec![Value::Integer(1)]),
        ),
        ("let len = fn(x) { 42 }; len([])", Value::Integer(42)),
    ]);
    check_errors(&[
        ("len(1)", "argument to `len` not supported, got INTEGER"),
        ("len(\"one\", \"two\")", "wrong number of arguments. got=2, want=1"),
        ("first(1)", "argument to `first` not supported, got INTEGER"),
        ("last(\"abc\")", "argument to `last` not supported, got STRING"),
        ("rest({})", "argument to `rest` not supported, got HASH"),
        ("push(1, 1)", "argument to `push` not supported, got INTEGER"),
        ("push([])", "wrong number of arguments. got=1, want=2"),
    ]);
}

#[test]
fn test_builtin_lookup() {
    for name in native::BUILTIN_NAMES {
        let Some(Value::NativeFunction(function)) = native::lookup(name) else {
            panic!("Missing builtin {name}");
        };
        assert_eq!(function.get_name(), name);
    }
    assert!(native::lookup("print").is_none());
    assert_eq!(eval("len").to_string(), "builtin function");
}

#[test]
fn test_puts_writes_to_context() {
    let (value, output) = eval_with(
        "puts(\"hello\", 1 + 2, [1, \"two\"]); puts(); puts(true)",
        EvaluatorConfig::default(),
    );
    assert_eq!(value, Value::Null);
    assert_eq!(output, "hello\n3\n[1, two]\ntrue\n");
}

#[test]
fn test_array_literals() {
    check_values(&[(
        "[1, 2 * 2, 3 + 3]",
        Value::from(vec![Value::Integer(1), Value::Integer(4), Value::Integer(6)]),
    )]);
    assert_eq!(eval("[1, \"a\", [true]]").to_string(), "[1, a, [true]]");
}

#[test]
fn test_array_index_expressions() {
    check_values(&[
        ("[1, 2, 3][0]", Value::Integer(1)),
        ("[1, 2, 3][1]", Value::Integer(2)),
        ("[1, 2, 3][2]", Value::Integer(3)),
        ("let i = 0; [1][i];", Value::Integer(1)),
        ("[1, 2, 3][1 + 1];", Value::Integer(3)),
        ("let myArray = [1, 2, 3]; myArray[2];", Value::Integer(3)),
        (
            "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
            Value::Integer(6),
        ),
        (
            "let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]",
            Value::Integer(2),
        ),
        ("[1, 2, 3][3]", Value::Null),
        ("[1, 2, 3][-1]", Value::Null),
    ]);
}

#[test]
fn test_hash_literals() {
    let input = r#"let two = "two";
    {
        "one": 10 - 9,
        two: 1 + 1,
        "thr" + "ee": 6 / 2,
        4: 4,
        true: 5,
        false: 6
    }"#;
    let Value::Hash(pairs) = eval(input) else {
        panic!("Expected a hash");
    };
    let expected = [
        (HashKey::String("one".into()), 1),
        (HashKey::String("two".into()), 2),
        (HashKey::String("three".into()), 3),
        (HashKey::Integer(4), 4),
        (HashKey::Boolean(true), 5),
        (HashKey::Boolean(false), 6),
    ];
    assert_eq!(pairs.len(), expected.len());
    for (key, value) in expected {
        assert_eq!(pairs.get(&key), Some(&Value::Integer(value)), "Key: {key}");
    }
}

#[test]
fn test_hash_display_is_ordered() {
    assert_eq!(
        eval(r#"{"b": 2, 1: "one", true: [], "a": 1}"#).to_string(),
        "{1: one, true: [], a: 1, b: 2}"
    );
}

#[test]
fn test_hash_index_expressions() {
    check_values(&[
        (r#"{"foo": 5}["foo"]"#, Value::Integer(5)),
        (r#"{"foo": 5}["bar"]"#, Value::Null),
        (r#"let key = "foo"; {"foo": 5}[key]"#, Value::Integer(5)),
        (r#"{}["foo"]"#, Value::Null),
        ("{5: 5}[5]", Value::Integer(5)),
        ("{true: 5}[true]", Value::Integer(5)),
        ("{false: 5}[false]", Value::Integer(5)),
        (r#"{"a": 1, "a": 2}["a"]"#, Value::Integer(2)),
    ]);
}

#[test]
fn test_higher_order_functions() {
    let input = "
        let map = fn(arr, f) {
            let iter = fn(arr, accumulated) {
                if (len(arr) == 0) {
                    accumulated
                } else {
                    iter(rest(arr), push(accumulated, f(first(arr))));
                }
            };
            iter(arr, []);
        };
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) { result } else { iter(rest(arr), f(result, first(arr))); }
            };
            iter(arr, initial);
        };
        let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
        reduce(doubled, 0, fn(acc, x) { acc + x });
    ";
    check_values(&[(input, Value::Integer(20))]);
}

#[test]
fn test_eval_single_nodes() {
    let (program, errors) = monkey::parse("let a = 2; a * 21");
    assert!(errors.is_empty());
    let environment = Environment::new();
    let mut evaluator = Evaluator::new(BufferedContext::new());

    let Some(first @ Statement::Let(_)) = program.get_statement(0) else {
        panic!("Expected a let statement");
    };
    assert_eq!(evaluator.eval(first, &environment), Value::Null);

    let Some(Statement::Expression(stmt)) = program.get_statement(1) else {
        panic!("Expected an expression statement");
    };
    assert_eq!(evaluator.eval(&stmt.expr, &environment), Value::Integer(42));
}

#[test]
fn test_statement_return_signal_is_visible_below_program() {
    let (program, _) = monkey::parse("return 7;");
    let mut evaluator = Evaluator::new(BufferedContext::new());
    let environment = Environment::new();
    let statement = program.get_statement(0).expect("one statement");
    assert_eq!(
        evaluator.eval(statement, &environment),
        Value::Return(Box::new(Value::Integer(7)))
    );
    assert_eq!(evaluator.eval(&program, &environment), Value::Integer(7));
}

#[test]
fn test_empty_program_is_null() {
    check_values(&[("", Value::Null), ("// nothing here", Value::Null)]);
}

#[test]
fn test_environment_scopes() {
    let global = Environment::new();
    global.declare("a", Value::Integer(1));
    let local = global.new_scope();
    assert_eq!(local.access("a"), Some(Value::Integer(1)));
    assert!(!local.contains_local("a"));

    local.declare("a", Value::Integer(2));
    assert_eq!(local.access("a"), Some(Value::Integer(2)));
    assert_eq!(global.access("a"), Some(Value::Integer(1)));
    assert_eq!(global.access("b"), None);

    let alias = global.clone();
    alias.declare("b", Value::Boolean(true));
    assert!(alias.is_same(&global));
    assert_eq!(global.access("b"), Some(Value::Boolean(true)));
}

#[test]
fn test_evaluator_accessors() {
    let config = EvaluatorConfig { max_call_depth: 3 };
    let mut evaluator = Evaluator::with_config(BufferedContext::new(), config);
    assert_eq!(evaluator.config(), &config);

    let (program, _) = monkey::parse("puts(1)");
    evaluator.eval(&program, &Environment::new());
    assert_eq!(evaluator.context().as_str(), "1\n");
    assert_eq!(evaluator.context_mut().take(), "1\n");
    assert_eq!(evaluator.context().as_str(), "");
}

#[test]
fn test_value_formatters() {
    use monkey::value::formatter::{BasicFormatter, DebugFormatter, ValueFormatter};

    let source = "let a = 1;\na / 0";
    let Value::Error(error) = eval(source) else {
        panic!("Expected division to fail");
    };

    let basic = BasicFormatter::new(source);
    assert_eq!(basic.format(&Value::from("hi")), "hi");
    assert_eq!(basic.format_error(&error), "(2) ERROR: division by zero");

    assert_eq!(DebugFormatter.format(&Value::Integer(3)), "Integer(3)");
    assert!(DebugFormatter.format_error(&error).contains("DivisionByZero"));
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Boolean(false).is_truthy());
    assert!(Value::Boolean(true).is_truthy());
    assert!(Value::Integer(0).is_truthy());
    assert!(Value::from("").is_truthy());
    assert!(Value::from(Vec::new()).is_truthy());
}

proptest! {
    #[test]
    fn let_binding_roundtrips(name in "[a-z][a-z0-9_]{0,8}", value in any::<i64>().prop_filter("literal", |v| *v != i64::MIN)) {
        prop_assume!(!monkey::lexer::KEYWORD_HASHMAP.contains_key(name.as_str()));
        prop_assume!(!native::BUILTIN_NAMES.contains(&name.as_str()));
        let source = format!("let {name} = {value}; {name}");
        prop_assert_eq!(eval(&source), Value::Integer(value));
    }

    #[test]
    fn integer_arithmetic_matches_wrapping_semantics(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        prop_assert_eq!(eval(&format!("{a} + {b}")), Value::Integer(a.wrapping_add(b)));
        prop_assert_eq!(eval(&format!("{a} - {b}")), Value::Integer(a.wrapping_sub(b)));
        prop_assert_eq!(eval(&format!("{a} * {b}")), Value::Integer(a.wrapping_mul(b)));
        prop_assert_eq!(eval(&format!("{a} < {b}")), Value::Boolean(a < b));
        prop_assert_eq!(eval(&format!("{a} == {b}")), Value::Boolean(a == b));
        if b != 0 {
            prop_assert_eq!(eval(&format!("{a} / {b}")), Value::Integer(a / b));
        }
    }
}
