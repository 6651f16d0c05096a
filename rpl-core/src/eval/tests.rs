use crate::{
    environment::prelude::{Environment, Value, ValueType},
    eval::error::{MethodError, RuntimeError, RuntimeErrorType},
    parser::prelude::parse_module
};

use super::eval;

fn run(input: &str) -> (Result<(), RuntimeError>, String, Environment) {
    let parsed = parse_module(input).unwrap();

    let mut env = Environment::new();
    let mut out = Vec::new();

    let result = eval(&parsed.program, &mut env, &mut out);

    (result, String::from_utf8(out).unwrap(), env)
}

fn run_ok(input: &str) -> (String, Environment) {
    let (result, out, env) = run(input);

    if let Err(err) = result {
        panic!("Unexpected error for {input:?}: {err}");
    }

    (out, env)
}

fn run_err(input: &str) -> RuntimeErrorType {
    match run(input).0 {
        Err(err) => err.error,
        Ok(()) => panic!("Expected error for {input:?}")
    }
}

#[test]
fn test_no_precedence() {
    let (out, env) = run_ok("x = 2 + 3 * 4; println(x); y = 2 + (3 * 4); println(y);");

    assert_eq!(out, "20\n14\n");
    assert_eq!(env.get("x"), Some(&Value::Integer(20)));
}

#[test]
fn test_unbound_reads_zero() {
    let (out, env) = run_ok("println(z); w = z + 5;");

    assert_eq!(out, "0\n");
    assert_eq!(env.get("w"), Some(&Value::Integer(5)));
    assert_eq!(env.get("z"), None);
}

#[test]
fn test_addition_with_text() {
    let (out, _) = run_ok(r#"println("a" + 1); println(1 + "a"); println("x" + [1, "y"]);"#);

    assert_eq!(out, "a1\n1a\nx[1, y]\n");
}

#[test]
fn test_arithmetic() {
    let (out, _) = run_ok("println(7 / 2); println(0 - 7 / 2); println(3 - 5 * 2); println([1] + [2, 3]);");

    assert_eq!(out, "3\n-3\n-4\n[1, 2, 3]\n");

    assert_eq!(run_err("x = 1 / 0;"), RuntimeErrorType::DivisionByZero);
    assert!(matches!(run_err("x = 9223372036854775807 + 1;"), RuntimeErrorType::IntegerOverflow { .. }));
    assert!(matches!(
        run_err("x = \"a\" * 2;"),
        RuntimeErrorType::InvalidOperands { left: ValueType::Text, right: ValueType::Integer, .. }
    ));
}

#[test]
fn test_comparisons() {
    let (out, _) = run_ok(r#"
        println(1 < 2);
        println(2 <= 1);
        println("b" > "a");
        println(1 == "1");
        println(1 != "1");
        println([1, 2] == [1, 2]);
    "#);

    assert_eq!(out, "1\n0\n1\n0\n1\n1\n");

    assert!(matches!(run_err("x = 1 < \"a\";"), RuntimeErrorType::InvalidOperands { .. }));
}

#[test]
fn test_for_loop() {
    let (out, env) = run_ok("for (i = 0; i < 3; i = i + 1) { println(i); }");

    assert_eq!(out, "0\n1\n2\n");
    assert_eq!(env.get("i"), Some(&Value::Integer(3)));
}

#[test]
fn test_for_step_without_assignment() {
    let (out, env) = run_ok("for (i = 0; i < 6; i + 2) { print(i); }");

    assert_eq!(out, "0\n2\n4\n");
    assert_eq!(env.get("i"), Some(&Value::Integer(6)));
}

#[test]
fn test_while_and_if() {
    let (out, _) = run_ok(r#"
        n = 0;
        while (n < 4) {
            if (n == 2) { println("two"); } else { println(n); }
            n = n + 1;
        }
    "#);

    assert_eq!(out, "0\n1\ntwo\n3\n");
}

#[test]
fn test_truthiness() {
    let (out, _) = run_ok(r#"
        if ("") { println("empty text"); }
        if ("x") { println("text"); }
        if ([]) { println("empty array"); }
        if ([0]) { println("array"); }
        if (0 - 1) { println("negative"); }
    "#);

    assert_eq!(out, "text\narray\nnegative\n");
}

#[test]
fn test_function_isolation() {
    let (out, env) = run_ok(r#"
        y = 5;
        items = [1];
        fn f(x) { y = x; items.append(x); println(y); }
        f(10);
        println(y);
        println(items);
    "#);

    assert_eq!(out, "10\n5\n[1]\n");
    assert_eq!(env.get("y"), Some(&Value::Integer(5)));
    assert_eq!(env.get("x"), None);
}

#[test]
fn test_function_sees_caller_variables() {
    let (out, _) = run_ok("base = 40; fn add(n) { println(base + n); } add(2);");

    assert_eq!(out, "42\n");
}

#[test]
fn test_functions_defined_inside_calls_persist() {
    let (out, _) = run_ok("fn outer() { fn inner() { println(1); } } outer(); inner();");

    assert_eq!(out, "1\n");
}

#[test]
fn test_function_call_yields_zero() {
    let (out, env) = run_ok("fn f() { println(\"side\"); } x = f() + 7;");

    assert_eq!(out, "side\n");
    assert_eq!(env.get("x"), Some(&Value::Integer(7)));
}

#[test]
fn test_undefined_function_keeps_earlier_output() {
    let (result, out, _) = run("println(\"before\"); g(1); println(\"after\");");

    assert_eq!(out, "before\n");

    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::UndefinedFunction { name: "g".to_string() });
    assert_eq!(err.location.start, 19);
}

#[test]
fn test_arity_mismatch() {
    assert_eq!(
        run_err("fn f(a, b) { } f(1);"),
        RuntimeErrorType::ArityMismatch { name: "f".to_string(), expected: 2, got: 1 }
    );
}

#[test]
fn test_array_methods() {
    let (out, env) = run_ok(r#"
        a = [1, 2];
        println(a.count());
        a.append(3);
        println(a.count());
        a.insert(0, 9);
        println(a);
        println(a.pop());
        println(a.pop(0));
        a.extend([5, 4]);
        a.sort();
        println(a);
        println(a.index(4));
        a.remove(4);
        a.reverse();
        println(a);
        a.clear();
        println(a.count());
    "#);

    assert_eq!(out, "2\n3\n[9, 1, 2, 3]\n3\n9\n[1, 2, 4, 5]\n2\n[5, 2, 1]\n0\n");
    assert_eq!(env.get("a"), Some(&Value::Array(vec![])));
}

#[test]
fn test_text_methods() {
    let (out, env) = run_ok(r#"
        s = "  Hello World ";
        t = s.strip();
        println(t.upper());
        println(t.lower());
        println(t.count());
        println(t.find("World"));
        println(t.find("nope"));
        println(t.replace("World", "There"));
        println(t.split(" "));
        println(t.startswith("Hell"));
        println(t.endswith("x"));
    "#);

    assert_eq!(out, "HELLO WORLD\nhello world\n11\n6\n-1\nHello There\n[Hello, World]\n1\n0\n");
    assert_eq!(env.get("s"), Some(&Value::Text("  Hello World ".to_string())));
}

#[test]
fn test_method_errors() {
    assert_eq!(
        run_err("b.append(1);"),
        RuntimeErrorType::UndefinedReceiver { name: "b".to_string(), method: "append".to_string() }
    );

    let cases = [
        ("n = 3; n.count();", MethodError::UnknownMethod { value_type: ValueType::Integer, method: "count".to_string() }),
        ("s = \"x\"; s.append(1);", MethodError::UnknownMethod { value_type: ValueType::Text, method: "append".to_string() }),
        ("a = []; a.pop();", MethodError::EmptyArray),
        ("a = [1]; a.pop(3);", MethodError::IndexOutOfRange { index: 3 }),
        ("a = [1]; a.remove(2);", MethodError::NotFound),
        ("a = [1]; a.append();", MethodError::ArityMismatch { expected: "1", got: 0 }),
        ("a = [1]; a.extend(2);", MethodError::ArgumentType { expected: ValueType::Array, found: ValueType::Integer }),
        ("a = [1, \"x\"]; a.sort();", MethodError::Unorderable { left: ValueType::Integer, right: ValueType::Text }),
        ("s = \"a b\"; s.split(\"\");", MethodError::EmptySeparator),
    ];

    for (input, expected) in cases {
        match run_err(input) {
            RuntimeErrorType::MethodFailed { cause, .. } => assert_eq!(cause, expected, "wrong cause for {input:?}"),
            other => panic!("Unexpected error {other:?} for {input:?}")
        }
    }
}

#[test]
fn test_unary() {
    let (_, env) = run_ok("x = -5; y = - -x;");

    assert_eq!(env.get("x"), Some(&Value::Integer(-5)));
    assert_eq!(env.get("y"), Some(&Value::Integer(-5)));

    assert_eq!(run_err("x = !1;"), RuntimeErrorType::UnknownOperator { operator: "!".to_string() });
    assert!(matches!(run_err("x = -\"a\";"), RuntimeErrorType::InvalidOperand { .. }));
}

#[test]
fn test_assignment_operator() {
    let (out, env) = run_ok("println(x = 4); y = (z = 2) + 1;");

    assert_eq!(out, "4\n");
    assert_eq!(env.get("x"), Some(&Value::Integer(4)));
    assert_eq!(env.get("z"), Some(&Value::Integer(2)));
    assert_eq!(env.get("y"), Some(&Value::Integer(3)));

    assert_eq!(run_err("x = 1 = 2;"), RuntimeErrorType::InvalidAssignmentTarget);
}

#[test]
fn test_print_and_println() {
    let (out, _) = run_ok("print(\"a\"); println(\"b\"); print([]);");

    assert_eq!(out, "a\nb\n[]\n");
}
