use ltscript::interpreter::errors::RuntimeError;
use ltscript::{run_source, Error};
use pretty_assertions::assert_eq;

fn printed(expr: &str) -> String {
    let source = format!("print {};", expr);
    let outcome = run_source(&source, "arith").expect("Execution failed");
    assert_eq!(outcome.output.len(), 1);
    outcome.output[0].clone()
}

#[test]
fn test_number_operators() {
    assert_eq!(printed("3 ^ 2"), "9");
    assert_eq!(printed("7 // 2"), "3");
    assert_eq!(printed("7 % 2"), "1");
    assert_eq!(printed("7 / 2"), "3.5");
    assert_eq!(printed("2 * 3 + 4"), "10");
    assert_eq!(printed("2 * (3 + 4)"), "14");
    assert_eq!(printed("10 - 4 - 3"), "3");
}

#[test]
fn test_floored_division_and_modulo() {
    assert_eq!(printed("-7 % 3"), "2");
    assert_eq!(printed("7 % -3"), "-2");
    assert_eq!(printed("-7 // 2"), "-4");
    assert_eq!(printed("5.5 % 2"), "1.5");
}

#[test]
fn test_ieee_results() {
    assert_eq!(printed("1 / 0"), "inf");
    assert_eq!(printed("-1 / 0"), "-inf");
    assert_eq!(printed("0 / 0"), "NaN");
    assert_eq!(printed("0 / 0 == 0 / 0"), "false");
}

#[test]
fn test_exponent_and_unary() {
    // Exponent operands are unary expressions
    assert_eq!(printed("-2 ^ 2"), "4");
    assert_eq!(printed("2 ^ 3 ^ 2"), "64");
    assert_eq!(printed("+5"), "5");
    assert_eq!(printed("--5"), "5");
    assert_eq!(printed("2 ^ 0.5 * 2 ^ 0.5"), "2.0000000000000004");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(printed("\"n=\" + \"3\""), "n=3");
    assert_eq!(printed("'tab\\there'"), "tab\there");
    assert_eq!(printed("\"\\65\\66\""), "AB");
}

#[test]
fn test_mismatched_operands_are_operation_errors() {
    match run_source("print \"a\" + 1;", "arith") {
        Err(Error::Runtime(RuntimeError::Operation { operator, operands, .. })) => {
            assert_eq!(operator, "+");
            assert_eq!(operands, vec!["Str", "Number"]);
        }
        other => panic!("Expected operation error, got {:?}", other),
    }

    match run_source("print -\"a\";", "arith") {
        Err(Error::Runtime(RuntimeError::Operation { operator, operands, .. })) => {
            assert_eq!(operator, "-");
            assert_eq!(operands, vec!["Str"]);
        }
        other => panic!("Expected operation error, got {:?}", other),
    }

    let message = run_source("print true * 2;", "arith").unwrap_err().to_string();
    assert_eq!(message, "Unsupported operation '*' for Bool and Number");
}

#[test]
fn test_compound_assignment_uses_operators() {
    let outcome = run_source(
        "let a = 2; a ^= 3; let b = 17; b %= 5; let s = \"x\"; s += \"y\"; print a; print b; print s;",
        "arith",
    )
    .expect("Execution failed");

    assert_eq!(outcome.output, vec!["8", "2", "xy"]);
}
