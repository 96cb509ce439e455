use std::fs;

use approx::assert_relative_eq;
use infixa::{
    engine::{brackets::BracketChecker, lexer::tokenize, parser::ExpressionBuilder},
    error::EvalError,
    evaluate,
};
use walkdir::WalkDir;

fn assert_value(expression: &str, expected: f64) {
    match evaluate(expression) {
        Ok(value) => {
            assert_relative_eq!(value, expected, epsilon = 1e-9, max_relative = 1e-9);
        },
        Err(error) => panic!("'{expression}' failed: {error}"),
    }
}

fn assert_malformed(expression: &str) {
    let result = evaluate(expression);
    assert!(matches!(result, Err(EvalError::MalformedExpression { .. })),
            "'{expression}' should be malformed, got {result:?}");
}

fn assert_invalid_brackets(expression: &str) {
    let result = evaluate(expression);
    assert!(matches!(result, Err(EvalError::InvalidBrackets { .. })),
            "'{expression}' should have invalid brackets, got {result:?}");
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_value("1+3*2", 7.0);
    assert_value("1.0-3.0*2.0", -5.0);
    assert_value("1.0+3.0/2.0", 2.5);
    assert_value("1.0*3.0-2.0", 1.0);
}

#[test]
fn power_is_right_associative() {
    assert_value("2**3**2", 512.0);
    assert_value("(2**3)**2", 64.0);
}

#[test]
fn subtraction_and_division_are_left_associative() {
    assert_value("10-3-2", 5.0);
    assert_value("100/5/2", 10.0);
}

#[test]
fn unary_signs_fold_into_literals() {
    assert_value("+14", 14.0);
    assert_value("+14.0", 14.0);
    assert_value("-14.0", -14.0);
    assert_value("-1+2", 1.0);
    assert_value("--5", 5.0);
    assert_value("---5", -5.0);
    assert_value("2**-1", 0.5);
    assert_value("2 ** (-1)", 0.5);
    assert_value("2 ** (-0.2 + 0.2)", 1.0);
    assert_value("-4.0-8.1", -12.1);
}

#[test]
fn grouping_overrides_precedence() {
    assert_value("(5+10*(3-9))", -55.0);
    assert_value("1.0+(3.0*2.0-4.0)", 3.0);
    assert_value("1.0-(3.0*2.0+4.0)", -9.0);
}

#[test]
fn literal_forms() {
    assert_value("7+7", 14.0);
    assert_value(".0 + .1 + .2 + .3 + .5 + .6", 1.7);
    assert_value("2.5e3", 2500.0);
    assert_value("1e-2", 0.01);
    assert_value("1.0 *                           3.0+2.0", 5.0);
}

#[test]
fn empty_input_evaluates_to_zero() {
    assert_eq!(evaluate("").unwrap(), 0.0);
    assert_eq!(evaluate("   ").unwrap(), 0.0);
}

#[test]
fn arithmetic_follows_ieee_754() {
    assert_value("0**2", 0.0);
    assert!(evaluate("1/0").unwrap().is_infinite());
    assert!(evaluate("0/0").unwrap().is_nan());
}

#[test]
fn evaluation_is_bit_identical_across_calls() {
    let first = evaluate(".1+.2*3").unwrap();
    let second = evaluate(".1+.2*3").unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn dangling_close_bracket_as_final_token_is_dropped() {
    assert_value("2**3**2)", 512.0);
    assert_value("2*3**2)", 18.0);
}

#[test]
fn bracket_mismatches_are_rejected() {
    assert_invalid_brackets("(1+2");
    assert_invalid_brackets("((1+2)");
    assert_invalid_brackets("1+2)*3");
}

#[test]
fn malformed_expressions_are_rejected() {
    assert_malformed("1+*2");
    assert_malformed("1 2");
    assert_malformed("5-");
    assert_malformed("*");
    assert_malformed("-");
    assert_malformed("1$2");
    assert_malformed("5^2");
    assert_malformed("-(1+2)");
    // A literal beyond f64 range saturates to infinity in the lexer and is
    // caught by the tree validity check.
    assert_malformed("1e999");
}

#[test]
fn checker_reports_first_offending_index() {
    let tokens = tokenize("(1+2)").unwrap();
    let mut checker = BracketChecker::new();
    assert_eq!(checker.check(&tokens), tokens.len());
    assert!(checker.result());

    let tokens = tokenize("1+2)").unwrap();
    assert_eq!(checker.check(&tokens), 3);
    assert!(!checker.result());

    let tokens = tokenize("((1+2)").unwrap();
    assert_eq!(checker.check(&tokens), tokens.len());
    assert!(!checker.result());
    assert_eq!(checker.first_unclosed(), Some(0));
}

#[test]
fn builder_requires_exactly_one_root() {
    let builder = ExpressionBuilder::new();

    let tokens = tokenize("1 2").unwrap();
    assert!(matches!(builder.build(&tokens),
                     Err(EvalError::MalformedExpression { .. })));

    let tokens = tokenize("7+7").unwrap();
    assert_eq!(builder.build(&tokens).unwrap().eval(), 14.0);

    assert_eq!(builder.build(&[]).unwrap().eval(), 0.0);
}

#[test]
fn batch_fixture_files_pass() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/data").into_iter()
                                  .filter_map(Result::ok)
                                  .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (number, line) in content.lines().enumerate() {
            let mut parts = line.split_whitespace();
            let (Some(expression), Some(expected)) = (parts.next(), parts.next()) else {
                panic!("Invalid fixture line {} in {path:?}", number + 1);
            };
            let expected: f64 = expected.parse()
                                        .unwrap_or_else(|e| panic!("Bad expected value in {path:?}: {e}"));

            count += 1;
            assert_value(expression, expected);
        }
    }

    assert!(count > 0, "No fixture lines found in tests/data");
}
