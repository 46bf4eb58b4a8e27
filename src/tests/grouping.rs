use crate::{Error, Expression, NodeError, NullUnits};

#[test]
fn test_precedence() {
    // Multiplication binds tighter than addition.
    assert_eq!(exec!("2+3*4"), dbl!(14));
    assert_eq!(exec!("2*3+4"), dbl!(10));
    assert_eq!(exec!("2+3*4+5"), dbl!(19));
    assert_eq!(exec!("10 mod 4 * 2"), dbl!(4));
}

#[test]
fn test_same_tier_folds_left_to_right() {
    // (2-3)-4, not 2-(3-4).
    assert_eq!(exec!("2-3-4"), dbl!(-5));
    assert_eq!(exec!("100/10/5"), dbl!(2));
    assert_eq!(exec!("2^3^2"), dbl!(64));
}

#[test]
fn test_parentheses() {
    assert_eq!(exec!("(2+3)*4"), dbl!(20));
    assert_eq!(exec!("(1+2)*(3+4)"), dbl!(21));
    assert_eq!(exec!("((2))"), dbl!(2));
}

#[test]
fn test_function_grouping() {
    assert_eq!(exec!("2 * sqrt(16)"), dbl!(8));
    assert_eq!(exec!("sqrt(16) + 1"), dbl!(5));

    // Stacked function names collapse together: floor(sqrt(17)).
    assert_eq!(exec!("1 + floor sqrt 17"), dbl!(5));
}

#[test]
fn test_implicit_multiplication_before_function() {
    // `2 sqrt(16)` means `2 * sqrt(16)`.
    assert_eq!(exec!("2 sqrt(16)"), dbl!(8));
}

#[test]
fn test_operator_at_boundary() {
    assert!(matches!(
        Expression::parse("2+", &NullUnits),
        Err(Error::Node(NodeError::OperatorAtBoundary { token, .. })) if token == "+"
    ));
    assert!(matches!(
        Expression::parse("*2", &NullUnits),
        Err(Error::Node(NodeError::OperatorAtBoundary { token, .. })) if token == "*"
    ));
    assert!(matches!(
        Expression::parse("1 + 2 *", &NullUnits),
        Err(Error::Node(NodeError::OperatorAtBoundary { .. }))
    ));
}

#[test]
fn test_invalid_operand() {
    // A string is not something addition can consume.
    assert!(matches!(
        Expression::parse("\"abc\" + 1", &NullUnits),
        Err(Error::Node(NodeError::InvalidOperand { token, .. })) if token == "+"
    ));
}
