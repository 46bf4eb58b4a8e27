use crate::node::evaluate::apply_operator;
use crate::{Error, MathsError, NodeError, NullUnits};

#[test]
fn test_round() {
    assert_eq!(exec!("round(3.14159,2)"), dbl!(3.14));
    assert_eq!(exec!("round(2.5,0)"), dbl!(3));
}

#[test]
fn test_parameter_counts() {
    assert_eq!(
        parse!("atan2(1)").execute(&NullUnits),
        Err(Error::Node(NodeError::ParameterCount {
            name: "atan2".into(),
            expected: 2,
        }))
    );
    assert!(matches!(
        parse!("round(1,2,3)").execute(&NullUnits),
        Err(Error::Node(NodeError::ParameterCount { expected: 2, .. }))
    ));
    assert!(matches!(
        parse!("root(8)").execute(&NullUnits),
        Err(Error::Node(NodeError::ParameterCount { expected: 2, .. }))
    ));
}

#[test]
fn test_aggregates() {
    assert_eq!(exec!("sum(1,2,3,4)"), dbl!(10));
    assert_eq!(exec!("min(3,1,2)"), dbl!(1));
    assert_eq!(exec!("max(3,1,2)"), dbl!(3));
}

#[test]
fn test_functions() {
    assert_eq!(exec!("abs(-5)"), dbl!(5));
    assert_eq!(exec!("floor(2.7)"), dbl!(2));
    assert_eq!(exec!("ceil(2.2)"), dbl!(3));
    assert_eq!(exec!("sqrt(16)"), dbl!(4));
    approx::assert_relative_eq!(exec!("sin(pi / 2)").to_f64(), 1.0);
    approx::assert_relative_eq!(exec!("log(e)").to_f64(), 1.0);
    approx::assert_relative_eq!(exec!("log10(1000)").to_f64(), 3.0);
    approx::assert_relative_eq!(exec!("atan2(1, 1)").to_f64(), core::f64::consts::FRAC_PI_4);
    approx::assert_relative_eq!(exec!("root(27, 3)").to_f64(), 3.0, max_relative = 1e-12);
}

#[test]
fn test_binary_operators() {
    assert_eq!(exec!("7 % 3"), dbl!(1));
    assert_eq!(exec!("7 mod 3"), dbl!(1));
    assert_eq!(exec!(r"7 \ 2"), dbl!(3));
    assert_eq!(exec!("2^10"), dbl!(1024));
    assert_eq!(exec!("2 exp 3"), dbl!(8));
}

#[test]
fn test_double_division_by_zero_propagates() {
    assert!(exec!("1/0").to_f64().is_infinite());
}

#[test]
fn test_decimal_semantics() {
    let expr = parse_dec!("0.1 + 0.2");
    assert_eq!(expr.execute(&NullUnits).unwrap(), Some(dec!(0.3)));

    let expr = parse_dec!("1/0");
    assert_eq!(
        expr.execute(&NullUnits),
        Err(Error::Maths(MathsError::DivisionByZero))
    );
}

#[test]
fn test_variables() {
    let mut expr = parse!("$x + 5");
    assert!(!expr.is_solvable(&NullUnits));
    assert_eq!(expr.execute(&NullUnits).unwrap(), None);

    expr.bind("x", 2);
    assert!(expr.is_solvable(&NullUnits));
    assert_eq!(expr.execute(&NullUnits).unwrap(), Some(dbl!(7)));

    // Binding with the prefix included works too.
    expr.bind("$x", 3);
    assert_eq!(expr.execute(&NullUnits).unwrap(), Some(dbl!(8)));

    expr.unbind("x");
    assert_eq!(expr.execute(&NullUnits).unwrap(), None);
}

#[test]
fn test_inverse_recovers_operand() {
    // For each operator, (a op b) inverse-op b gives a back.
    for op in ["+", "-", "*", "/", "^"] {
        let a = dbl!(7.5);
        let b = dbl!(3);
        let forward = apply_operator(op, a, b, false).unwrap().unwrap();
        let recovered = apply_operator(op, forward, b, true).unwrap().unwrap();
        approx::assert_relative_eq!(recovered.to_f64(), a.to_f64(), max_relative = 1e-12);
    }

    // Modulo has no inverse.
    assert_eq!(apply_operator("%", dbl!(7), dbl!(3), true).unwrap(), None);
}

#[test]
fn test_evaluation_of_unstructured_junk_is_absent() {
    // Two operands with no operator grouped between them.
    let expr = parse!("1 2 3");
    assert_eq!(expr.execute(&NullUnits).unwrap(), None);
}
