use crate::{NodeKind, NullUnits, Position};

#[test]
fn test_equation_split() {
    let expr = parse!("$x + 5 = 10");
    let root = expr.root();
    assert_eq!(root.kind, NodeKind::Equation);
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[1].kind, NodeKind::Equality);
    assert_eq!(root.children[0].position, Position::LeftHand);
    assert_eq!(root.children[2].position, Position::RightHand);
}

#[test]
fn test_unbound_equation_is_not_solvable_but_becomes_executable() {
    let mut expr = parse!("$x=5");
    assert!(!expr.is_solvable(&NullUnits));

    expr.bind("x", 5);
    assert!(expr.is_solvable(&NullUnits));
    assert_eq!(expr.execute(&NullUnits).unwrap(), Some(dbl!(5)));
}

#[test]
fn test_solve_simple() {
    let solution = parse!("$x + 5 = 10").solve(&NullUnits).unwrap().unwrap();
    assert_eq!(solution.variable, "$x");
    assert_eq!(solution.value, dbl!(5));
    assert_eq!(solution.solved_side().to_string(), "5 + 5");
}

#[test]
fn test_solve_each_operator() {
    assert_eq!(
        parse!("$x - 4 = 10").solve(&NullUnits).unwrap().unwrap().value,
        dbl!(14)
    );
    assert_eq!(
        parse!("$x * 2 = 10").solve(&NullUnits).unwrap().unwrap().value,
        dbl!(5)
    );
    assert_eq!(
        parse!("$x / 4 = 2").solve(&NullUnits).unwrap().unwrap().value,
        dbl!(8)
    );
    assert_eq!(
        parse!("$x ^ 2 = 81").solve(&NullUnits).unwrap().unwrap().value,
        dbl!(9)
    );
}

#[test]
fn test_solve_unknown_on_right() {
    let solution = parse!("10 = $x * 2").solve(&NullUnits).unwrap().unwrap();
    assert_eq!(solution.variable, "$x");
    assert_eq!(solution.value, dbl!(5));
}

#[test]
fn test_solve_nested() {
    // ($x + 3) * 2 = 10 unwinds outside-in: 10/2 = 5, then 5-3 = 2.
    let solution = parse!("($x + 3) * 2 = 10").solve(&NullUnits).unwrap().unwrap();
    assert_eq!(solution.value, dbl!(2));
}

#[test]
fn test_solve_root_function() {
    // root($x, 3) = 2 inverts to 2^3.
    let solution = parse!("root($x, 3) = 2").solve(&NullUnits).unwrap().unwrap();
    assert_eq!(solution.value, dbl!(8));
}

#[test]
fn test_solve_under_sine_is_not_possible() {
    assert_eq!(parse!("sin($x) = 1").solve(&NullUnits).unwrap(), None);
}

#[test]
fn test_assignment_separator() {
    let expr = parse!("$x := 4 + 3");
    assert_eq!(expr.root().children[1].kind, NodeKind::Assignment);
    let solution = expr.solve(&NullUnits).unwrap().unwrap();
    assert_eq!(solution.value, dbl!(7));
}

#[test]
fn test_solve_requires_exactly_one_unknown_side() {
    // Both sides bound: nothing to solve.
    assert_eq!(parse!("2 + 2 = 4").solve(&NullUnits).unwrap(), None);

    // Neither side bound.
    assert_eq!(parse!("$x = $y").solve(&NullUnits).unwrap(), None);

    // Two unknowns on one side.
    assert_eq!(parse!("$x + $y = 4").solve(&NullUnits).unwrap(), None);
}

#[test]
fn test_solve_does_not_mutate_the_original() {
    let expr = parse!("$x + 5 = 10");
    let before = expr.to_string();
    let _ = expr.solve(&NullUnits).unwrap().unwrap();

    assert_eq!(expr.to_string(), before);
    assert_eq!(expr.execute(&NullUnits).unwrap(), Some(dbl!(10)));
    assert!(!expr.is_solvable(&NullUnits));
}

#[test]
fn test_more_than_one_separator_is_not_an_equation() {
    let expr = parse!("1 = 2 = 3");
    assert_eq!(expr.root().kind, NodeKind::Composite);
    assert_eq!(expr.execute(&NullUnits).unwrap(), None);
}
