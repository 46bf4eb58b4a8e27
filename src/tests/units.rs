use crate::tests::util::MetricUnits;
use crate::NodeKind;

#[test]
fn test_value_unit_pairing() {
    let expr = parse!("2 kg", &MetricUnits);
    let pair = &expr.root().children[0];
    assert_eq!(pair.kind, NodeKind::ValueUnitPair);
    assert_eq!(pair.children.len(), 2);
    assert_eq!(pair.unit.as_ref().unwrap().measures(), "mass");

    assert_eq!(expr.execute(&MetricUnits).unwrap(), Some(dbl!(2)));
}

#[test]
fn test_naked_unit_gains_implicit_one() {
    let expr = parse!("kg", &MetricUnits);
    let pair = &expr.root().children[0];
    assert_eq!(pair.kind, NodeKind::ValueUnitPair);
    assert_eq!(expr.execute(&MetricUnits).unwrap(), Some(dbl!(1)));
    assert_eq!(expr.to_string(), "1 kg");
}

#[test]
fn test_solve_with_units() {
    let solution = parse!("$x * 2 kg = 10 kg", &MetricUnits)
        .solve(&MetricUnits)
        .unwrap()
        .unwrap();
    assert_eq!(solution.variable, "$x");
    assert_eq!(solution.value, dbl!(5));
}

#[test]
fn test_solve_with_mixed_prefixes() {
    // 500 g normalizes to 0.5 kg before the unwind.
    let solution = parse!("$x * 2 kg = 500 g", &MetricUnits)
        .solve(&MetricUnits)
        .unwrap()
        .unwrap();
    assert_eq!(solution.value, dbl!(0.25));
}

#[test]
fn test_solved_leaf_converts_into_its_pair_unit() {
    // The unknown sits inside a gram pair; the base-unit result (1 kg)
    // lands in the leaf as 1000.
    let solution = parse!("$x g = 1 kg", &MetricUnits)
        .solve(&MetricUnits)
        .unwrap()
        .unwrap();
    assert_eq!(solution.value, dbl!(1000));
}

#[test]
fn test_incompatible_measures() {
    let mut expr = parse!("$x * 2 kg = 10 s", &MetricUnits);
    assert_eq!(expr.solve(&MetricUnits).unwrap(), None);

    expr.bind("x", 1);
    assert!(!expr.is_solvable(&MetricUnits));
}

#[test]
fn test_derived_unit_detection() {
    // `h` alone is unrecognised; `km/h` resolves as one composite unit.
    let expr = parse!("5 km / h", &MetricUnits);
    let pair = &expr.root().children[0];
    assert_eq!(pair.kind, NodeKind::ValueUnitPair);
    assert!(pair.executive);
    assert_eq!(pair.unit.as_ref().unwrap().display(), "km/h");
    assert_eq!(pair.unit.as_ref().unwrap().measures(), "speed");

    assert_eq!(expr.root().children.len(), 1);
    assert_eq!(expr.execute(&MetricUnits).unwrap(), Some(dbl!(5)));
    assert_eq!(expr.to_string(), "5 km/h");
}

#[test]
fn test_division_of_recognised_units_is_arithmetic() {
    // Both `km` and `m` resolve on their own, so this stays a division.
    let expr = parse!("6 km / 3 m", &MetricUnits);
    assert_eq!(expr.execute(&MetricUnits).unwrap(), Some(dbl!(2)));
}

#[test]
fn test_clone_tree_to_base_units() {
    let expr = parse!("500 g", &MetricUnits);
    let clone = expr.clone_tree(true, &MetricUnits).unwrap();
    assert_eq!(clone.children[0].unit.as_ref().unwrap().display(), "kg");
    assert_eq!(clone.to_string(), "0.5 kg");

    // The original is untouched.
    assert_eq!(expr.to_string(), "500 g");
}
