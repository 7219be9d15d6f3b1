//! End-to-end CAD scenarios grounded in the GiNaCRA CAD example drivers
//! (`example_CAD_1.cpp`, `example_CADincremental_2.cpp`): build a variable
//! order and constraint set, run `check`, and look at the witness or its
//! absence.

use ratcad_cad::{Cad, CancellationToken, CheckOutcome, Constraint, Settings, Sign, VariableOrder};
use ratcad_nzq::Rational;
use ratcad_rings::MultivariatePoly;

fn r(n: i64) -> Rational {
    Rational::from(n)
}

fn mono(nvars: usize, exp: Vec<u32>, coeff: i64) -> MultivariatePoly {
    MultivariatePoly::monomial(nvars, exp, r(coeff))
}

/// `p1 = 144y^2 + 96x^2y + 9x^4 + 105x^2 + 70x - 98`,
/// `p2 = xy^2 + 6xy + x^3 + 9x`, from `example_CAD_1.cpp`'s `runTest`:
/// both constrained to zero has a real solution.
#[test]
fn example_cad_1_system_is_satisfiable() {
    let nvars = 2;
    let mut p1 = mono(nvars, vec![0, 2], 144);
    p1 = p1.add(&mono(nvars, vec![2, 1], 96));
    p1 = p1.add(&mono(nvars, vec![4, 0], 9));
    p1 = p1.add(&mono(nvars, vec![2, 0], 105));
    p1 = p1.add(&mono(nvars, vec![1, 0], 70));
    p1 = p1.add(&MultivariatePoly::constant(nvars, r(-98)));

    let mut p2 = mono(nvars, vec![1, 2], 1);
    p2 = p2.add(&mono(nvars, vec![1, 1], 6));
    p2 = p2.add(&mono(nvars, vec![3, 0], 1));
    p2 = p2.add(&mono(nvars, vec![1, 0], 9));

    let vars = VariableOrder::new(vec!["x".to_string(), "y".to_string()]).unwrap();
    let mut cad = Cad::new(vars, Settings::default()).unwrap();
    cad.add_polynomial(Constraint::new(p1.clone(), Sign::Zero))
        .unwrap();
    cad.add_polynomial(Constraint::new(p2.clone(), Sign::Zero))
        .unwrap();

    assert!(!cad.elimination_sets()[0].is_empty());

    let token = CancellationToken::new();
    match cad.check(&token).unwrap() {
        CheckOutcome::Sat(point) => {
            assert_eq!(point.len(), 2);
            assert_eq!(p1.sign_at_point(&point), 0);
            assert_eq!(p2.sign_at_point(&point), 0);
        }
        other => panic!("expected Sat, got {other:?}"),
    }
}

/// `x^2 + y^2 + 1 = 0` has no real solution: the sum of two squares plus one
/// is always strictly positive.
#[test]
fn sum_of_squares_plus_one_is_unsatisfiable() {
    let nvars = 2;
    let mut p = mono(nvars, vec![2, 0], 1);
    p = p.add(&mono(nvars, vec![0, 2], 1));
    p = p.add(&MultivariatePoly::constant(nvars, r(1)));

    let vars = VariableOrder::new(vec!["x".to_string(), "y".to_string()]).unwrap();
    let mut cad = Cad::new(vars, Settings::default()).unwrap();
    cad.add_polynomial(Constraint::new(p, Sign::Zero)).unwrap();

    let token = CancellationToken::new();
    assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Unsat));
}

/// Incremental tightening, in the spirit of `example_CADincremental_2.cpp`:
/// start from the unit circle, narrow the feasible arc with successive
/// `add_polynomial` calls until the system becomes unsatisfiable.
#[test]
fn incrementally_added_constraints_narrow_the_unit_circle_to_unsat() {
    let nvars = 2;
    let mut circle = mono(nvars, vec![2, 0], 1);
    circle = circle.add(&mono(nvars, vec![0, 2], 1));
    circle = circle.add(&MultivariatePoly::constant(nvars, r(-1)));

    let vars = VariableOrder::new(vec!["x".to_string(), "y".to_string()]).unwrap();
    let mut cad = Cad::new(vars, Settings::default()).unwrap();
    cad.add_polynomial(Constraint::new(circle, Sign::Zero))
        .unwrap();

    let token = CancellationToken::new();
    assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Sat(_)));

    // Restrict to the right half: x > 0. Still satisfiable.
    cad.add_polynomial(Constraint::new(
        MultivariatePoly::variable(nvars, 0),
        Sign::Positive,
    ))
    .unwrap();
    let token = CancellationToken::new();
    assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Sat(_)));

    // Further restrict to the upper-right quadrant: y > 0. Still satisfiable
    // (the diagonal point survives).
    cad.add_polynomial(Constraint::new(
        MultivariatePoly::variable(nvars, 1),
        Sign::Positive,
    ))
    .unwrap();
    let token = CancellationToken::new();
    assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Sat(_)));

    // x + y - 3 > 0 is impossible on the unit circle: the max of x + y there
    // is sqrt(2) < 3.
    let mut sum_minus_three = MultivariatePoly::variable(nvars, 0);
    sum_minus_three = sum_minus_three.add(&MultivariatePoly::variable(nvars, 1));
    sum_minus_three = sum_minus_three.add(&MultivariatePoly::constant(nvars, r(-3)));
    cad.add_polynomial(Constraint::new(sum_minus_three, Sign::Positive))
        .unwrap();
    let token = CancellationToken::new();
    assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Unsat));
}

/// A single-variable query exercises the whole pipeline without any
/// projection levels at all.
#[test]
fn single_variable_interval_constraint_is_satisfiable() {
    let nvars = 1;
    // 1 < x < 4, expressed as two constraints on x - 1 and 4 - x.
    let x_minus_one = mono(nvars, vec![1], 1).add(&MultivariatePoly::constant(nvars, r(-1)));
    let four_minus_x =
        MultivariatePoly::constant(nvars, r(4)).sub(&MultivariatePoly::variable(nvars, 0));

    let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
    let mut cad = Cad::new(vars, Settings::default()).unwrap();
    cad.add_polynomial(Constraint::new(x_minus_one, Sign::Positive))
        .unwrap();
    cad.add_polynomial(Constraint::new(four_minus_x, Sign::Positive))
        .unwrap();

    let token = CancellationToken::new();
    assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Sat(_)));
}
