//! Isolate all real roots of a rational univariate polynomial into a sorted
//! list of [`RealAlgebraicNumber`]s, one per distinct root.

use ratcad_nzq::Rational;

use crate::error::{RingsError, RingsResult};
use crate::interval::Interval;
use crate::polynomial::{self, RationalPolynomial};
use crate::ran::RealAlgebraicNumber;

/// Isolate every distinct real root of `p`, returning them in ascending
/// order. `p` need not be square-free or nonzero on input: the zero
/// polynomial is rejected as malformed, since it has no well-defined root set.
pub fn real_roots(p: &RationalPolynomial) -> RingsResult<Vec<RealAlgebraicNumber>> {
    real_roots_cancellable(p, None)
}

/// As [`real_roots`], but polls `cancel` (per §5: "polled ... at each
/// refinement step inside 4.C/4.D") before every bisection step, returning
/// [`RingsError::Cancelled`] as soon as it reports `true`.
pub fn real_roots_cancellable(
    p: &RationalPolynomial,
    cancel: Option<&dyn Fn() -> bool>,
) -> RingsResult<Vec<RealAlgebraicNumber>> {
    if p.is_zero() {
        return Err(RingsError::MalformedInput(
            "cannot isolate roots of the zero polynomial".to_string(),
        ));
    }
    let square_free = p.square_free_part();
    if square_free.degree() == Some(0) {
        return Ok(vec![]);
    }
    let bound = square_free.cauchy_bound();
    let mut roots = Vec::new();
    bisect_and_emit(&square_free, &(-&bound), &bound, &mut roots, cancel)?;
    roots.sort_by(|a, b| a.compare(b));
    Ok(roots)
}

fn bisect_and_emit(
    p: &RationalPolynomial,
    left: &Rational,
    right: &Rational,
    out: &mut Vec<RealAlgebraicNumber>,
    cancel: Option<&dyn Fn() -> bool>,
) -> RingsResult<()> {
    if cancel.is_some_and(|c| c()) {
        return Err(RingsError::Cancelled);
    }
    debug_assert!(
        polynomial::sign(&p.eval(left)) != 0 && polynomial::sign(&p.eval(right)) != 0,
        "isolator must never bisect to an endpoint that is itself a root"
    );
    let count = p.sturm_root_count(left, right);
    match count {
        0 => Ok(()),
        1 => {
            let interval = Interval::open(left.clone(), right.clone())?;
            out.push(RealAlgebraicNumber::from_isolating_interval(
                p.clone(),
                interval,
            )?);
            Ok(())
        }
        _ => {
            let interval = Interval::open(left.clone(), right.clone())?;
            let mid = interval.midpoint();
            let mid_sign = polynomial::sign(&p.eval(&mid));
            if mid_sign == 0 {
                out.push(RealAlgebraicNumber::from_rational(mid.clone()));
                bisect_and_emit(p, left, &mid, out, cancel)?;
                bisect_and_emit(p, &mid, right, out, cancel)?;
            } else {
                bisect_and_emit(p, left, &mid, out, cancel)?;
                bisect_and_emit(p, &mid, right, out, cancel)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratcad_nzq::Rational;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    fn poly(coeffs: &[i64]) -> RationalPolynomial {
        RationalPolynomial::from_coeffs(coeffs.iter().map(|n| r(*n)).collect())
    }

    #[test]
    fn isolates_five_integer_roots() {
        // (x-3)(x-5)(x-7)(x-11)(x-13)
        let p = poly(&[-15015, 12673, -3954, 574, -39, 1]);
        let roots = real_roots(&p).unwrap();
        assert_eq!(roots.len(), 5);
        let eps = Rational::from_integers(1, 1000);
        let rounded: Vec<Rational> = roots
            .iter()
            .map(|ran| {
                let mut ran = ran.clone();
                ran.refine_to(&eps);
                let nearest = (ran.approximate() + Rational::ONE_HALF).floor();
                Rational::from(nearest)
            })
            .collect();
        assert_eq!(rounded, vec![r(3), r(5), r(7), r(11), r(13)]);
    }

    #[test]
    fn zero_polynomial_is_rejected() {
        assert!(real_roots(&RationalPolynomial::zero()).is_err());
    }

    #[test]
    fn constant_polynomial_has_no_roots() {
        assert_eq!(real_roots(&poly(&[1])).unwrap().len(), 0);
    }

    #[test]
    fn roots_come_out_in_ascending_order() {
        let p = poly(&[-2, 0, 1]); // x^2 - 2
        let roots = real_roots(&p).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots[0].approximate() < roots[1].approximate());
    }

    #[test]
    fn handles_a_root_that_lands_exactly_on_a_bisection_midpoint() {
        // x^3 - x = x(x-1)(x+1): roots at -1, 0, 1, all rationals that a
        // midpoint search is likely to hit directly.
        let p = poly(&[0, -1, 0, 1]);
        let roots = real_roots(&p).unwrap();
        assert_eq!(roots.len(), 3);
        assert!(roots.iter().any(|ran| ran.is_numeric()));
    }
}
