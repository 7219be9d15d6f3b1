//! Rational interval arithmetic.
//!
//! Intervals are the substrate [`crate::ran::RealAlgebraicNumber`] refines
//! against: a closed-or-open pair of rational endpoints, always maintained
//! with `left <= right` and never collapsed to an open-open point.

use ratcad_nzq::Rational;
use std::fmt;

use crate::error::{RingsError, RingsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Open,
    Closed,
}

/// A nonempty rational interval `(left, right)` with per-endpoint open/closed tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    left: Rational,
    left_bound: Bound,
    right: Rational,
    right_bound: Bound,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lb, rb) = (
            match self.left_bound {
                Bound::Open => "(",
                Bound::Closed => "[",
            },
            match self.right_bound {
                Bound::Open => ")",
                Bound::Closed => "]",
            },
        );
        write!(f, "{}{}, {}{}", lb, self.left, self.right, rb)
    }
}

impl Interval {
    pub fn new(
        left: Rational,
        left_bound: Bound,
        right: Rational,
        right_bound: Bound,
    ) -> RingsResult<Self> {
        if left > right {
            return Err(RingsError::InvariantViolation(format!(
                "interval endpoints out of order: {left} > {right}"
            )));
        }
        if left == right && (left_bound == Bound::Open || right_bound == Bound::Open) {
            return Err(RingsError::InvariantViolation(
                "a degenerate interval must be closed at both ends".to_string(),
            ));
        }
        Ok(Self {
            left,
            left_bound,
            right,
            right_bound,
        })
    }

    /// The open interval `(left, right)`, as used by isolating intervals.
    pub fn open(left: Rational, right: Rational) -> RingsResult<Self> {
        Self::new(left, Bound::Open, right, Bound::Open)
    }

    /// The single-point closed interval `{q}`.
    pub fn point(q: Rational) -> Self {
        Self {
            left: q.clone(),
            left_bound: Bound::Closed,
            right: q,
            right_bound: Bound::Closed,
        }
    }

    pub fn left(&self) -> &Rational {
        &self.left
    }

    pub fn right(&self) -> &Rational {
        &self.right
    }

    pub fn left_bound(&self) -> Bound {
        self.left_bound
    }

    pub fn right_bound(&self) -> Bound {
        self.right_bound
    }

    pub fn is_point(&self) -> bool {
        self.left == self.right
    }

    pub fn width(&self) -> Rational {
        &self.right - &self.left
    }

    pub fn midpoint(&self) -> Rational {
        (&self.left + &self.right) * Rational::ONE_HALF
    }

    pub fn contains(&self, q: &Rational) -> bool {
        let left_ok = match self.left_bound {
            Bound::Closed => &self.left <= q,
            Bound::Open => &self.left < q,
        };
        let right_ok = match self.right_bound {
            Bound::Closed => q <= &self.right,
            Bound::Open => q < &self.right,
        };
        left_ok && right_ok
    }

    /// Split at the midpoint into two open-open halves `(left, m)` and `(m, right)`.
    ///
    /// Only meaningful for already-open intervals; callers that hit the root
    /// exactly at `m` are expected to collapse to a point themselves (see
    /// [`crate::root_isolator`]).
    pub fn bisect(&self) -> (Self, Self) {
        let m = self.midpoint();
        (
            Self::open(self.left.clone(), m.clone()).expect("bisection preserves ordering"),
            Self::open(m, self.right.clone()).expect("bisection preserves ordering"),
        )
    }

    pub fn add(&self, other: &Interval) -> Interval {
        Interval::new(
            &self.left + &other.left,
            weaker(self.left_bound, other.left_bound),
            &self.right + &other.right,
            weaker(self.right_bound, other.right_bound),
        )
        .expect("sum of ordered endpoints is ordered")
    }

    pub fn sub(&self, other: &Interval) -> Interval {
        Interval::new(
            &self.left - &other.right,
            weaker(self.left_bound, other.right_bound),
            &self.right - &other.left,
            weaker(self.right_bound, other.left_bound),
        )
        .expect("difference of ordered endpoints is ordered")
    }

    pub fn mul(&self, other: &Interval) -> Interval {
        let corners = [
            (&self.left * &other.left, self.left_bound, other.left_bound),
            (
                &self.left * &other.right,
                self.left_bound,
                other.right_bound,
            ),
            (
                &self.right * &other.left,
                self.right_bound,
                other.left_bound,
            ),
            (
                &self.right * &other.right,
                self.right_bound,
                other.right_bound,
            ),
        ];
        let (min_val, min_a, min_b) = corners
            .iter()
            .min_by(|a, b| a.0.cmp(&b.0))
            .cloned()
            .unwrap();
        let (max_val, max_a, max_b) = corners
            .iter()
            .max_by(|a, b| a.0.cmp(&b.0))
            .cloned()
            .unwrap();
        Interval::new(
            min_val,
            weaker(min_a, min_b),
            max_val,
            weaker(max_a, max_b),
        )
        .expect("min/max of ordered endpoints is ordered")
    }

    /// Outward-rounded reciprocal-style division. `0` must not lie in `other`.
    pub fn div(&self, other: &Interval) -> RingsResult<Interval> {
        if other.contains(&Rational::ZERO) {
            return Err(RingsError::InvariantViolation(
                "division by an interval containing zero".to_string(),
            ));
        }
        let corners = [
            (&self.left / &other.left, self.left_bound, other.left_bound),
            (
                &self.left / &other.right,
                self.left_bound,
                other.right_bound,
            ),
            (
                &self.right / &other.left,
                self.right_bound,
                other.left_bound,
            ),
            (
                &self.right / &other.right,
                self.right_bound,
                other.right_bound,
            ),
        ];
        let (min_val, min_a, min_b) = corners
            .iter()
            .min_by(|a, b| a.0.cmp(&b.0))
            .cloned()
            .unwrap();
        let (max_val, max_a, max_b) = corners
            .iter()
            .max_by(|a, b| a.0.cmp(&b.0))
            .cloned()
            .unwrap();
        Interval::new(min_val, weaker(min_a, min_b), max_val, weaker(max_a, max_b))
    }
}

/// Closed is a weaker (wider) guarantee than open when combining two endpoints.
fn weaker(a: Bound, b: Bound) -> Bound {
    match (a, b) {
        (Bound::Closed, Bound::Closed) => Bound::Closed,
        _ => Bound::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn rejects_degenerate_open_interval() {
        assert!(Interval::open(r(1), r(1)).is_err());
    }

    #[test]
    fn point_is_a_valid_closed_interval() {
        let p = Interval::point(r(3));
        assert!(p.is_point());
        assert!(p.contains(&r(3)));
    }

    #[test]
    fn bisect_splits_at_the_midpoint() {
        let i = Interval::open(r(0), r(4)).unwrap();
        let (lo, hi) = i.bisect();
        assert_eq!(lo.right(), &r(2));
        assert_eq!(hi.left(), &r(2));
        assert!(!lo.contains(&r(2)));
        assert!(!hi.contains(&r(2)));
    }

    #[test]
    fn mul_takes_outward_bound_over_all_corners() {
        let a = Interval::open(r(-2), r(1)).unwrap();
        let b = Interval::open(r(-3), r(5)).unwrap();
        let prod = a.mul(&b);
        // corners: -2*-3=6, -2*5=-10, 1*-3=-3, 1*5=5 -> [-10, 6]
        assert_eq!(prod.left(), &r(-10));
        assert_eq!(prod.right(), &r(6));
    }

    #[test]
    fn div_rejects_denominator_containing_zero() {
        let a = Interval::open(r(1), r(2)).unwrap();
        let b = Interval::open(r(-1), r(1)).unwrap();
        assert!(a.div(&b).is_err());
    }
}
