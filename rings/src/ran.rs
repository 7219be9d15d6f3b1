//! Real algebraic numbers: exact roots of rational polynomials, represented
//! either as a rational itself or as a square-free polynomial together with
//! an isolating interval.
//!
//! Per the design note on shared polymorphism, this is a plain tagged enum
//! dispatched on at the call site rather than a trait-object hierarchy: every
//! operation here is total across both variants.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use ratcad_nzq::Rational;

use crate::error::{RingsError, RingsResult};
use crate::interval::Interval;
use crate::polynomial::{self, RationalPolynomial};

#[derive(Debug, Clone)]
pub enum RealAlgebraicNumber {
    Numeric(Rational),
    Interval(IntervalRoot),
}

/// A square-free polynomial and an open interval isolating exactly one of
/// its real roots. The polynomial is shared (many sample-tree nodes can
/// reference the same defining polynomial); the interval is refined in
/// place behind a single-writer cell, matching the "shared ownership of an
/// immutable polynomial plus a single-writer interval cell" design note.
#[derive(Debug, Clone)]
pub struct IntervalRoot {
    poly: Rc<RationalPolynomial>,
    interval: Rc<RefCell<Interval>>,
}

impl fmt::Display for RealAlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealAlgebraicNumber::Numeric(q) => write!(f, "{q}"),
            RealAlgebraicNumber::Interval(ir) => {
                write!(f, "root_of({}, {})", ir.poly, ir.interval.borrow())
            }
        }
    }
}

impl RealAlgebraicNumber {
    pub fn from_rational(q: Rational) -> Self {
        RealAlgebraicNumber::Numeric(q)
    }

    /// Construct an interval-represented RAN. Validates the invariants from
    /// §3: `p` square-free, `interval` isolates exactly one root with a
    /// strict sign change at the endpoints.
    pub fn from_isolating_interval(
        p: RationalPolynomial,
        interval: Interval,
    ) -> RingsResult<Self> {
        if p.is_zero() {
            return Err(RingsError::InvariantViolation(
                "RAN defining polynomial must be nonzero".to_string(),
            ));
        }
        if !p.is_square_free() {
            return Err(RingsError::InvariantViolation(
                "RAN defining polynomial must be square-free".to_string(),
            ));
        }
        let left_sign = polynomial::sign(&p.eval(interval.left()));
        let right_sign = polynomial::sign(&p.eval(interval.right()));
        if left_sign == 0 || right_sign == 0 {
            return Err(RingsError::InvariantViolation(
                "isolating interval endpoints must not be roots".to_string(),
            ));
        }
        if left_sign == right_sign {
            return Err(RingsError::InvariantViolation(
                "isolating interval must show a strict sign change".to_string(),
            ));
        }
        if p.sturm_root_count(interval.left(), interval.right()) != 1 {
            return Err(RingsError::InvariantViolation(
                "isolating interval must contain exactly one root".to_string(),
            ));
        }
        Ok(RealAlgebraicNumber::Interval(IntervalRoot {
            poly: Rc::new(p),
            interval: Rc::new(RefCell::new(interval)),
        }))
    }

    /// The real zero of `x - q`, collapsed directly to the numeric form.
    pub fn zero() -> Self {
        RealAlgebraicNumber::Numeric(Rational::ZERO)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, RealAlgebraicNumber::Numeric(_))
    }

    /// The polynomial this RAN is defined as a root of: `x - q` for a
    /// numeric RAN, or the stored square-free polynomial otherwise.
    pub fn defining_poly(&self) -> RationalPolynomial {
        match self {
            RealAlgebraicNumber::Numeric(q) => {
                RationalPolynomial::from_coeffs(vec![-q.clone(), Rational::ONE])
            }
            RealAlgebraicNumber::Interval(ir) => (*ir.poly).clone(),
        }
    }

    /// A display-only rational approximation: the value itself when numeric,
    /// the current isolating interval's midpoint otherwise.
    pub fn approximate(&self) -> Rational {
        match self {
            RealAlgebraicNumber::Numeric(q) => q.clone(),
            RealAlgebraicNumber::Interval(ir) => ir.interval.borrow().midpoint(),
        }
    }

    /// Rational bounds known to contain this real number right now: the
    /// value itself (repeated) for `Numeric`, the current isolating
    /// interval's endpoints for `Interval`. CAD lifting (§4.G step 2) uses
    /// this to place a rational sample strictly between two distinct roots
    /// without guessing at precision ahead of time.
    pub fn bounds(&self) -> (Rational, Rational) {
        match self {
            RealAlgebraicNumber::Numeric(q) => (q.clone(), q.clone()),
            RealAlgebraicNumber::Interval(ir) => {
                let i = ir.interval.borrow();
                (i.left().clone(), i.right().clone())
            }
        }
    }

    /// Halve the interval once, collapsing to `Numeric` if the midpoint is
    /// an exact root.
    pub fn refine(&mut self) {
        if let RealAlgebraicNumber::Interval(ir) = self {
            let (p, collapse) = {
                let i = ir.interval.borrow();
                let m = i.midpoint();
                let sm = polynomial::sign(&ir.poly.eval(&m));
                if sm == 0 {
                    (None, Some(m))
                } else {
                    let sl = polynomial::sign(&ir.poly.eval(i.left()));
                    let (lo, hi) = i.bisect();
                    let half = if sm == sl { hi } else { lo };
                    (Some(half), None)
                }
            };
            if let Some(m) = collapse {
                *self = RealAlgebraicNumber::Numeric(m);
            } else if let Some(half) = p {
                *ir.interval.borrow_mut() = half;
            }
        }
    }

    /// Refine until the isolating interval has width `<= eps` (a no-op for
    /// `Numeric`, which has zero width by construction).
    pub fn refine_to(&mut self, eps: &Rational) {
        let _ = self.refine_to_cancellable(eps, None);
    }

    /// As [`Self::refine_to`], but polls `cancel` before each halving step
    /// and stops early with [`RingsError::Cancelled`] once it reports `true`
    /// (§5's refinement-step cancellation point).
    pub fn refine_to_cancellable(
        &mut self,
        eps: &Rational,
        cancel: Option<&dyn Fn() -> bool>,
    ) -> RingsResult<()> {
        while let RealAlgebraicNumber::Interval(ir) = self {
            if ir.interval.borrow().width() <= *eps {
                break;
            }
            if cancel.is_some_and(|c| c()) {
                return Err(RingsError::Cancelled);
            }
            self.refine();
        }
        Ok(())
    }

    /// `-1`, `0` or `+1`: the sign of `q` evaluated at this real number.
    pub fn sign_on(&self, q: &RationalPolynomial) -> i32 {
        match self {
            RealAlgebraicNumber::Numeric(r) => polynomial::sign(&q.eval(r)),
            RealAlgebraicNumber::Interval(ir) => {
                if q.is_zero() {
                    return 0;
                }
                loop {
                    let i = ir.interval.borrow().clone();
                    let g = RationalPolynomial::gcd(&ir.poly, q);
                    if g.degree().unwrap_or(0) > 0
                        && g.sturm_root_count(i.left(), i.right()) >= 1
                    {
                        return 0;
                    }
                    let ls = polynomial::sign(&q.eval(i.left()));
                    let rs = polynomial::sign(&q.eval(i.right()));
                    if ls != 0 && ls == rs {
                        return ls;
                    }
                    drop(i);
                    self_refine_interval(ir);
                }
            }
        }
    }

    /// A total order consistent with the real order. Refines both operands
    /// as needed.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RealAlgebraicNumber::Numeric(a), RealAlgebraicNumber::Numeric(b)) => a.cmp(b),
            (RealAlgebraicNumber::Numeric(q), RealAlgebraicNumber::Interval(_))
            | (RealAlgebraicNumber::Interval(_), RealAlgebraicNumber::Numeric(q)) => {
                let (q, ir, flip) = match (self, other) {
                    (RealAlgebraicNumber::Numeric(q), RealAlgebraicNumber::Interval(ir)) => {
                        (q.clone(), ir.clone(), false)
                    }
                    (RealAlgebraicNumber::Interval(ir), RealAlgebraicNumber::Numeric(q)) => {
                        (q.clone(), ir.clone(), true)
                    }
                    _ => unreachable!(),
                };
                let ord = compare_numeric_with_interval(&q, &ir);
                if flip { ord.reverse() } else { ord }
            }
            (RealAlgebraicNumber::Interval(a), RealAlgebraicNumber::Interval(b)) => {
                compare_intervals(a, b)
            }
        }
    }

    pub fn add(a: &Self, b: &Self) -> Self {
        binary_op(a, b, |x, y| x + y, resultant_of_sum, |ia, ib| ia.add(ib))
    }

    pub fn mul(a: &Self, b: &Self) -> Self {
        binary_op(a, b, |x, y| x * y, resultant_of_product, |ia, ib| ia.mul(ib))
    }
}

fn self_refine_interval(ir: &IntervalRoot) {
    let (collapse, half) = {
        let i = ir.interval.borrow();
        let m = i.midpoint();
        let sm = polynomial::sign(&ir.poly.eval(&m));
        if sm == 0 {
            (Some(m), None)
        } else {
            let sl = polynomial::sign(&ir.poly.eval(i.left()));
            let (lo, hi) = i.bisect();
            (None, Some(if sm == sl { hi } else { lo }))
        }
    };
    if let Some(m) = collapse {
        *ir.interval.borrow_mut() = Interval::point(m);
    } else if let Some(half) = half {
        *ir.interval.borrow_mut() = half;
    }
}

fn compare_numeric_with_interval(q: &Rational, ir: &IntervalRoot) -> Ordering {
    loop {
        let i = ir.interval.borrow().clone();
        if !i.contains(q) {
            return q.cmp(i.left());
        }
        if i.is_point() {
            return Ordering::Equal;
        }
        drop(i);
        self_refine_interval(ir);
    }
}

fn compare_intervals(a: &IntervalRoot, b: &IntervalRoot) -> Ordering {
    loop {
        let ia = a.interval.borrow().clone();
        let ib = b.interval.borrow().clone();
        if *a.poly == *b.poly && ia == ib {
            return Ordering::Equal;
        }
        if ia.right() <= ib.left() {
            return Ordering::Less;
        }
        if ib.right() <= ia.left() {
            return Ordering::Greater;
        }
        drop(ia);
        drop(ib);
        self_refine_interval(a);
        self_refine_interval(b);
    }
}

/// Shared machinery for `a + b` / `a * b` on two RANs: build the candidate
/// defining polynomial by resultant elimination (per §4.C), derive an
/// outward interval from the operand intervals, then refine it down to a
/// single root of the resultant.
fn binary_op(
    a: &RealAlgebraicNumber,
    b: &RealAlgebraicNumber,
    numeric_op: impl Fn(&Rational, &Rational) -> Rational,
    resultant_poly: impl Fn(&RationalPolynomial, &RationalPolynomial) -> RationalPolynomial,
    interval_op: impl Fn(&Interval, &Interval) -> Interval,
) -> RealAlgebraicNumber {
    if let (RealAlgebraicNumber::Numeric(x), RealAlgebraicNumber::Numeric(y)) = (a, b) {
        return RealAlgebraicNumber::Numeric(numeric_op(x, y));
    }
    let pa = a.defining_poly();
    let pb = b.defining_poly();
    let combined = resultant_poly(&pa, &pb).square_free_part();
    debug_assert!(!combined.is_zero());

    let mut ia = a.approximate_interval();
    let mut ib = b.approximate_interval();
    loop {
        let candidate = interval_op(&ia, &ib);
        if !candidate.is_point() {
            let count = combined.sturm_root_count(candidate.left(), candidate.right());
            if count == 1
                && polynomial::sign(&combined.eval(candidate.left())) != 0
                && polynomial::sign(&combined.eval(candidate.right())) != 0
            {
                return RealAlgebraicNumber::from_isolating_interval(combined, candidate)
                    .expect("constructed interval isolates exactly one root by construction");
            }
        } else {
            let m = candidate.midpoint();
            if polynomial::sign(&combined.eval(&m)) == 0 {
                return RealAlgebraicNumber::Numeric(m);
            }
        }
        ia = shrink(a, &ia);
        ib = shrink(b, &ib);
    }
}

fn shrink(ran: &RealAlgebraicNumber, current: &Interval) -> Interval {
    match ran {
        RealAlgebraicNumber::Numeric(q) => Interval::point(q.clone()),
        RealAlgebraicNumber::Interval(ir) => {
            if current.width() > Rational::ZERO {
                self_refine_interval(ir);
            }
            ir.interval.borrow().clone()
        }
    }
}

impl RealAlgebraicNumber {
    fn approximate_interval(&self) -> Interval {
        match self {
            RealAlgebraicNumber::Numeric(q) => Interval::point(q.clone()),
            RealAlgebraicNumber::Interval(ir) => ir.interval.borrow().clone(),
        }
    }
}

/// `Res_x(p(x), q(y - x))`, as a polynomial in `y`: the defining polynomial
/// candidate for `a + b` when `a`, `b` have defining polynomials `p`, `q`.
fn resultant_of_sum(p: &RationalPolynomial, q: &RationalPolynomial) -> RationalPolynomial {
    // Treat q(y - x) as a polynomial in x with coefficients that are linear
    // polynomials in y, then take the resultant in x via repeated
    // polynomial remainder over Q[y] implemented through explicit
    // bivariate coefficients collapsed back into a single indeterminate by
    // substituting y with a fresh formal variable represented as `x` itself
    // once elimination is done. We implement this directly via the
    // resultant-as-determinant-free Euclidean approach, specialised to the
    // shift substitution q(y - x).
    bivariate_resultant(p, &shift_substitute(q))
}

/// `Res_x(x^deg(p) p(y/x), q(x))`, as a polynomial in `y`: the defining
/// polynomial candidate for `a * b`.
fn resultant_of_product(p: &RationalPolynomial, q: &RationalPolynomial) -> RationalPolynomial {
    bivariate_resultant(&homogenize_reciprocal(p), q)
}

/// A polynomial in two formal variables represented as `Vec<RationalPolynomial>`,
/// coefficient `i` being the coefficient of `x^i` as a polynomial in `y`.
type Bivariate = Vec<RationalPolynomial>;

fn shift_substitute(q: &RationalPolynomial) -> Bivariate {
    // q(y - x) expanded in powers of x, with y-polynomial coefficients:
    // q(y-x) = sum_k c_k (y-x)^k = sum_k c_k sum_j C(k,j) y^(k-j) (-x)^j
    let deg = q.degree().unwrap_or(0);
    let mut out: Bivariate = vec![RationalPolynomial::zero(); deg + 1];
    for (k, ck) in q.coeffs().iter().enumerate() {
        for j in 0..=k {
            let binom = binomial(k, j);
            let mut term = vec![Rational::ZERO; k - j + 1];
            term[k - j] = ck * &Rational::from(binom as u64);
            let sign = if j % 2 == 0 { Rational::ONE } else { -Rational::ONE };
            let y_poly = RationalPolynomial::from_coeffs(term).scale(&sign);
            out[j] = out[j].add(&y_poly);
        }
    }
    out
}

fn homogenize_reciprocal(p: &RationalPolynomial) -> Bivariate {
    // x^deg(p) p(y/x) = sum_i a_i x^(deg-i) y^i: coefficient of x^(deg-i) is a_i*y^i.
    let deg = p.degree().unwrap_or(0);
    let mut out: Bivariate = vec![RationalPolynomial::zero(); deg + 1];
    for (i, ai) in p.coeffs().iter().enumerate() {
        let mut term = vec![Rational::ZERO; i + 1];
        term[i] = ai.clone();
        out[deg - i] = RationalPolynomial::from_coeffs(term);
    }
    out
}

fn binomial(n: usize, k: usize) -> u128 {
    let k = k.min(n - k.min(n));
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// Resultant of a bivariate polynomial (represented as a `Vec` of x-degree
/// coefficients in `y`) against `q(x)` (a univariate, i.e. degree-0-in-y
/// bivariate), eliminating `x` and leaving a univariate polynomial in `y`.
fn bivariate_resultant(p_in_x: &Bivariate, q_plain: &RationalPolynomial) -> RationalPolynomial {
    bivariate_resultant_both(p_in_x, &vec_from_univariate(q_plain))
}

fn vec_from_univariate(q: &RationalPolynomial) -> Bivariate {
    q.coeffs()
        .iter()
        .map(|c| RationalPolynomial::constant(c.clone()))
        .collect()
}

fn trim(mut v: Bivariate) -> Bivariate {
    while matches!(v.last(), Some(c) if c.is_zero()) {
        v.pop();
    }
    v
}

/// Resultant (eliminating `x`) of two polynomials in `x` whose coefficients
/// are themselves polynomials in `y`, computed as the determinant of the
/// Sylvester matrix via Bareiss' fraction-free elimination. This is the
/// textbook definition of the resultant, so it is correct by construction
/// rather than relying on a pseudo-division remainder sequence over the
/// non-field coefficient ring `Q[y]`.
fn bivariate_resultant_both(a: &Bivariate, b: &Bivariate) -> RationalPolynomial {
    let p = trim(a.clone());
    let q = trim(b.clone());
    if p.is_empty() || q.is_empty() {
        return RationalPolynomial::zero();
    }
    let dp = p.len() - 1;
    let dq = q.len() - 1;
    if dq == 0 {
        return pow_poly(&q[0], dp);
    }
    if dp == 0 {
        return pow_poly(&p[0], dq);
    }
    let matrix = sylvester_matrix(&p, &q, dp, dq);
    bareiss_determinant(matrix)
}

fn pow_poly(base: &RationalPolynomial, exp: usize) -> RationalPolynomial {
    let mut acc = RationalPolynomial::one();
    for _ in 0..exp {
        acc = acc.mul(base);
    }
    acc
}

/// The `(dp+dq) x (dp+dq)` Sylvester matrix of `p` (degree `dp`) and `q`
/// (degree `dq`), each row a shifted copy of the coefficient list
/// high-degree first.
fn sylvester_matrix(
    p: &Bivariate,
    q: &Bivariate,
    dp: usize,
    dq: usize,
) -> Vec<Vec<RationalPolynomial>> {
    let n = dp + dq;
    let mut mat = vec![vec![RationalPolynomial::zero(); n]; n];
    let p_hi: Vec<RationalPolynomial> = (0..=dp).map(|k| p[dp - k].clone()).collect();
    let q_hi: Vec<RationalPolynomial> = (0..=dq).map(|k| q[dq - k].clone()).collect();
    for i in 0..dq {
        for (k, c) in p_hi.iter().enumerate() {
            mat[i][i + k] = c.clone();
        }
    }
    for i in 0..dp {
        for (k, c) in q_hi.iter().enumerate() {
            mat[dq + i][i + k] = c.clone();
        }
    }
    mat
}

/// Determinant of a matrix over `Q[y]` via Bareiss' algorithm: every
/// division performed is guaranteed exact by the algorithm's minor
/// identity, so `div_rem` remainders are asserted zero rather than handled.
fn bareiss_determinant(mut mat: Vec<Vec<RationalPolynomial>>) -> RationalPolynomial {
    let n = mat.len();
    if n == 0 {
        return RationalPolynomial::one();
    }
    let mut prev_pivot = RationalPolynomial::one();
    let mut sign = 1i32;
    for k in 0..n - 1 {
        if mat[k][k].is_zero() {
            match (k + 1..n).find(|&r| !mat[r][k].is_zero()) {
                Some(r) => {
                    mat.swap(k, r);
                    sign = -sign;
                }
                None => return RationalPolynomial::zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = mat[i][j].mul(&mat[k][k]).sub(&mat[i][k].mul(&mat[k][j]));
                let (quotient, remainder) = num.div_rem(&prev_pivot);
                debug_assert!(remainder.is_zero(), "Bareiss elimination step must divide exactly");
                mat[i][j] = quotient;
            }
        }
        prev_pivot = mat[k][k].clone();
    }
    let det = mat[n - 1][n - 1].clone();
    if sign < 0 { det.neg() } else { det }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root_isolator::real_roots;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    fn poly(coeffs: &[i64]) -> RationalPolynomial {
        RationalPolynomial::from_coeffs(coeffs.iter().map(|n| r(*n)).collect())
    }

    #[test]
    fn numeric_sign_on_matches_evaluation() {
        let a = RealAlgebraicNumber::from_rational(r(2));
        let p = poly(&[-2, 0, 1]); // x^2 - 2
        assert_eq!(a.sign_on(&p), -1);
    }

    #[test]
    fn compare_orders_roots_of_x_squared_minus_two() {
        let p = poly(&[-2, 0, 1]);
        let roots = real_roots(&p).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].compare(&roots[1]), Ordering::Less);
    }

    #[test]
    fn symmetric_roots_of_x_eight_minus_two_sum_to_zero() {
        let p = poly(&[-2, 0, 0, 0, 0, 0, 0, 0, 1]); // x^8 - 2
        let roots = real_roots(&p).unwrap();
        let a = &roots[0];
        let b = &roots[roots.len() - 1];
        let neg_b = RealAlgebraicNumber::mul(b, &RealAlgebraicNumber::from_rational(r(-1)));
        assert_eq!(a.compare(&neg_b), Ordering::Equal);
    }

    #[test]
    fn sqrt2_plus_its_negation_is_zero() {
        let p = poly(&[-2, 0, 1]); // x^2 - 2
        let roots = real_roots(&p).unwrap();
        let a = roots[0].clone(); // negative root
        let b = roots[1].clone(); // positive root
        let sum = RealAlgebraicNumber::add(&a, &b);
        match sum {
            RealAlgebraicNumber::Numeric(q) => assert_eq!(q, Rational::ZERO),
            RealAlgebraicNumber::Interval(_) => panic!("expected exact collapse to zero"),
        }
    }

    #[test]
    fn sqrt2_times_negative_sqrt2_is_negative_two() {
        let p = poly(&[-2, 0, 1]);
        let roots = real_roots(&p).unwrap();
        let a = roots[0].clone();
        let b = roots[1].clone();
        let product = RealAlgebraicNumber::mul(&a, &b);
        match product {
            RealAlgebraicNumber::Numeric(q) => assert_eq!(q, r(-2)),
            RealAlgebraicNumber::Interval(ir) => {
                // Accept a tightly isolated interval around -2 as well.
                let i = ir.interval.borrow();
                assert!(i.contains(&r(-2)));
            }
        }
    }
}
