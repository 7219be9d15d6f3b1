//! Exact univariate polynomials over the rationals.
//!
//! Coefficients are stored lowest-degree first and always canonicalized: no
//! trailing zero coefficient, and the zero polynomial is the empty vector.
//! This is the "external exact-arithmetic facility" the design assumes,
//! specialised to a single indeterminate with rational coefficients; the CAD
//! layer builds [`crate::multivariate::MultivariatePoly`] on top of it.

use crate::interval::Interval;
use itertools::Itertools;
use ratcad_nzq::traits::Abs;
use ratcad_nzq::{Integer, Natural, Rational};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalPolynomial {
    // coeffs[i] is the coefficient of x^i; coeffs is empty iff this is the zero polynomial.
    coeffs: Vec<Rational>,
}

impl fmt::Display for RationalPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeffs.is_empty() {
            return write!(f, "0");
        }
        let terms = self
            .coeffs
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| **c != Rational::ZERO)
            .map(|(i, c)| match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            })
            .join(" + ");
        write!(f, "{terms}")
    }
}

impl RationalPolynomial {
    pub fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    pub fn one() -> Self {
        Self::constant(Rational::ONE)
    }

    pub fn var() -> Self {
        Self {
            coeffs: vec![Rational::ZERO, Rational::ONE],
        }
    }

    pub fn constant(c: Rational) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// Build from lowest-degree-first coefficients, trimming trailing zeros.
    pub fn from_coeffs(mut coeffs: Vec<Rational>) -> Self {
        while matches!(coeffs.last(), Some(c) if *c == Rational::ZERO) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or(Rational::ZERO)
    }

    pub fn leading_coeff(&self) -> Option<Rational> {
        self.coeffs.last().cloned()
    }

    pub fn neg(&self) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| -c).collect())
    }

    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(self.coeff(i) + other.coeff(i));
        }
        Self::from_coeffs(out)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scale(&self, c: &Rational) -> Self {
        if *c == Rational::ZERO {
            return Self::zero();
        }
        Self::from_coeffs(self.coeffs.iter().map(|a| a * c).collect())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out = vec![Rational::ZERO; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if *a == Rational::ZERO {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Self::from_coeffs(out)
    }

    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        let out = self.coeffs[1..]
            .iter()
            .enumerate()
            .map(|(i, c)| c * &Rational::from((i + 1) as u64))
            .collect();
        Self::from_coeffs(out)
    }

    pub fn eval(&self, x: &Rational) -> Rational {
        // Horner's method.
        let mut acc = Rational::ZERO;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Outward-rounded evaluation on an interval; sound for sign testing only
    /// when the polynomial is known not to change sign across the interval,
    /// or when only the resulting interval's sign is examined.
    pub fn eval_interval(&self, i: &Interval) -> Interval {
        let mut acc = Interval::point(Rational::ZERO);
        // Horner's method lifted to interval arithmetic.
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(i).add(&Interval::point(c.clone()));
        }
        acc
    }

    /// -1, 0 or +1.
    pub fn sign_at(&self, x: &Rational) -> i32 {
        sign(&self.eval(x))
    }

    /// Division with remainder: `self = q * other + r` with `deg(r) < deg(other)`.
    /// `other` must be nonzero.
    pub fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "division by the zero polynomial");
        let mut remainder = self.coeffs.clone();
        let other_deg = other.degree().unwrap();
        let other_lead = other.leading_coeff().unwrap();
        if remainder.len() < other_deg + 1 {
            return (Self::zero(), self.clone());
        }
        let mut quotient = vec![Rational::ZERO; remainder.len() - other_deg];
        for i in (other_deg..remainder.len()).rev() {
            if remainder[i] == Rational::ZERO {
                continue;
            }
            let coeff = &remainder[i] / &other_lead;
            let shift = i - other_deg;
            quotient[shift] = coeff.clone();
            for (j, oc) in other.coeffs.iter().enumerate() {
                remainder[shift + j] -= &coeff * oc;
            }
        }
        (
            Self::from_coeffs(quotient),
            Self::from_coeffs(remainder),
        )
    }

    pub fn rem(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    /// Content: the gcd of the (integer, after clearing denominators)
    /// coefficients, signed so the leading coefficient of the primitive part
    /// is positive. Returns `Rational::ZERO` for the zero polynomial.
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return Rational::ZERO;
        }
        let denom_lcm = Natural::lcm_list(
            self.coeffs
                .iter()
                .map(|c| c.denominator())
                .collect::<Vec<_>>(),
        );
        let integer_coeffs: Vec<Integer> = self
            .coeffs
            .iter()
            .map(|c| (c * &Rational::from(&denom_lcm)).floor())
            .collect();
        let mut g = Natural::ZERO;
        for c in &integer_coeffs {
            g = g.gcd(&c.clone().abs().try_into().unwrap_or(Natural::ZERO));
        }
        let mut content = Rational::from_integers(Integer::from(g), Integer::from(denom_lcm));
        if self.leading_coeff().unwrap() < Rational::ZERO {
            content = -content;
        }
        content
    }

    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let c = self.content();
        self.scale(&(Rational::ONE / c))
    }

    /// `gcd(self, self')`.
    pub fn square_free_part(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let g = Self::gcd(self, &self.derivative());
        if g.degree().is_none() || g.degree() == Some(0) {
            self.primitive_part()
        } else {
            self.div_rem(&g).0.primitive_part()
        }
    }

    /// Polynomial gcd via the Euclidean algorithm on primitive parts (no
    /// pseudo-remainder bookkeeping: rational coefficients make exact
    /// division always available).
    pub fn gcd(a: &Self, b: &Self) -> Self {
        if a.is_zero() {
            return b.primitive_part();
        }
        if b.is_zero() {
            return a.primitive_part();
        }
        let mut x = a.primitive_part();
        let mut y = b.primitive_part();
        while !y.is_zero() {
            let r = x.rem(&y).primitive_part();
            x = y;
            y = r;
        }
        if x.leading_coeff().map(|c| c < Rational::ZERO).unwrap_or(false) {
            x.neg()
        } else {
            x
        }
    }

    pub fn is_square_free(&self) -> bool {
        !self.is_zero() && Self::gcd(self, &self.derivative()).degree() == Some(0)
    }

    /// The principal subresultant coefficient sequence of `self` and `other`,
    /// from the subresultant Euclidean PRS. Index `i` of the returned vector
    /// holds the degree-`i` subresultant polynomial; used by CAD projection
    /// (4.F) to build elimination sets without recomputing from scratch for
    /// every pair.
    pub fn subresultants(a: &Self, b: &Self) -> Vec<Self> {
        let mut seq = vec![];
        if a.is_zero() || b.is_zero() {
            return seq;
        }
        let (mut p, mut q) = if a.degree() >= b.degree() {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        seq.push(p.clone());
        seq.push(q.clone());
        while !q.is_zero() {
            let r = p.rem(&q);
            if r.is_zero() {
                break;
            }
            seq.push(r.clone());
            p = q;
            q = r;
        }
        seq
    }

    /// The resultant of `self` and `other` in the shared indeterminate, via
    /// the Euclidean PRS (sign-tracked so it matches the determinant
    /// definition exactly, not merely up to sign).
    pub fn resultant(a: &Self, b: &Self) -> Rational {
        if a.is_zero() || b.is_zero() {
            return Rational::ZERO;
        }
        let mut p = a.clone();
        let mut q = b.clone();
        let mut sign_flag = 1i32;
        let mut scale = Rational::ONE;
        loop {
            let (dp, dq) = (p.degree().unwrap(), q.degree().unwrap());
            if dq == 0 {
                let lc_q = q.leading_coeff().unwrap();
                let mut pow = Rational::ONE;
                for _ in 0..dp {
                    pow = pow * &lc_q;
                }
                return Rational::from(sign_flag) * scale * pow;
            }
            if dp % 2 == 1 && dq % 2 == 1 {
                sign_flag = -sign_flag;
            }
            let r = p.rem(&q);
            let lc_q = q.leading_coeff().unwrap();
            let mut pow = Rational::ONE;
            for _ in 0..(dp - dq + 1) {
                pow = pow * &lc_q;
            }
            scale = scale * pow;
            if r.is_zero() {
                return Rational::ZERO;
            }
            p = q;
            q = r;
        }
    }

    /// Standard Sturm sequence `p0 = p, p1 = p', p_{i+1} = -rem(p_{i-1}, p_i)`.
    /// `p` must be square-free.
    pub fn sturm_sequence(&self) -> Vec<Self> {
        debug_assert!(self.is_square_free(), "Sturm sequence requires a square-free polynomial");
        let mut seq = vec![self.clone(), self.derivative()];
        loop {
            let n = seq.len();
            let last = &seq[n - 1];
            if last.is_zero() {
                break;
            }
            let r = seq[n - 2].rem(last).neg();
            seq.push(r);
        }
        seq
    }

    fn sign_changes(seq: &[Self], x: &Rational) -> usize {
        let mut signs = seq
            .iter()
            .map(|p| sign(&p.eval(x)))
            .filter(|s| *s != 0);
        let mut changes = 0;
        if let Some(mut prev) = signs.next() {
            for s in signs {
                if s != prev {
                    changes += 1;
                    prev = s;
                }
            }
        }
        changes
    }

    /// Number of distinct real roots of `self` strictly inside `(left, right)`,
    /// via the Sturm sign-change count. `self` must be square-free and
    /// `left`/`right` must not themselves be roots.
    pub fn sturm_root_count(&self, left: &Rational, right: &Rational) -> usize {
        let seq = self.sturm_sequence();
        let at_left = Self::sign_changes(&seq, left);
        let at_right = Self::sign_changes(&seq, right);
        at_left
            .checked_sub(at_right)
            .expect("sign-change count decreases left to right")
    }

    /// A Cauchy bound `B` such that every real root of `self` lies in `(-B, B)`.
    pub fn cauchy_bound(&self) -> Rational {
        let deg = match self.degree() {
            None | Some(0) => return Rational::ONE,
            Some(d) => d,
        };
        let lc = self.leading_coeff().unwrap();
        let mut max_ratio = Rational::ZERO;
        for c in &self.coeffs[..deg] {
            let ratio = (c.abs_ref()) / lc.abs_ref();
            if ratio > max_ratio {
                max_ratio = ratio;
            }
        }
        Rational::ONE + max_ratio
    }
}

pub fn sign(q: &Rational) -> i32 {
    if *q == Rational::ZERO {
        0
    } else if *q < Rational::ZERO {
        -1
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    fn poly(coeffs: &[i64]) -> RationalPolynomial {
        RationalPolynomial::from_coeffs(coeffs.iter().map(|n| r(*n)).collect())
    }

    #[test]
    fn canonicalizes_trailing_zeros() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), Some(1));
    }

    #[test]
    fn derivative_of_cubic() {
        // x^3 -> 3x^2
        let p = poly(&[0, 0, 0, 1]);
        assert_eq!(p.derivative(), poly(&[0, 0, 3]));
    }

    #[test]
    fn div_rem_matches_multiplication() {
        let a = poly(&[-1, 0, 1]); // x^2 - 1
        let b = poly(&[-1, 1]); // x - 1
        let (q, r) = a.div_rem(&b);
        assert_eq!(r, RationalPolynomial::zero());
        assert_eq!(q.add(&RationalPolynomial::zero()).mul(&b), a);
    }

    #[test]
    fn gcd_of_coprime_polys_is_constant() {
        let a = poly(&[-1, 0, 1]); // x^2 - 1 = (x-1)(x+1)
        let b = poly(&[-2, 0, 1]); // x^2 - 2, irrational roots
        let g = RationalPolynomial::gcd(&a, &b);
        assert_eq!(g.degree(), Some(0));
    }

    #[test]
    fn square_free_part_removes_repeated_roots() {
        // (x-1)^2 * (x+1) = x^3 - x^2 - x + 1
        let p = poly(&[1, -1, -1, 1]);
        assert!(!p.is_square_free());
        let sf = p.square_free_part();
        assert!(sf.is_square_free());
        assert_eq!(sf.degree(), Some(2));
    }

    #[test]
    fn sturm_counts_roots_of_quintic() {
        // (x-3)(x-5)(x-7)(x-11)(x-13)
        let p = poly(&[-15015, 12673, -3954, 574, -39, 1]);
        assert!(p.is_square_free());
        assert_eq!(p.sturm_root_count(&r(0), &r(20)), 5);
        assert_eq!(p.sturm_root_count(&r(0), &r(6)), 2);
    }

    #[test]
    fn resultant_of_shared_root_polys_is_zero() {
        let a = poly(&[-1, 0, 1]); // x^2 - 1
        let b = poly(&[-1, 1]); // x - 1
        assert_eq!(RationalPolynomial::resultant(&a, &b), Rational::ZERO);
    }

    #[test]
    fn cauchy_bound_contains_integer_roots() {
        let p = poly(&[-15015, 12673, -3954, 574, -39, 1]);
        let b = p.cauchy_bound();
        assert!(b > r(13));
    }
}
