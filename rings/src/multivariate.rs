//! Multivariate polynomials over an ordered variable list, represented as a
//! sparse map from exponent vectors to rational coefficients (design note
//! 4.E, alternative (b)): the "view as univariate in `x_k` with polynomial
//! coefficients" that CAD projection and lifting need is produced on demand
//! by grouping terms by one variable's exponent, rather than maintained as a
//! permanently nested tree — which would make "temporarily treat a lower
//! variable as main" an awkward transpose instead of a simple regroup.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use ratcad_nzq::{Integer, Natural, Rational};

use crate::polynomial::{self, RationalPolynomial};
use crate::ran::RealAlgebraicNumber;

pub type Exponents = Vec<u32>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultivariatePoly {
    nvars: usize,
    terms: BTreeMap<Exponents, Rational>,
}

impl fmt::Display for MultivariatePoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut entries: Vec<_> = self.terms.iter().collect();
        entries.sort_by(|a, b| monomial_cmp(a.0, b.0).reverse());
        let rendered = entries
            .iter()
            .map(|(exp, coeff)| {
                let vars = exp
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| **e > 0)
                    .map(|(i, e)| {
                        if *e == 1 {
                            format!("x{}", i + 1)
                        } else {
                            format!("x{}^{}", i + 1, e)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("*");
                if vars.is_empty() {
                    format!("{coeff}")
                } else {
                    format!("{coeff}*{vars}")
                }
            })
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{rendered}")
    }
}

/// Graded-lexicographic order: higher total degree wins; ties broken by
/// comparing exponents variable by variable. Multiplicative (the leading
/// monomial of a product is the product of the leading monomials), which is
/// what makes the greedy division in [`MultivariatePoly::try_exact_div`] correct.
fn monomial_cmp(a: &[u32], b: &[u32]) -> Ordering {
    let da: u32 = a.iter().sum();
    let db: u32 = b.iter().sum();
    da.cmp(&db).then_with(|| a.cmp(b))
}

impl MultivariatePoly {
    pub fn zero(nvars: usize) -> Self {
        Self {
            nvars,
            terms: BTreeMap::new(),
        }
    }

    pub fn constant(nvars: usize, c: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if c != Rational::ZERO {
            terms.insert(vec![0; nvars], c);
        }
        Self { nvars, terms }
    }

    pub fn variable(nvars: usize, idx: usize) -> Self {
        let mut exp = vec![0; nvars];
        exp[idx] = 1;
        let mut terms = BTreeMap::new();
        terms.insert(exp, Rational::ONE);
        Self { nvars, terms }
    }

    pub fn monomial(nvars: usize, exp: Exponents, coeff: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if coeff != Rational::ZERO {
            terms.insert(exp, coeff);
        }
        Self { nvars, terms }
    }

    /// Lift a univariate [`RationalPolynomial`] in variable `idx` into the
    /// `nvars`-variable space.
    pub fn from_univariate_in(nvars: usize, idx: usize, p: &RationalPolynomial) -> Self {
        let mut terms = BTreeMap::new();
        for (power, c) in p.coeffs().iter().enumerate() {
            if *c == Rational::ZERO {
                continue;
            }
            let mut exp = vec![0; nvars];
            exp[idx] = power as u32;
            terms.insert(exp, c.clone());
        }
        Self { nvars, terms }
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn depends_on(&self, idx: usize) -> bool {
        self.terms.keys().any(|exp| exp[idx] > 0)
    }

    pub fn degree_in(&self, idx: usize) -> usize {
        self.terms.keys().map(|exp| exp[idx] as usize).max().unwrap_or(0)
    }

    fn leading_term(&self) -> Option<(Exponents, Rational)> {
        self.terms
            .iter()
            .max_by(|a, b| monomial_cmp(a.0, b.0))
            .map(|(e, c)| (e.clone(), c.clone()))
    }

    /// The leading monomial and its coefficient under the graded-lex order
    /// used throughout this module (public wrapper over [`Self::leading_term`],
    /// needed by [`crate::groebner`]'s S-polynomial and reduction steps).
    pub fn leading_monomial(&self) -> Option<(Exponents, Rational)> {
        self.leading_term()
    }

    /// True iff every term has total degree zero (includes the zero polynomial).
    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(|e| e.iter().all(|p| *p == 0))
    }

    /// Flip sign so the leading coefficient (graded-lex) is positive. Used by
    /// CAD projection to collapse `p` and `-p` into one elimination-set member.
    pub fn normalize_sign(&self) -> Self {
        match self.leading_term() {
            Some((_, c)) if c < Rational::ZERO => self.neg(),
            _ => self.clone(),
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            nvars: self.nvars,
            terms: self.terms.iter().map(|(e, c)| (e.clone(), -c)).collect(),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nvars, other.nvars);
        let mut terms = self.terms.clone();
        for (exp, c) in &other.terms {
            let entry = terms.entry(exp.clone()).or_insert(Rational::ZERO);
            *entry += c;
        }
        terms.retain(|_, c| *c != Rational::ZERO);
        Self {
            nvars: self.nvars,
            terms,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scale(&self, c: &Rational) -> Self {
        if *c == Rational::ZERO {
            return Self::zero(self.nvars);
        }
        Self {
            nvars: self.nvars,
            terms: self.terms.iter().map(|(e, a)| (e.clone(), a * c)).collect(),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nvars, other.nvars);
        let mut terms: BTreeMap<Exponents, Rational> = BTreeMap::new();
        for (ea, ca) in &self.terms {
            for (eb, cb) in &other.terms {
                let exp: Exponents = ea.iter().zip(eb).map(|(x, y)| x + y).collect();
                let entry = terms.entry(exp).or_insert(Rational::ZERO);
                *entry += ca * cb;
            }
        }
        terms.retain(|_, c| *c != Rational::ZERO);
        Self {
            nvars: self.nvars,
            terms,
        }
    }

    pub fn derivative_in(&self, idx: usize) -> Self {
        let mut terms = BTreeMap::new();
        for (exp, c) in &self.terms {
            if exp[idx] == 0 {
                continue;
            }
            let mut new_exp = exp.clone();
            let power = new_exp[idx];
            new_exp[idx] -= 1;
            let new_c = c * &Rational::from(power as u64);
            if new_c != Rational::ZERO {
                terms.insert(new_exp, new_c);
            }
        }
        Self {
            nvars: self.nvars,
            terms,
        }
    }

    /// View this polynomial as univariate in `x_idx`, lowest-degree
    /// coefficient first; each coefficient is itself a `MultivariatePoly`
    /// over the same variable set with `x_idx`'s exponent forced to zero.
    pub fn as_univariate(&self, idx: usize) -> Vec<MultivariatePoly> {
        let deg = self.degree_in(idx);
        let mut coeffs = vec![MultivariatePoly::zero(self.nvars); deg + 1];
        for (exp, c) in &self.terms {
            let power = exp[idx] as usize;
            let mut reduced_exp = exp.clone();
            reduced_exp[idx] = 0;
            let entry = coeffs[power]
                .terms
                .entry(reduced_exp)
                .or_insert(Rational::ZERO);
            *entry += c;
        }
        for c in coeffs.iter_mut() {
            c.terms.retain(|_, v| *v != Rational::ZERO);
        }
        trim_trailing_zero(&mut coeffs);
        coeffs
    }

    pub fn from_univariate(nvars: usize, idx: usize, coeffs: &[MultivariatePoly]) -> Self {
        let mut acc = MultivariatePoly::zero(nvars);
        for (power, c) in coeffs.iter().enumerate() {
            let mut shifted = c.clone();
            for exp in shifted.terms.keys().cloned().collect::<Vec<_>>() {
                let mut new_exp = exp.clone();
                new_exp[idx] += power as u32;
                if let Some(v) = shifted.terms.remove(&exp) {
                    shifted.terms.insert(new_exp, v);
                }
            }
            acc = acc.add(&shifted);
        }
        acc
    }

    pub fn leading_coeff_in(&self, idx: usize) -> MultivariatePoly {
        self.as_univariate(idx)
            .pop()
            .unwrap_or_else(|| MultivariatePoly::zero(self.nvars))
    }

    /// Evaluate at a fully rational point (used to sanity-check a candidate
    /// sample before committing expensive RAN arithmetic, and by the
    /// expression-parser round trip).
    pub fn eval_rational(&self, point: &[Rational]) -> Rational {
        debug_assert_eq!(point.len(), self.nvars);
        let mut acc = Rational::ZERO;
        for (exp, c) in &self.terms {
            let mut term = c.clone();
            for (v, e) in point.iter().zip(exp) {
                for _ in 0..*e {
                    term = term * v;
                }
            }
            acc += term;
        }
        acc
    }

    /// Substitute a rational value for `idx`, dropping that variable's
    /// dependency. Used for candidate sample points drawn as plain
    /// rationals (gaps between roots, per 4.G step 2).
    pub fn substitute_rational(&self, idx: usize, value: &Rational) -> MultivariatePoly {
        let coeffs = self.as_univariate(idx);
        let mut acc = MultivariatePoly::zero(self.nvars);
        let mut pow = Rational::ONE;
        for c in &coeffs {
            acc = acc.add(&c.scale(&pow));
            pow = pow * value;
        }
        acc
    }

    /// Reduce this polynomial modulo the defining polynomial of a real
    /// algebraic number substituted for `idx`, eliminating that variable via
    /// resultant elimination (§4.E / §4.C). The result no longer depends on
    /// `x_idx`.
    pub fn eliminate_with_ran(&self, idx: usize, ran: &RealAlgebraicNumber) -> MultivariatePoly {
        if !self.depends_on(idx) {
            return self.clone();
        }
        let defining = ran.defining_poly();
        let lifted = MultivariatePoly::from_univariate_in(self.nvars, idx, &defining);
        self.resultant_in(idx, &lifted)
    }

    /// Substitute rational algebraic numbers (Numeric RANs) or, more
    /// generally, RANs for every lower variable `0..idx`, yielding a rational
    /// univariate polynomial in `x_idx` — the input CADLifting needs for
    /// root isolation at the next level.
    pub fn substitute_point(&self, idx: usize, point: &[RealAlgebraicNumber]) -> RationalPolynomial {
        debug_assert_eq!(point.len(), idx);
        let mut reduced = self.clone();
        for (lower_idx, ran) in point.iter().enumerate() {
            reduced = reduced.eliminate_with_ran(lower_idx, ran);
        }
        reduced.to_univariate_rational(idx)
    }

    /// Evaluate this polynomial's sign at a full real-algebraic sample point
    /// (one RAN per variable, same order), by eliminating every variable in
    /// turn (§4.E) and reading the sign of the resulting rational constant.
    /// Used by [`crate::MultivariatePoly`]'s constraint-checking callers
    /// (CAD lifting's final-level sign test, §4.G step 4a).
    pub fn sign_at_point(&self, point: &[RealAlgebraicNumber]) -> i32 {
        debug_assert_eq!(point.len(), self.nvars);
        let mut reduced = self.clone();
        for (idx, ran) in point.iter().enumerate() {
            reduced = reduced.eliminate_with_ran(idx, ran);
        }
        debug_assert!(reduced.is_constant());
        reduced
            .terms
            .values()
            .next()
            .map(polynomial::sign)
            .unwrap_or(0)
    }

    pub fn to_univariate_rational(&self, idx: usize) -> RationalPolynomial {
        let coeffs = self.as_univariate(idx);
        let mut out = vec![Rational::ZERO; coeffs.len()];
        for (power, c) in coeffs.iter().enumerate() {
            if c.depends_on_any_other_than(idx) {
                // Any residual dependency on a variable besides idx means
                // elimination left something behind; callers only invoke
                // this once every lower variable has been eliminated.
                debug_assert!(
                    false,
                    "to_univariate_rational called before all lower variables were eliminated"
                );
            }
            out[power] = c.terms.values().next().cloned().unwrap_or(Rational::ZERO);
        }
        RationalPolynomial::from_coeffs(out)
    }

    fn depends_on_any_other_than(&self, idx: usize) -> bool {
        self.terms
            .keys()
            .any(|exp| exp.iter().enumerate().any(|(i, e)| i != idx && *e > 0))
    }

    /// Resultant of `self` and `other` eliminating `x_idx`, via a pseudo-
    /// remainder sequence over the coefficient ring of polynomials in the
    /// remaining variables. The coefficient ring is not a field, so unlike
    /// [`RationalPolynomial::resultant`] this does not track the exact
    /// classical scale factor — the returned polynomial can carry extra
    /// nonvanishing factors relative to the textbook resultant. That is
    /// harmless here: CAD projection only needs the *zero set*, and
    /// CADLifting re-verifies every constraint at the candidate sample
    /// before accepting it, so spurious extra roots are simply rejected
    /// rather than unsound.
    pub fn resultant_in(&self, idx: usize, other: &Self) -> MultivariatePoly {
        let a = self.as_univariate(idx);
        let b = other.as_univariate(idx);
        pseudo_resultant(a, b, self.nvars)
    }

    /// `Res(p, p')` in `x_idx`, standing in for the discriminant per the
    /// same zero-set-only reasoning as [`Self::resultant_in`].
    pub fn discriminant_in(&self, idx: usize) -> MultivariatePoly {
        self.resultant_in(idx, &self.derivative_in(idx))
    }

    /// Square-free part with respect to `x_idx`: `self / gcd(self, d/dx_idx self)`.
    /// Falls back to `self` unchanged if exact division does not succeed
    /// (the gcd computed via pseudo-remainders can itself carry extraneous
    /// factors); this is sound for the same reason as [`Self::resultant_in`].
    pub fn square_free_in(&self, idx: usize) -> MultivariatePoly {
        let deriv = self.derivative_in(idx);
        if deriv.is_zero() {
            return self.clone();
        }
        let g = pseudo_gcd(self.as_univariate(idx), deriv.as_univariate(idx), self.nvars);
        if g.len() <= 1 {
            return self.clone();
        }
        let g_poly = MultivariatePoly::from_univariate(self.nvars, idx, &g);
        self.try_exact_div(&g_poly).unwrap_or_else(|| self.clone())
    }

    /// Clear a common rational factor across every coefficient (a global,
    /// not main-variable-specific, content removal).
    pub fn primitive(&self) -> MultivariatePoly {
        if self.is_zero() {
            return self.clone();
        }
        let denom_lcm = Natural::lcm_list(
            self.terms.values().map(|c| c.denominator()).collect::<Vec<_>>(),
        );
        let mut g = Natural::ZERO;
        for c in self.terms.values() {
            let scaled = (c * &Rational::from(&denom_lcm)).floor();
            let as_natural: Natural = {
                use ratcad_nzq::traits::Abs;
                scaled.abs().try_into().unwrap_or(Natural::ZERO)
            };
            g = g.gcd(&as_natural);
        }
        if g.is_zero() {
            return self.clone();
        }
        let factor = Rational::from_integers(Integer::from(g), Integer::from(denom_lcm));
        self.scale(&(Rational::ONE / factor))
    }

    /// Exact division by a single divisor via greedy leading-monomial
    /// cancellation under the graded-lex order. Correct whenever a divisor
    /// truly divides the dividend exactly (the leading monomial of a
    /// product equals the product of the leading monomials under a
    /// multiplicative order), which is the only case this is ever invoked for.
    pub fn try_exact_div(&self, divisor: &MultivariatePoly) -> Option<MultivariatePoly> {
        let (d_exp, d_coeff) = divisor.leading_term()?;
        let mut remainder = self.clone();
        let mut quotient = MultivariatePoly::zero(self.nvars);
        while !remainder.is_zero() {
            let (r_exp, r_coeff) = remainder.leading_term().unwrap();
            if !dominates(&r_exp, &d_exp) {
                return None;
            }
            let factor_exp: Exponents = r_exp.iter().zip(&d_exp).map(|(a, b)| a - b).collect();
            let factor_coeff = &r_coeff / &d_coeff;
            let term = MultivariatePoly::monomial(self.nvars, factor_exp, factor_coeff);
            quotient = quotient.add(&term);
            remainder = remainder.sub(&term.mul(divisor));
        }
        Some(quotient)
    }

    pub fn sign_at_rational(&self, point: &[Rational]) -> i32 {
        polynomial::sign(&self.eval_rational(point))
    }

    /// Multivariate division with remainder against several divisors, in the
    /// style of the standard Groebner-basis reduction algorithm
    /// (Cox-Little-O'Shea): repeatedly cancel the dividend's leading
    /// monomial against whichever divisor's leading monomial divides it;
    /// terms that no divisor's leading monomial divides are moved into the
    /// remainder. Order-independent in outcome only up to the fixed
    /// graded-lex order this module uses throughout.
    pub fn reduce_by(&self, generators: &[MultivariatePoly]) -> MultivariatePoly {
        let mut remainder = MultivariatePoly::zero(self.nvars);
        let mut p = self.clone();
        'outer: while !p.is_zero() {
            let (lexp, lcoeff) = p.leading_term().unwrap();
            for g in generators {
                if g.is_zero() {
                    continue;
                }
                let (gexp, gcoeff) = g.leading_term().unwrap();
                if dominates(&lexp, &gexp) {
                    let factor_exp: Exponents =
                        lexp.iter().zip(&gexp).map(|(a, b)| a - b).collect();
                    let factor_coeff = &lcoeff / &gcoeff;
                    let term = MultivariatePoly::monomial(self.nvars, factor_exp, factor_coeff);
                    p = p.sub(&term.mul(g));
                    continue 'outer;
                }
            }
            let lt = MultivariatePoly::monomial(self.nvars, lexp, lcoeff);
            remainder = remainder.add(&lt);
            p = p.sub(&lt);
        }
        remainder
    }

    /// Leading coefficients, and (per the retained-reducta resolution of the
    /// textbook-Algorithm-11.1 gap noted in the design doc) every other
    /// nonzero coefficient, of each polynomial in the pseudo-remainder
    /// sequence of `a` and `b` viewed as univariate in `x_idx`. Feeds
    /// CAD projection's elimination-set construction.
    pub fn principal_subresultant_coefficients_with_reducta(
        a: &Self,
        b: &Self,
        idx: usize,
    ) -> Vec<MultivariatePoly> {
        let nvars = a.nvars;
        let mut out = Vec::new();
        if a.is_zero() || b.is_zero() {
            return out;
        }
        let (mut p, mut q) = if a.degree_in(idx) >= b.degree_in(idx) {
            (a.as_univariate(idx), b.as_univariate(idx))
        } else {
            (b.as_univariate(idx), a.as_univariate(idx))
        };
        loop {
            trim_trailing_zero(&mut q);
            if q.is_empty() {
                break;
            }
            for c in q.iter() {
                if !c.is_zero() {
                    out.push(c.clone());
                }
            }
            let (_, mut r) = pseudo_div_rem(&p, &q, nvars);
            trim_trailing_zero(&mut r);
            p = q;
            q = r;
        }
        out
    }
}

fn dominates(a: &[u32], b: &[u32]) -> bool {
    a.iter().zip(b).all(|(x, y)| x >= y)
}

fn trim_trailing_zero(v: &mut Vec<MultivariatePoly>) {
    while matches!(v.last(), Some(c) if c.is_zero()) {
        v.pop();
    }
}

/// Pseudo-division of `a` by `b` (coefficient lists low-to-high degree, `b`
/// nonzero): `lc(b)^k * a = q*b + r` for some `k`, computed with only ring
/// multiplications and subtractions (no division ever required).
fn pseudo_div_rem(
    a: &[MultivariatePoly],
    b: &[MultivariatePoly],
    nvars: usize,
) -> (Vec<MultivariatePoly>, Vec<MultivariatePoly>) {
    let mut rem = a.to_vec();
    trim_trailing_zero(&mut rem);
    let db = b.len() - 1;
    let lc_b = b[db].clone();
    let mut quotient: Vec<MultivariatePoly> = vec![];
    loop {
        trim_trailing_zero(&mut rem);
        if rem.is_empty() || rem.len() - 1 < db {
            break;
        }
        let dr = rem.len() - 1;
        let shift = dr - db;
        let c = rem[dr].clone();
        for coeff in rem.iter_mut() {
            *coeff = coeff.mul(&lc_b);
        }
        for (j, bj) in b.iter().enumerate() {
            rem[shift + j] = rem[shift + j].sub(&c.mul(bj));
        }
        for coeff in quotient.iter_mut() {
            *coeff = coeff.mul(&lc_b);
        }
        if quotient.len() <= shift {
            quotient.resize(shift + 1, MultivariatePoly::zero(nvars));
        }
        quotient[shift] = quotient[shift].add(&c);
    }
    (quotient, rem)
}

fn pseudo_resultant(
    a: Vec<MultivariatePoly>,
    b: Vec<MultivariatePoly>,
    nvars: usize,
) -> MultivariatePoly {
    let mut p = a;
    let mut q = b;
    trim_trailing_zero(&mut p);
    trim_trailing_zero(&mut q);
    if p.is_empty() || q.is_empty() {
        return MultivariatePoly::zero(nvars);
    }
    loop {
        if q.len() == 1 {
            let lc_q = q[0].clone();
            let dp = p.len() - 1;
            let mut pow = MultivariatePoly::constant(nvars, Rational::ONE);
            for _ in 0..dp {
                pow = pow.mul(&lc_q);
            }
            return pow;
        }
        let (_, rem) = pseudo_div_rem(&p, &q, nvars);
        let mut rem = rem;
        trim_trailing_zero(&mut rem);
        if rem.is_empty() {
            return MultivariatePoly::zero(nvars);
        }
        p = q;
        q = rem;
    }
}

fn pseudo_gcd(
    a: Vec<MultivariatePoly>,
    b: Vec<MultivariatePoly>,
    nvars: usize,
) -> Vec<MultivariatePoly> {
    let mut p = a;
    let mut q = b;
    trim_trailing_zero(&mut p);
    trim_trailing_zero(&mut q);
    while !q.is_empty() {
        let (_, rem) = pseudo_div_rem(&p, &q, nvars);
        let mut rem = rem;
        trim_trailing_zero(&mut rem);
        p = q;
        q = rem;
    }
    let _ = nvars;
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn eval_matches_hand_computation() {
        // p(x, y) = x^2*y + 3
        let nvars = 2;
        let mut p = MultivariatePoly::zero(nvars);
        p = p.add(&MultivariatePoly::monomial(nvars, vec![2, 1], r(1)));
        p = p.add(&MultivariatePoly::constant(nvars, r(3)));
        assert_eq!(p.eval_rational(&[r(2), r(5)]), r(23)); // 4*5+3
    }

    #[test]
    fn as_univariate_round_trips_through_from_univariate() {
        let nvars = 2;
        let mut p = MultivariatePoly::zero(nvars);
        p = p.add(&MultivariatePoly::monomial(nvars, vec![2, 1], r(1)));
        p = p.add(&MultivariatePoly::monomial(nvars, vec![0, 3], r(-2)));
        let coeffs = p.as_univariate(0);
        let rebuilt = MultivariatePoly::from_univariate(nvars, 0, &coeffs);
        assert_eq!(rebuilt, p);
    }

    #[test]
    fn eliminate_with_ran_drops_the_variable() {
        use crate::root_isolator::real_roots;
        // p(x, y) = x^2 - 2, eliminate x using a root of x^2-2: result must not depend on x.
        let nvars = 2;
        let px = RationalPolynomial::from_coeffs(vec![r(-2), r(0), r(1)]);
        let roots = real_roots(&px).unwrap();
        let p = MultivariatePoly::from_univariate_in(nvars, 0, &px);
        let eliminated = p.eliminate_with_ran(0, &roots[0]);
        assert!(!eliminated.depends_on(0));
    }

    #[test]
    fn try_exact_div_recovers_a_known_factor() {
        let nvars = 1;
        // (x-1)(x+1) / (x-1) = (x+1)
        let a = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-1), r(0), r(1)]),
        );
        let b = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-1), r(1)]),
        );
        let q = a.try_exact_div(&b).unwrap();
        let expected = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(1), r(1)]),
        );
        assert_eq!(q, expected);
    }

    #[test]
    fn reduce_by_cancels_against_a_matching_generator() {
        let nvars = 1;
        // x^2 - 1 reduced by x - 1 is 0.
        let a = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-1), r(0), r(1)]),
        );
        let g = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-1), r(1)]),
        );
        assert!(a.reduce_by(&[g]).is_zero());
    }

    #[test]
    fn normalize_sign_flips_negative_leading_coefficient() {
        let nvars = 1;
        let p = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(1), r(-1)]),
        );
        let normalized = p.normalize_sign();
        assert_eq!(normalized.leading_monomial().unwrap().1, r(1));
    }

    #[test]
    fn subresultant_coefficients_with_reducta_are_nonempty_for_coprime_pair() {
        let nvars = 1;
        let a = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-1), r(0), r(1)]),
        );
        let b = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-2), r(0), r(1)]),
        );
        let coeffs = MultivariatePoly::principal_subresultant_coefficients_with_reducta(&a, &b, 0);
        assert!(!coeffs.is_empty());
    }
}
