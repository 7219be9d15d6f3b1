//! Groebner basis reduction, treated per §1/§4.F as an abstract ideal-basis
//! provider: CAD's `groebner_preprocess` setting consumes it to replace
//! equality-constrained polynomials with a reduced basis before projection,
//! and it is usable standalone. Buchberger's algorithm over the graded-lex
//! order [`MultivariatePoly`] already uses for [`MultivariatePoly::try_exact_div`].

use ratcad_nzq::Rational;

use crate::multivariate::{Exponents, MultivariatePoly};

/// An abstract provider of a reduced basis for the ideal generated by a set
/// of polynomials. CAD depends only on this trait, not on a specific
/// Groebner-basis algorithm.
pub trait IdealBasisProvider {
    fn reduce(&self, polys: &[MultivariatePoly]) -> Vec<MultivariatePoly>;
}

/// Buchberger's algorithm with S-polynomial reduction and minimalization,
/// under the same graded-lex order [`MultivariatePoly`] uses for division.
#[derive(Debug, Clone, Default)]
pub struct BuchbergerProvider;

impl IdealBasisProvider for BuchbergerProvider {
    fn reduce(&self, polys: &[MultivariatePoly]) -> Vec<MultivariatePoly> {
        let mut basis: Vec<MultivariatePoly> =
            polys.iter().filter(|p| !p.is_zero()).cloned().collect();
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for i in 0..basis.len() {
            for j in (i + 1)..basis.len() {
                pairs.push((i, j));
            }
        }
        while let Some((i, j)) = pairs.pop() {
            let s = s_polynomial(&basis[i], &basis[j]);
            let r = s.reduce_by(&basis);
            if !r.is_zero() {
                let new_idx = basis.len();
                for k in 0..new_idx {
                    pairs.push((k, new_idx));
                }
                basis.push(r);
            }
        }
        minimal_basis(basis)
    }
}

/// `lcm(lt(f), lt(g))/lt(f) * f - lcm(lt(f), lt(g))/lt(g) * g`: the
/// S-polynomial whose reduction to zero (for every pair) characterizes a
/// Groebner basis (Buchberger's criterion).
fn s_polynomial(f: &MultivariatePoly, g: &MultivariatePoly) -> MultivariatePoly {
    let (fe, fc) = f.leading_monomial().expect("nonzero generator");
    let (ge, gc) = g.leading_monomial().expect("nonzero generator");
    let lcm_exp: Exponents = fe.iter().zip(&ge).map(|(a, b)| (*a).max(*b)).collect();
    let nvars = f.nvars();
    let f_factor_exp: Exponents = lcm_exp.iter().zip(&fe).map(|(l, a)| l - a).collect();
    let g_factor_exp: Exponents = lcm_exp.iter().zip(&ge).map(|(l, a)| l - a).collect();
    let f_term = MultivariatePoly::monomial(nvars, f_factor_exp, Rational::ONE / fc);
    let g_term = MultivariatePoly::monomial(nvars, g_factor_exp, Rational::ONE / gc);
    f_term.mul(f).sub(&g_term.mul(g))
}

/// Drop any generator whose leading monomial is divisible by a distinct
/// generator's leading monomial — the usual minimalization pass after
/// Buchberger's main loop.
fn minimal_basis(basis: Vec<MultivariatePoly>) -> Vec<MultivariatePoly> {
    let leading: Vec<Exponents> = basis
        .iter()
        .map(|p| p.leading_monomial().expect("nonzero generator").0)
        .collect();
    let mut keep = vec![true; basis.len()];
    for i in 0..basis.len() {
        if !keep[i] {
            continue;
        }
        for j in 0..basis.len() {
            if i == j || !keep[j] || leading[i] == leading[j] {
                continue;
            }
            if divides_monomial(&leading[i], &leading[j]) {
                keep[j] = false;
            }
        }
    }
    basis
        .into_iter()
        .zip(keep)
        .filter(|(_, k)| *k)
        .map(|(p, _)| p)
        .collect()
}

fn divides_monomial(a: &[u32], b: &[u32]) -> bool {
    a.iter().zip(b).all(|(x, y)| x <= y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratcad_nzq::Rational;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn basis_of_a_single_generator_is_itself() {
        let nvars = 2;
        let p = MultivariatePoly::monomial(nvars, vec![1, 0], r(1))
            .add(&MultivariatePoly::monomial(nvars, vec![0, 1], r(1)));
        let basis = BuchbergerProvider.reduce(&[p.clone()]);
        assert_eq!(basis.len(), 1);
        assert!(basis[0].reduce_by(&[p]).is_zero());
    }

    #[test]
    fn every_generator_reduces_to_zero_against_its_own_basis() {
        let nvars = 2;
        // x - y^2, x*y - 1: a classic small non-trivial example.
        let f1 = MultivariatePoly::monomial(nvars, vec![1, 0], r(1))
            .sub(&MultivariatePoly::monomial(nvars, vec![0, 2], r(1)));
        let f2 = MultivariatePoly::monomial(nvars, vec![1, 1], r(1))
            .sub(&MultivariatePoly::monomial(nvars, vec![0, 0], r(1)));
        let basis = BuchbergerProvider.reduce(&[f1.clone(), f2.clone()]);
        assert!(f1.reduce_by(&basis).is_zero());
        assert!(f2.reduce_by(&basis).is_zero());
    }
}
