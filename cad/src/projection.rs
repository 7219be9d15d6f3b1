//! McCallum/Collins projection (§4.F): given a set of polynomials over an
//! ordered variable list, build the elimination vector `ES[0..n-1]` that
//! `CADLifting` walks bottom-up.
//!
//! `ES[k]` (0-indexed) holds polynomials over `x_0..x_k` with main variable
//! `x_k`, matching spec.md's 1-indexed `ES[k]` over `(x_1,…,x_{k+1})` with
//! main variable `x_{k+1}`.

use ratcad_rings::MultivariatePoly;

/// `ES[0..nvars-1]`: one elimination level per variable, built top-down from
/// the input set `polys` (all over the full `nvars`-variable space).
pub fn project(polys: &[MultivariatePoly], nvars: usize) -> Vec<Vec<MultivariatePoly>> {
    let mut es: Vec<Vec<MultivariatePoly>> = vec![Vec::new(); nvars];
    es[nvars - 1] = base_level(polys, nvars);
    for k in (1..nvars).rev() {
        let level = es[k].clone();
        es[k - 1] = project_level(&level, k);
    }
    es
}

/// `ES[n-1]`: square-free parts of the primitive parts of the input set,
/// zero and unit polynomials dropped, duplicates collapsed.
fn base_level(polys: &[MultivariatePoly], nvars: usize) -> Vec<MultivariatePoly> {
    let mut out = Vec::new();
    for p in polys {
        push_reduced(&mut out, p.clone(), nvars - 1);
    }
    out
}

/// `ES[k-1]` from `ES[k]`: leading coefficient and discriminant of every
/// member in `x_k`, plus the nonzero principal subresultant coefficients
/// (with reducta, per §9's resolved Open Question on Algorithm 11.1) of
/// every distinct pair, in `x_k`.
fn project_level(set: &[MultivariatePoly], idx: usize) -> Vec<MultivariatePoly> {
    let new_main = idx - 1;
    let mut out = Vec::new();
    for p in set {
        push_reduced(&mut out, p.leading_coeff_in(idx), new_main);
        push_reduced(&mut out, p.discriminant_in(idx), new_main);
    }
    for i in 0..set.len() {
        for j in (i + 1)..set.len() {
            for c in
                MultivariatePoly::principal_subresultant_coefficients_with_reducta(&set[i], &set[j], idx)
            {
                push_reduced(&mut out, c, new_main);
            }
        }
    }
    out
}

/// Reduce `p` to primitive square-free form in `main_idx` and fold it into
/// `out`, dropping it if it collapses to zero or a constant (§4.F: "Zero and
/// unit polynomials are dropped") and skipping it if an equal member (by
/// value, post-normalization) is already present.
fn push_reduced(out: &mut Vec<MultivariatePoly>, p: MultivariatePoly, main_idx: usize) {
    if p.is_zero() {
        return;
    }
    let reduced = p.primitive().square_free_in(main_idx).normalize_sign();
    if reduced.is_zero() || reduced.is_constant() {
        return;
    }
    if !out.contains(&reduced) {
        out.push(reduced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratcad_nzq::Rational;
    use ratcad_rings::RationalPolynomial;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn single_variable_projection_is_just_the_base_level() {
        let nvars = 1;
        let p = MultivariatePoly::from_univariate_in(
            nvars,
            0,
            &RationalPolynomial::from_coeffs(vec![r(-1), r(0), r(1)]),
        );
        let es = project(&[p], nvars);
        assert_eq!(es.len(), 1);
        assert_eq!(es[0].len(), 1);
    }

    #[test]
    fn two_variable_projection_produces_a_nonempty_base_level() {
        // p1 = x^2 + y^2 - 1 (unit circle), over (x, y), main variable y.
        let nvars = 2;
        let mut p1 = MultivariatePoly::monomial(nvars, vec![2, 0], r(1));
        p1 = p1.add(&MultivariatePoly::monomial(nvars, vec![0, 2], r(1)));
        p1 = p1.add(&MultivariatePoly::constant(nvars, r(-1)));
        let es = project(&[p1], nvars);
        assert_eq!(es.len(), 2);
        assert!(!es[1].is_empty());
        // Projecting the circle onto x should surface x^2 - 1 (up to a
        // square-free/primitive normalization) from the discriminant in y.
        assert!(!es[0].is_empty());
    }

    #[test]
    fn example_cad_1_polynomials_project_into_a_two_level_elimination_set() {
        // p1, p2 from example_CAD_1.cpp / spec.md scenario 3, variables (x, y).
        let nvars = 2;
        // p1 = 144y^2 + 96x^2y + 9x^4 + 105x^2 + 70x - 98
        let mut p1 = MultivariatePoly::monomial(nvars, vec![0, 2], r(144));
        p1 = p1.add(&MultivariatePoly::monomial(nvars, vec![2, 1], r(96)));
        p1 = p1.add(&MultivariatePoly::monomial(nvars, vec![4, 0], r(9)));
        p1 = p1.add(&MultivariatePoly::monomial(nvars, vec![2, 0], r(105)));
        p1 = p1.add(&MultivariatePoly::monomial(nvars, vec![1, 0], r(70)));
        p1 = p1.add(&MultivariatePoly::constant(nvars, r(-98)));
        // p2 = x*y^2 + 6xy + x^3 + 9x
        let mut p2 = MultivariatePoly::monomial(nvars, vec![1, 2], r(1));
        p2 = p2.add(&MultivariatePoly::monomial(nvars, vec![1, 1], r(6)));
        p2 = p2.add(&MultivariatePoly::monomial(nvars, vec![3, 0], r(1)));
        p2 = p2.add(&MultivariatePoly::monomial(nvars, vec![1, 0], r(9)));

        let es = project(&[p1, p2], nvars);
        assert_eq!(es.len(), 2);
        assert!(!es[1].is_empty());
        assert!(!es[0].is_empty());
    }
}
