//! The CAD engine (§4.G and §6): projection plus an incremental DFS lifting
//! search over the sample tree, answering satisfiability queries against a
//! growing constraint set without discarding prior exploration.

use std::cmp::Ordering;

use itertools::Itertools;
use log::{debug, trace};
use ratcad_nzq::Rational;
use ratcad_rings::{MultivariatePoly, RealAlgebraicNumber};

use crate::cancellation::CancellationToken;
use crate::constraint::{Constraint, Sign};
use crate::error::{CadError, CadResult};
use crate::projection::project;
use crate::sample_tree::{NodeState, SampleTree, ROOT};
use crate::settings::Settings;
use crate::variable_order::VariableOrder;

/// A full witness point, one real algebraic number per ordered variable.
pub type RealAlgebraicPoint = Vec<RealAlgebraicNumber>;

/// The result of a satisfiability check (§6): distinct from [`CadError`]
/// because cancellation mid-search is an ordinary outcome of a query, not a
/// malformed request.
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    Sat(RealAlgebraicPoint),
    Unsat,
    Cancelled,
}

enum DfsOutcome {
    Found(RealAlgebraicPoint),
    Exhausted,
    Cancelled,
}

/// A candidate sample at one lifting level: either a root of some
/// elimination polynomial, or a rational point strictly between two
/// consecutive roots (or beyond the outermost one).
struct Candidate {
    ran: RealAlgebraicNumber,
    is_root: bool,
    degree_hint: usize,
}

pub struct Cad {
    variables: VariableOrder,
    constraints: Vec<Constraint>,
    settings: Settings,
    elimination_sets: Vec<Vec<MultivariatePoly>>,
    tree: SampleTree,
    groebner_done: bool,
}

impl Cad {
    pub fn new(variables: VariableOrder, settings: Settings) -> CadResult<Self> {
        settings.validate()?;
        let elimination_sets = vec![Vec::new(); variables.len()];
        Ok(Cad {
            variables,
            constraints: Vec::new(),
            settings,
            elimination_sets,
            tree: SampleTree::new(),
            groebner_done: false,
        })
    }

    pub fn variables(&self) -> &VariableOrder {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn elimination_sets(&self) -> &[Vec<MultivariatePoly>] {
        &self.elimination_sets
    }

    /// Every full-dimensional sample point materialized in the sample tree
    /// so far (§6), regardless of whether it satisfies the current
    /// constraints.
    pub fn samples(&self) -> Vec<RealAlgebraicPoint> {
        self.tree.leaf_points(self.variables.len())
    }

    /// Whether the sample tree's root is `FullyExplored`: every branch has
    /// been visited and found not to satisfy the constraints, so a
    /// completed `check` would report `Unsat` without doing further work
    /// (§6, §4.G's state machine).
    pub fn is_complete(&self) -> bool {
        self.tree.node(ROOT).state == NodeState::FullyExplored
    }

    /// Register a new constraint, recomputing the elimination vector only as
    /// far up as the constraint's polynomial actually changed it, and
    /// invalidating exactly the sample-tree levels whose elimination set
    /// changed (§4.G step 3, §6: "`add_polynomial` followed by `check` is
    /// equivalent to constructing the engine with the enlarged polynomial
    /// set").
    pub fn add_polynomial(&mut self, constraint: Constraint) -> CadResult<()> {
        if constraint.poly().nvars() != self.variables.len() {
            return Err(CadError::MalformedInput(format!(
                "constraint has {} variables, expected {}",
                constraint.poly().nvars(),
                self.variables.len()
            )));
        }
        if self.constraints.iter().any(|c| c == &constraint) {
            return Ok(());
        }
        let old_es = self.elimination_sets.clone();
        self.constraints.push(constraint);
        self.groebner_done = false;
        self.recompute_elimination_sets();
        let affected_level = (0..self.variables.len())
            .find(|&k| old_es.get(k) != self.elimination_sets.get(k));
        if let Some(level) = affected_level {
            debug!("add_polynomial invalidated elimination level {level}");
            self.invalidate_level(level);
        }
        Ok(())
    }

    fn recompute_elimination_sets(&mut self) {
        let nvars = self.variables.len();
        if nvars == 0 {
            self.elimination_sets = Vec::new();
            return;
        }
        let polys: Vec<MultivariatePoly> =
            self.constraints.iter().map(|c| c.poly().clone()).collect();
        self.elimination_sets = project(&polys, nvars);
    }

    /// Walk the arena from `ROOT`, resetting every node whose depth equals
    /// `level` to `Unvisited` (orphaning its subtree) and relaxing its
    /// ancestors so the search revisits that branch.
    fn invalidate_level(&mut self, level: usize) {
        let mut stack = vec![ROOT];
        let mut to_invalidate = Vec::new();
        while let Some(idx) = stack.pop() {
            if self.tree.node(idx).depth == level {
                to_invalidate.push(idx);
                continue;
            }
            stack.extend(self.tree.node(idx).children.iter().copied());
        }
        for idx in to_invalidate {
            self.tree.invalidate(idx);
            self.tree.relax_ancestors(idx);
        }
    }

    fn apply_groebner_preprocess(&mut self) -> CadResult<()> {
        if !self.settings.groebner_preprocess || self.groebner_done {
            return Ok(());
        }
        use ratcad_rings::IdealBasisProvider;
        let generators: Vec<MultivariatePoly> = self
            .constraints
            .iter()
            .filter(|c| c.sign() == Sign::Zero)
            .map(|c| c.poly().clone())
            .collect();
        if generators.is_empty() {
            return Err(CadError::MalformedInput(
                "groebner_preprocess requires at least one equality constraint".to_string(),
            ));
        }
        let basis = ratcad_rings::BuchbergerProvider.reduce(&generators);
        self.constraints.retain(|c| c.sign() != Sign::Zero);
        for p in basis {
            if !p.is_zero() {
                self.constraints.push(Constraint::new(p, Sign::Zero));
            }
        }
        self.groebner_done = true;
        self.recompute_elimination_sets();
        Ok(())
    }

    /// Answer whether the constraint set has a common real solution,
    /// searching the sample tree depth-first and polling `cancel` at every
    /// node expansion (§5).
    pub fn check(&mut self, cancel: &CancellationToken) -> CadResult<CheckOutcome> {
        self.apply_groebner_preprocess()?;
        if self.variables.is_empty() {
            return Ok(CheckOutcome::Unsat);
        }
        let poll = cancel.poll();
        match self.dfs(ROOT, &poll)? {
            DfsOutcome::Found(point) => Ok(CheckOutcome::Sat(point)),
            DfsOutcome::Exhausted => Ok(CheckOutcome::Unsat),
            DfsOutcome::Cancelled => Ok(CheckOutcome::Cancelled),
        }
    }

    fn dfs(&mut self, idx: usize, poll: &impl Fn() -> bool) -> CadResult<DfsOutcome> {
        if poll() {
            return Ok(DfsOutcome::Cancelled);
        }
        if self.tree.node(idx).state == NodeState::FullyExplored {
            return Ok(DfsOutcome::Exhausted);
        }
        let depth = self.tree.node(idx).depth;
        if depth == self.variables.len() {
            let point = self.tree.path_assignment(idx);
            if self.constraints.iter().all(|c| c.is_satisfied_at(&point)) {
                return Ok(DfsOutcome::Found(point));
            }
            self.tree.set_state(idx, NodeState::FullyExplored);
            return Ok(DfsOutcome::Exhausted);
        }
        if !self.tree.node(idx).children_built {
            let point = self.tree.path_assignment(idx);
            let candidates = self.build_candidates(depth, &point, poll)?;
            match candidates {
                None => return Ok(DfsOutcome::Cancelled),
                Some(cands) => {
                    trace!("expanding node at depth {depth} into {} candidates", cands.len());
                    let assignments: Vec<RealAlgebraicNumber> =
                        cands.into_iter().map(|c| c.ran).collect();
                    self.tree.add_children(idx, assignments);
                }
            }
        }
        self.tree.set_state(idx, NodeState::Expanding);
        let children = self.tree.node(idx).children.clone();
        let mut all_exhausted = true;
        for child in children {
            match self.dfs(child, poll)? {
                DfsOutcome::Found(point) => return Ok(DfsOutcome::Found(point)),
                DfsOutcome::Cancelled => return Ok(DfsOutcome::Cancelled),
                DfsOutcome::Exhausted => {}
            }
            if self.tree.node(child).state != NodeState::FullyExplored {
                all_exhausted = false;
            }
        }
        self.tree.set_state(
            idx,
            if all_exhausted {
                NodeState::FullyExplored
            } else {
                NodeState::PartiallyExplored
            },
        );
        Ok(DfsOutcome::Exhausted)
    }

    /// Build the candidate samples for the next coordinate under `point`
    /// (§4.G step 2): isolate the real roots of every elimination
    /// polynomial at `depth` substituted at `point`, merge-dedup the
    /// resulting root set, and interleave rational points strictly between
    /// consecutive roots (and beyond the extremes). Returns `Ok(None)` if
    /// cancelled mid-isolation.
    fn build_candidates(
        &self,
        depth: usize,
        point: &[RealAlgebraicNumber],
        poll: &impl Fn() -> bool,
    ) -> CadResult<Option<Vec<Candidate>>> {
        let mut roots: Vec<(RealAlgebraicNumber, usize)> = Vec::new();
        let mut max_bound = Rational::ZERO;
        for poly in &self.elimination_sets[depth] {
            if poll() {
                return Ok(None);
            }
            let univariate = poly.substitute_point(depth, point);
            if univariate.is_zero() {
                continue;
            }
            let square_free = univariate.square_free_part();
            if self.settings.realrootcount_heuristic {
                let bound = square_free.cauchy_bound();
                if square_free.sturm_root_count(&(-&bound), &bound) == 0 {
                    continue;
                }
            }
            let bound = square_free.cauchy_bound();
            if bound > max_bound {
                max_bound = bound;
            }
            let found = ratcad_rings::root_isolator::real_roots_cancellable(
                &square_free,
                Some(poll as &dyn Fn() -> bool),
            )
            .map_err(CadError::from)?;
            let degree = square_free.degree().unwrap_or(0);
            for root in found {
                roots.push((root, degree));
            }
        }
        roots.sort_by(|a, b| a.0.compare(&b.0));
        dedup_roots(&mut roots);

        let one = Rational::from(1);
        let outer_left = -(&max_bound + &one);
        let outer_right = &max_bound + &one;
        let mut candidates = Vec::with_capacity(roots.len() * 2 + 1);
        if roots.is_empty() {
            candidates.push(Candidate {
                ran: RealAlgebraicNumber::from_rational(Rational::ZERO),
                is_root: false,
                degree_hint: 0,
            });
        } else {
            candidates.push(Candidate {
                ran: RealAlgebraicNumber::from_rational(outer_left),
                is_root: false,
                degree_hint: 0,
            });
            for (i, (root, degree)) in roots.iter().enumerate() {
                candidates.push(Candidate {
                    ran: root.clone(),
                    is_root: true,
                    degree_hint: *degree,
                });
                if i + 1 < roots.len() {
                    let gap = rational_between(root, &roots[i + 1].0);
                    candidates.push(Candidate {
                        ran: RealAlgebraicNumber::from_rational(gap),
                        is_root: false,
                        degree_hint: 0,
                    });
                }
            }
            candidates.push(Candidate {
                ran: RealAlgebraicNumber::from_rational(outer_right),
                is_root: false,
                degree_hint: 0,
            });
        }
        order_candidates(&mut candidates, &self.settings);
        Ok(Some(candidates))
    }
}

/// Drop roots that compare equal to the root already kept before them
/// (distinct elimination polynomials can share roots); `roots` is assumed
/// sorted ascending already, so equal roots are always adjacent.
fn dedup_roots(roots: &mut Vec<(RealAlgebraicNumber, usize)>) {
    *roots = roots
        .drain(..)
        .dedup_by(|(a, _), (b, _)| a.compare(b) == Ordering::Equal)
        .collect();
}

/// A rational strictly between two distinct real algebraic numbers `a < b`,
/// found by refining both until their rational bounds no longer overlap, then
/// taking the midpoint of the gap.
fn rational_between(a: &RealAlgebraicNumber, b: &RealAlgebraicNumber) -> Rational {
    let mut a = a.clone();
    let mut b = b.clone();
    loop {
        let (_, a_hi) = a.bounds();
        let (b_lo, _) = b.bounds();
        if a_hi < b_lo {
            return (&a_hi + &b_lo) / &Rational::from(2);
        }
        a.refine();
        b.refine();
    }
}

fn order_candidates(candidates: &mut [Candidate], settings: &Settings) {
    if settings.prefer_nonroot_samples {
        candidates.sort_by_key(|c| c.is_root);
    }
    if settings.lowdeg_first {
        candidates.sort_by_key(|c| c.degree_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratcad_nzq::Rational;

    fn var(nvars: usize, idx: usize) -> MultivariatePoly {
        MultivariatePoly::variable(nvars, idx)
    }

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn single_variable_sat_finds_a_root() {
        // x^2 - 2 = 0 is satisfiable.
        let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        let nvars = 1;
        let mut p = MultivariatePoly::monomial(nvars, vec![2], r(1));
        p = p.add(&MultivariatePoly::constant(nvars, r(-2)));
        cad.add_polynomial(Constraint::new(p, Sign::Zero)).unwrap();
        let token = CancellationToken::new();
        match cad.check(&token).unwrap() {
            CheckOutcome::Sat(point) => assert_eq!(point.len(), 1),
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    #[test]
    fn single_variable_unsat_over_the_empty_real_solution_set() {
        // x^2 + 1 = 0 has no real solution.
        let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        let nvars = 1;
        let mut p = MultivariatePoly::monomial(nvars, vec![2], r(1));
        p = p.add(&MultivariatePoly::constant(nvars, r(1)));
        cad.add_polynomial(Constraint::new(p, Sign::Zero)).unwrap();
        let token = CancellationToken::new();
        match cad.check(&token).unwrap() {
            CheckOutcome::Unsat => {}
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    #[test]
    fn circle_and_positivity_constraint_is_satisfiable() {
        // x^2 + y^2 - 1 = 0 AND x > 0: the unit circle's right half.
        let vars = VariableOrder::new(vec!["x".to_string(), "y".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        let nvars = 2;
        let mut circle = var(nvars, 0).mul(&var(nvars, 0));
        circle = circle.add(&var(nvars, 1).mul(&var(nvars, 1)));
        circle = circle.add(&MultivariatePoly::constant(nvars, r(-1)));
        cad.add_polynomial(Constraint::new(circle, Sign::Zero))
            .unwrap();
        cad.add_polynomial(Constraint::new(var(nvars, 0), Sign::Positive))
            .unwrap();
        let token = CancellationToken::new();
        match cad.check(&token).unwrap() {
            CheckOutcome::Sat(point) => assert_eq!(point.len(), 2),
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    #[test]
    fn add_polynomial_after_a_sat_query_can_flip_to_unsat() {
        // x = 0 is satisfiable; adding x > 0 on top makes it unsat.
        let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        let nvars = 1;
        cad.add_polynomial(Constraint::new(var(nvars, 0), Sign::Zero))
            .unwrap();
        let token = CancellationToken::new();
        assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Sat(_)));
        cad.add_polynomial(Constraint::new(var(nvars, 0), Sign::Positive))
            .unwrap();
        let token = CancellationToken::new();
        assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Unsat));
    }

    #[test]
    fn cancellation_token_set_before_check_yields_cancelled() {
        let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        cad.add_polynomial(Constraint::new(var(1, 0), Sign::Zero))
            .unwrap();
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Cancelled));
    }

    #[test]
    fn samples_accessor_reports_the_witness_point_after_a_sat_query() {
        let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        cad.add_polynomial(Constraint::new(var(1, 0), Sign::Zero))
            .unwrap();
        let token = CancellationToken::new();
        cad.check(&token).unwrap();
        assert!(!cad.samples().is_empty());
    }

    #[test]
    fn is_complete_is_true_once_an_unsat_query_exhausts_the_tree() {
        // x^2 + 1 = 0 is unsatisfiable, so check() must exhaust the whole tree.
        let vars = VariableOrder::new(vec!["x".to_string()]).unwrap();
        let mut cad = Cad::new(vars, Settings::default()).unwrap();
        let mut p = MultivariatePoly::monomial(1, vec![2], r(1));
        p = p.add(&MultivariatePoly::constant(1, r(1)));
        cad.add_polynomial(Constraint::new(p, Sign::Zero)).unwrap();
        let token = CancellationToken::new();
        assert!(matches!(cad.check(&token).unwrap(), CheckOutcome::Unsat));
        assert!(cad.is_complete());
    }
}
