//! Pruning configuration (§4.F/§6): named booleans plus the isolation
//! strategy enum, replacing the teacher's OR-able `CADSettings` bitflag
//! presets (`LOWDEG_CADSETTING`, `GROEBNER_CADSETTING`,
//! `REALROOTCOUNT_CADSETTING`) with a flat record validated at construction.
//! None of these flags change soundness or completeness, only DFS search
//! order and preprocessing (§4.F: "No setting changes soundness; only
//! search order").

use crate::error::CadResult;

/// Which root-isolation tactic `CADLifting` asks `ratcad-rings` for at each
/// level. The spec names both variants in its Settings grammar but leaves
/// `Simple`'s semantics unspecified; since `ratcad-rings::root_isolator`
/// implements exactly one correct isolation algorithm (Sturm-sequence
/// bisection, §4.D), both variants currently dispatch to it. The field is
/// kept, not collapsed away, so the public API and serialized settings match
/// §6 exactly and so a second, cruder tactic (e.g. skip Sturm refinement
/// below some degree) can be slotted in behind `Simple` later without an API
/// break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationStrategy {
    #[default]
    Default,
    Simple,
}

/// CAD search configuration. Every flag defaults to `false`/`Default`,
/// matching §6 exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefer sample points strictly between roots over root points
    /// themselves when lifting (affects lifting only; projection is
    /// unaffected).
    pub prefer_nonroot_samples: bool,
    /// Process elimination polynomials of lower degree first at lift time.
    pub lowdeg_first: bool,
    /// Replace equality-constraint polynomials by a reduced Groebner basis
    /// (over the sub-ideal they generate, per §9's resolved Open Question)
    /// before projection.
    pub groebner_preprocess: bool,
    /// If a polynomial has zero real roots under the current partial
    /// sample, skip isolating it rather than running full bisection.
    pub realrootcount_heuristic: bool,
    pub isolation_strategy: IsolationStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefer_nonroot_samples: false,
            lowdeg_first: false,
            groebner_preprocess: false,
            realrootcount_heuristic: false,
            isolation_strategy: IsolationStrategy::Default,
        }
    }
}

impl Settings {
    /// Reject mutually exclusive flag combinations. Currently none of the
    /// four pruning booleans conflict with each other or with
    /// `isolation_strategy`; `groebner_preprocess`'s narrower precondition
    /// (at least one equality constraint) can only be checked once the
    /// constraint set is known, so it is validated in
    /// [`crate::engine::Cad::check`] instead of here (see §9's Open Question
    /// resolution in the design ledger).
    pub fn validate(&self) -> CadResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_disable_every_pruning_flag() {
        let s = Settings::default();
        assert!(!s.prefer_nonroot_samples);
        assert!(!s.lowdeg_first);
        assert!(!s.groebner_preprocess);
        assert!(!s.realrootcount_heuristic);
        assert_eq!(s.isolation_strategy, IsolationStrategy::Default);
    }

    #[test]
    fn default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }
}
