//! `ratcad`: re-exports of the `sets`, `nzq`, `rings` and `cad` crates as a
//! single dependency, mirroring the teacher workspace's top-level
//! `algebraeon` facade crate.

pub use ratcad_cad as cad;
pub use ratcad_nzq as nzq;
pub use ratcad_rings as rings;
pub use ratcad_sets as sets;

pub use ratcad_cad::{
    Cad, CancellationToken, CheckOutcome, Constraint, IsolationStrategy, RealAlgebraicPoint,
    Settings, Sign, VariableOrder,
};
pub use ratcad_nzq::{Integer, Natural, Rational};
pub use ratcad_rings::{
    BuchbergerProvider, IdealBasisProvider, Interval, MultivariatePoly, RationalPolynomial,
    RealAlgebraicNumber, RingsError, RingsResult,
};
