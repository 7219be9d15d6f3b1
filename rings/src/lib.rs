//! Exact rational polynomials, real algebraic numbers, and the real-root
//! isolation they are built on: the arithmetic kernel underneath CAD
//! projection and lifting.

pub mod error;
pub mod groebner;
pub mod interval;
pub mod multivariate;
pub mod polynomial;
pub mod ran;
pub mod root_isolator;

pub use error::{RingsError, RingsResult};
pub use groebner::{BuchbergerProvider, IdealBasisProvider};
pub use interval::{Bound, Interval};
pub use multivariate::MultivariatePoly;
pub use polynomial::RationalPolynomial;
pub use ran::RealAlgebraicNumber;
pub use root_isolator::real_roots;
