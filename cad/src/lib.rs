//! Cylindrical algebraic decomposition over the reals (§4.F/§4.G): McCallum
//! projection plus an incremental, cancellable satisfiability search.

mod cancellation;
mod constraint;
mod engine;
mod error;
mod projection;
mod sample_tree;
mod settings;
mod variable_order;

pub use cancellation::CancellationToken;
pub use constraint::{Constraint, Sign};
pub use engine::{Cad, CheckOutcome, RealAlgebraicPoint};
pub use error::{CadError, CadResult};
pub use projection::project;
pub use settings::{IsolationStrategy, Settings};
pub use variable_order::VariableOrder;
