use ratcad_rings::RingsError;
use thiserror::Error;

/// Errors from the CAD engine layer, per §7. `InvariantViolation` is fatal
/// (the engine's internal state is no longer trusted); `MalformedInput` and
/// `Cancelled` leave the sample tree in a recoverable, resumable state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CadError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("cancelled")]
    Cancelled,
}

pub type CadResult<T> = Result<T, CadError>;

impl From<RingsError> for CadError {
    fn from(e: RingsError) -> Self {
        match e {
            RingsError::MalformedInput(m) => CadError::MalformedInput(m),
            RingsError::InvariantViolation(m) => CadError::InvariantViolation(m),
            RingsError::Cancelled => CadError::Cancelled,
        }
    }
}
