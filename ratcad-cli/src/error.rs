use thiserror::Error;

/// Errors surfaced by the batch driver, mapped onto the exit codes of §6:
/// `MalformedInput` -> 1, `Cancelled` -> 2, `InvariantViolation` -> 3.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("cancelled")]
    Cancelled,

    #[error("internal invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<ratcad_cad::CadError> for CliError {
    fn from(e: ratcad_cad::CadError) -> Self {
        match e {
            ratcad_cad::CadError::MalformedInput(m) => CliError::MalformedInput(m),
            ratcad_cad::CadError::InvariantViolation(m) => CliError::InvariantViolation(m),
            ratcad_cad::CadError::Cancelled => CliError::Cancelled,
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MalformedInput(_) => 1,
            CliError::Cancelled => 2,
            CliError::InvariantViolation(_) => 3,
        }
    }
}
