use thiserror::Error;

/// Errors raised by the real-algebraic-number and polynomial kernel.
///
/// `InvariantViolation` is reserved for inputs that break a documented
/// precondition of the data model (a non-square-free defining polynomial, an
/// interval that fails to isolate, ...); callers one level up (the CAD
/// engine) treat it as fatal rather than recoverable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RingsError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Cooperative cancellation observed during root isolation or interval
    /// refinement (§5: the cancellation token is polled at each refinement
    /// step inside 4.C/4.D, not only between CAD sample-tree nodes).
    #[error("cancelled")]
    Cancelled,
}

pub type RingsResult<T> = Result<T, RingsError>;
