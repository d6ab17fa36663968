use strata_model::ModelError;

/// Failure of a whole comparison, distinct from "no difference found"
/// (`Ok(None)`). Recoverable per-element model failures never surface here;
/// they are logged and the enclosing visitation continues.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Both component handles were absent — a caller precondition violation.
    #[error("both components are absent")]
    MissingInput,

    /// The caller's cancellation flag was set between type iterations.
    #[error("comparison cancelled")]
    Cancelled,

    /// Underlying model data could not be read or resolved.
    #[error(transparent)]
    Model(#[from] ModelError),
}
