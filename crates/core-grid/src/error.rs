use thiserror::Error;

/// Fatal error kinds surfaced by the core data model, loader, transport and solver.
///
/// None of these are recovered from internally (§7): every variant terminates the
/// step or the load that produced it, and the caller is expected to report the
/// message and unwind the cohort.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cannot open input file: {path}")]
    InputMissing { path: String },

    #[error("malformed input in {source}: {reason}")]
    InputMalformed { source: String, reason: String },

    #[error("allocation failed for {what}")]
    AllocationFailure { what: String },

    #[error("transport failure: {reason}")]
    TransportFailure { reason: String },

    #[error("invariant violated: {reason}")]
    InvariantViolation { reason: String },
}
