//! Error type shared by every stage of the triad pipeline.

/// Errors raised by the sieve, streaming and certification stages.
///
/// Input problems are reported before any sieve work starts.
/// `InvariantViolation` is the only variant that can surface mid-stream and
/// it always ends the pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriadError {
    #[error("range bound must be non-negative, got N = {0}")]
    NegativeRange(i64),

    #[error("range bound N = {0} does not fit the sieve table index type")]
    RangeTooLarge(u64),

    #[error("index {n_ref} exceeds the constructed range [1..{max_n}]")]
    ReferenceOutOfRange { n_ref: u64, max_n: u64 },

    #[error("sample index must be at least 1, got {0}")]
    InvalidSample(u64),

    #[error("reference index N_ref = {0} is below 3, where every tail bound is finite")]
    ReferenceTooSmall(u64),

    #[error("Omega tail constant D must be finite and non-negative, got {0}")]
    InvalidTailConstant(f64),

    #[error("phi table has {phi} entries but pi table has {pi}")]
    TableLengthMismatch { phi: usize, pi: usize },

    #[error(
        "sieve invariant violated at i = {index}: phi(i) + pi(i) = {phi} + {pi} is not positive"
    )]
    InvariantViolation { index: u64, phi: u32, pi: u32 },
}

pub type Result<T> = std::result::Result<T, TriadError>;
