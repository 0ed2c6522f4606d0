/// Broad classification of an [`RbgError`] (NIST SP 800-90A §9 error handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Out-of-range strength or length argument supplied by the caller.
    Configuration,
    /// The caller asked for a capability the instance was not provisioned with.
    Capability,
    /// The entropy source could not satisfy the request.
    EntropyUnavailable,
    /// The mechanism hit its reseed interval; resolved by the envelope.
    MechanismExhaustion,
    /// A known-answer self test failed.
    SelfTest,
}

/// Random bit generator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RbgError {
    // Configuration errors
    #[error("requested security strength {requested} not supported (max {max})")]
    InvalidStrength { requested: u32, max: u32 },
    #[error("personalization string too long: {got} bits, max {max}")]
    PersonalizationTooLong { got: usize, max: usize },
    #[error("additional input too long: {got} bits, max {max}")]
    AdditionalInputTooLong { got: usize, max: usize },
    #[error("too many bits requested: {got}, max {max}")]
    RequestTooLarge { got: usize, max: usize },
    #[error("security strength {requested} exceeds instantiated strength {instantiated}")]
    StrengthTooHigh { requested: u32, instantiated: u32 },
    #[error("drbg: not instantiated")]
    NotInstantiated,
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    // Capability errors
    #[error("drbg: not instantiated for prediction resistance")]
    ResistanceUnavailable,

    // Entropy errors
    #[error("impossible length of entropy input requested: min {min_len} bits, max {max_len} bits")]
    ImpossibleLengthRequested { min_len: usize, max_len: usize },
    #[error("entropy: only {assessed} of {requested} bits assessed after {batches} batches")]
    InsufficientEntropy {
        requested: usize,
        assessed: usize,
        batches: usize,
    },
    #[error("entropy: repetition count test failed")]
    EntropyRctFailure,
    #[error("entropy: adaptive proportion test failed")]
    EntropyAptFailure,

    // Mechanism errors
    /// Member of [`ErrorKind::MechanismExhaustion`]. Never returned: a
    /// mechanism signals an exhausted interval through its generate result
    /// and the DRBG envelope reseeds instead of failing.
    #[error("drbg: reseed required")]
    ReseedRequired,

    // Self-test errors
    #[error("known answer test failed: {0}")]
    KatFailure(String),
}

impl RbgError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidStrength { .. }
            | Self::PersonalizationTooLong { .. }
            | Self::AdditionalInputTooLong { .. }
            | Self::RequestTooLarge { .. }
            | Self::StrengthTooHigh { .. }
            | Self::NotInstantiated
            | Self::BufferTooSmall { .. } => ErrorKind::Configuration,
            Self::ResistanceUnavailable => ErrorKind::Capability,
            Self::ImpossibleLengthRequested { .. }
            | Self::InsufficientEntropy { .. }
            | Self::EntropyRctFailure
            | Self::EntropyAptFailure => ErrorKind::EntropyUnavailable,
            Self::ReseedRequired => ErrorKind::MechanismExhaustion,
            Self::KatFailure(_) => ErrorKind::SelfTest,
        }
    }
}
