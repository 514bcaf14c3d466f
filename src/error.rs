use thiserror::Error;

/// Result type used across this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The session secret is shorter than the key size the algorithm requires.
    #[error("insufficient key material: need {required} bytes, have {actual}")]
    InsufficientKeyMaterial {
        /// Key length required by the algorithm.
        required: usize,
        /// Length reported by the secret accessor.
        actual: usize,
    },

    /// Storage for a context, algorithm or handler could not be allocated.
    #[error("resource exhausted")]
    ResourceExhausted,

    /// The outbound buffer has no room for the header, pad marker or trailer.
    #[error("buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes needed to complete the operation.
        required: usize,
        /// Bytes the caller made available.
        available: usize,
    },

    /// An inbound packet ends before a full pad marker and trailer.
    #[error("truncated integrity trailer: need {required} bytes, have {available}")]
    TruncatedTrailer {
        /// Bytes needed after the authenticated payload.
        required: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// The received trailer does not match the recomputed authentication code.
    #[error("integrity check failed")]
    IntegrityMismatch,

    /// No integrity algorithm is registered under the negotiated identifier.
    #[error("unsupported integrity algorithm: {0:#04x}")]
    UnsupportedAlgorithm(u8),

    /// An integrity algorithm is already registered under this identifier.
    #[error("integrity algorithm {0:#04x} already registered")]
    DuplicateAlgorithm(u8),

    /// A command handler is already registered for this pair.
    #[error("handler already registered for netfn {netfn:#04x} cmd {cmd:#04x}")]
    DuplicateHandler {
        /// Network function.
        netfn: u8,
        /// Command number.
        cmd: u8,
    },

    /// Invalid caller-supplied argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Cryptographic primitive rejected its input.
    #[error("crypto error: {0}")]
    Crypto(&'static str),
}

impl Error {
    /// Whether the error means an inbound packet must be discarded.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::IntegrityMismatch | Self::TruncatedTrailer { .. }
        )
    }
}
