use crate::crypto::HashChoice;
use crate::error::Error;

pub(crate) fn record_sealed(hash: HashChoice, payload_len: usize) {
    let _ = (hash, payload_len);

    #[cfg(feature = "metrics")]
    metrics::counter!("ipmi_integrity_sealed_total", "hash" => hash.as_str()).increment(1);

    #[cfg(feature = "tracing")]
    tracing::trace!(hash = hash.as_str(), payload_len, "integrity trailer added");
}

pub(crate) fn record_seal_failed(hash: HashChoice, err: &Error) {
    let _ = (hash, err);

    #[cfg(feature = "metrics")]
    metrics::counter!(
        "ipmi_integrity_errors_total",
        "hash" => hash.as_str(),
        "kind" => error_kind(err)
    )
    .increment(1);

    #[cfg(feature = "tracing")]
    tracing::debug!(hash = hash.as_str(), error = %err, "integrity add failed");
}

pub(crate) fn record_verified(hash: HashChoice, payload_len: usize) {
    let _ = (hash, payload_len);

    #[cfg(feature = "metrics")]
    metrics::counter!("ipmi_integrity_verified_total", "hash" => hash.as_str()).increment(1);

    #[cfg(feature = "tracing")]
    tracing::trace!(hash = hash.as_str(), payload_len, "integrity trailer verified");
}

/// Rejected inbound packets are security relevant and always logged at `warn`.
pub(crate) fn record_rejected(hash: HashChoice, payload_len: usize, total_len: usize, err: &Error) {
    let _ = (hash, payload_len, total_len, err);

    #[cfg(feature = "metrics")]
    metrics::counter!(
        "ipmi_integrity_errors_total",
        "hash" => hash.as_str(),
        "kind" => error_kind(err)
    )
    .increment(1);

    #[cfg(feature = "tracing")]
    tracing::warn!(
        hash = hash.as_str(),
        payload_len,
        total_len,
        error = %err,
        "inbound packet failed integrity check"
    );
}

pub(crate) fn record_registration_failed(id: u8, err: &Error) {
    let _ = (id, err);

    #[cfg(feature = "tracing")]
    tracing::error!(algorithm_id = id, error = %err, "integrity algorithm registration failed");
}

#[cfg(feature = "metrics")]
fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::InsufficientKeyMaterial { .. } => "insufficient_key_material",
        Error::ResourceExhausted => "resource_exhausted",
        Error::BufferTooSmall { .. } => "buffer_too_small",
        Error::TruncatedTrailer { .. } => "truncated_trailer",
        Error::IntegrityMismatch => "mismatch",
        Error::UnsupportedAlgorithm(_) => "unsupported_algorithm",
        Error::DuplicateAlgorithm(_) => "duplicate_algorithm",
        Error::DuplicateHandler { .. } => "duplicate_handler",
        Error::InvalidArgument(_) => "invalid_argument",
        Error::Crypto(_) => "crypto",
    }
}
