use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tendencia workspace.
///
/// This covers input validation, the two failure classes the provider
/// contract is allowed to raise (rate limiting and transient faults), and an
/// internal catch-all for anything that escapes classification.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrendsError {
    /// Malformed or empty caller input. Fails fast; never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// The provider signalled that the request quota was hit.
    #[error("provider rate limited")]
    RateLimited,

    /// The provider could not be reached or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a payload that could not be interpreted.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The provider reported a failure of its own.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unclassified fault escaping the batch-processing loop. Aborts the
    /// whole request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrendsError {
    /// Helper: build a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Helper: build a `Network` error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Internal` error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether a fetch attempt that produced this error may be retried.
    ///
    /// Validation errors are caller faults and must propagate immediately;
    /// everything else is retried under the appropriate backoff curve.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }

    /// Classify a non-rate-limit fetch failure for diagnostics.
    ///
    /// Returns `None` for `RateLimited` (which has its own backoff curve and
    /// outcome variant) and for `Validation` (which is never a fetch fault).
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Network(_) => Some(FailureKind::Network),
            Self::MalformedResponse(_) => Some(FailureKind::MalformedResponse),
            Self::Provider { .. } | Self::Internal(_) => Some(FailureKind::Provider),
            Self::RateLimited | Self::Validation(_) => None,
        }
    }
}

/// Category of a transient fetch failure, carried through batch outcomes and
/// surfaced as per-query error tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FailureKind {
    /// Connection-level fault.
    Network,
    /// Response arrived but could not be decoded.
    MalformedResponse,
    /// The provider reported an error of its own.
    Provider,
}

impl core::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Network => "network",
            Self::MalformedResponse => "malformed_response",
            Self::Provider => "provider",
        };
        f.write_str(s)
    }
}
