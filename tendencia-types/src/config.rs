//! Configuration shared between the orchestrator and its collaborators.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exponential backoff configuration for retrying failed batch fetches.
///
/// Two distinct curves are kept because rate-limit recovery needs longer
/// cooldowns than generic transient errors. Each delay is
/// `base * factor^attempt` plus a uniform jitter in `[0, jitter)`; a zero
/// jitter bound makes the computation fully deterministic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retries after the initial attempt (so `max_retries + 1`
    /// provider calls at most per batch).
    pub max_retries: u32,
    /// Base delay applied after a rate-limit signal.
    pub rate_limit_base: Duration,
    /// Jitter ceiling added to rate-limit delays.
    pub rate_limit_jitter: Duration,
    /// Base delay applied after any other transient failure.
    pub transient_base: Duration,
    /// Jitter ceiling added to transient delays.
    pub transient_jitter: Duration,
    /// Exponential factor applied per attempt (>= 1).
    pub factor: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            rate_limit_base: Duration::from_secs(3),
            rate_limit_jitter: Duration::from_secs(1),
            transient_base: Duration::from_secs(2),
            transient_jitter: Duration::from_millis(800),
            factor: 2,
        }
    }
}

impl RetryConfig {
    /// Deterministic component of the rate-limit backoff for `attempt`
    /// (0-based). Jitter is layered on top by the fetcher.
    #[must_use]
    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        Self::scaled(self.rate_limit_base, self.factor, attempt)
    }

    /// Deterministic component of the transient backoff for `attempt`.
    #[must_use]
    pub fn transient_delay(&self, attempt: u32) -> Duration {
        Self::scaled(self.transient_base, self.factor, attempt)
    }

    fn scaled(base: Duration, factor: u32, attempt: u32) -> Duration {
        let mult = u64::from(factor).saturating_pow(attempt);
        Duration::from_millis(
            u64::try_from(base.as_millis())
                .unwrap_or(u64::MAX)
                .saturating_mul(mult),
        )
    }
}

/// Fixed pacing applied between successive batch fetches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Delay inserted between batches regardless of outcome.
    pub batch_delay: Duration,
    /// Additional cooldown after a batch that exhausted its rate-limit
    /// retries, applied on top of `batch_delay`.
    pub rate_limit_penalty: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            batch_delay: Duration::from_secs(6),
            rate_limit_penalty: Duration::from_secs(4),
        }
    }
}

/// Global configuration for the `Tendencia` orchestrator.
///
/// The caps and delays here are provider-quota-derived tuning, not inherent
/// invariants, so they are all adjustable; the defaults match the quota
/// profile of the public trend-data provider this was tuned against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TendenciaConfig {
    /// Maximum number of surviving queries accepted per request; trailing
    /// entries beyond the cap are dropped.
    pub max_queries: usize,
    /// Maximum number of queries fetched together in one provider call.
    pub batch_size: usize,
    /// Backoff policy for the retrying fetcher.
    pub retry: RetryConfig,
    /// Inter-batch pacing policy.
    pub pacing: PacingConfig,
}

impl Default for TendenciaConfig {
    fn default() -> Self {
        Self {
            max_queries: 15,
            batch_size: 3,
            retry: RetryConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}
