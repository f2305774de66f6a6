use std::time::Duration;

use rand::Rng;

use tendencia_core::{BatchOutcome, FetchParams};
use tendencia_types::{FailureKind, TrendsError};

use crate::core::Tendencia;

impl Tendencia {
    /// Fetch one batch through the provider, retrying under the configured
    /// backoff policy.
    ///
    /// Retries stay local to this batch. Rate-limit signals use the slower
    /// backoff curve; every other retryable error uses the transient curve.
    /// When retries run out the failure degrades into a non-success outcome
    /// instead of an error, so one bad batch never aborts the whole request.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, batch, params), fields(batch_len = batch.len()))
    )]
    pub(crate) async fn fetch_batch(
        &self,
        batch: &[String],
        params: &FetchParams,
    ) -> BatchOutcome {
        let retry = &self.cfg.retry;
        let mut attempt: u32 = 0;
        loop {
            match self.provider.interest_over_time(batch, params).await {
                Ok(series) => return BatchOutcome::Success(series),
                Err(TrendsError::RateLimited) => {
                    if attempt >= retry.max_retries {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            provider = self.provider.name(),
                            attempts = attempt + 1,
                            "rate-limit retries exhausted for batch"
                        );
                        return BatchOutcome::RateLimited;
                    }
                    let delay =
                        with_jitter(retry.rate_limit_delay(attempt), retry.rate_limit_jitter);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        provider = self.provider.name(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    let kind = err.failure_kind().unwrap_or(FailureKind::Provider);
                    if !err.is_retryable() || attempt >= retry.max_retries {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            provider = self.provider.name(),
                            attempts = attempt + 1,
                            error = %err,
                            "giving up on batch"
                        );
                        return BatchOutcome::Transient(kind);
                    }
                    let delay =
                        with_jitter(retry.transient_delay(attempt), retry.transient_jitter);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        provider = self.provider.name(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// `base` plus a uniform random jitter in `[0, cap)`.
///
/// A zero cap skips the RNG entirely, which keeps delays deterministic when
/// tests zero out the jitter bounds.
fn with_jitter(base: Duration, cap: Duration) -> Duration {
    let cap_ms = u64::try_from(cap.as_millis()).unwrap_or(u64::MAX);
    if cap_ms == 0 {
        return base;
    }
    let extra = rand::rng().random_range(0..cap_ms);
    base.saturating_add(Duration::from_millis(extra))
}
