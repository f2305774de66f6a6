use std::time::Duration;

use tendencia_core::BatchOutcome;
use tendencia_types::PacingConfig;

/// Inserts cooldowns between successive batch fetches.
///
/// Pacing is outcome-aware: every batch is followed by the fixed batch delay,
/// and a batch that exhausted its rate-limit retries earns an extra penalty so
/// the next fetch starts well clear of the provider's cooldown window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pacer {
    cfg: PacingConfig,
}

impl Pacer {
    pub(crate) const fn new(cfg: PacingConfig) -> Self {
        Self { cfg }
    }

    /// The cooldown owed after a batch with this outcome.
    pub(crate) fn delay_after(&self, outcome: &BatchOutcome) -> Duration {
        match outcome {
            BatchOutcome::RateLimited => {
                self.cfg.batch_delay.saturating_add(self.cfg.rate_limit_penalty)
            }
            BatchOutcome::Success(_) | BatchOutcome::Transient(_) => self.cfg.batch_delay,
        }
    }

    /// Sleep out the cooldown owed after `outcome`.
    pub(crate) async fn rest(&self, outcome: &BatchOutcome) {
        let delay = self.delay_after(outcome);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
