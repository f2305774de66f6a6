use std::sync::Arc;

use tendencia_core::TrendProvider;
use tendencia_types::{PacingConfig, RetryConfig, TendenciaConfig, TrendsError};

use crate::pace::Pacer;

/// Orchestrator that fetches batched trend data through one provider.
pub struct Tendencia {
    pub(crate) provider: Arc<dyn TrendProvider>,
    pub(crate) cfg: TendenciaConfig,
    pub(crate) pacer: Pacer,
}

impl std::fmt::Debug for Tendencia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tendencia")
            .field("cfg", &self.cfg)
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a `Tendencia` orchestrator with custom
/// configuration.
pub struct TendenciaBuilder {
    provider: Option<Arc<dyn TrendProvider>>,
    cfg: TendenciaConfig,
}

impl Default for TendenciaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TendenciaBuilder {
    /// Create a new builder with the default quota-derived tuning
    /// (15-query cap, batches of 3, 4 retries, 6s inter-batch pacing).
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: TendenciaConfig::default(),
        }
    }

    /// Register the provider client this orchestrator fetches through.
    ///
    /// Exactly one provider is supported; if it holds a session that is not
    /// safe for concurrent use, run one orchestrator per session.
    #[must_use]
    pub fn provider(mut self, p: Arc<dyn TrendProvider>) -> Self {
        self.provider = Some(p);
        self
    }

    /// Replace the full configuration in one call.
    #[must_use]
    pub fn config(mut self, cfg: TendenciaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Cap on surviving queries per request; trailing entries beyond the cap
    /// are dropped during normalization.
    #[must_use]
    pub const fn max_queries(mut self, n: usize) -> Self {
        self.cfg.max_queries = n;
        self
    }

    /// Number of queries fetched together in one provider call.
    #[must_use]
    pub const fn batch_size(mut self, n: usize) -> Self {
        self.cfg.batch_size = n;
        self
    }

    /// Override the retry/backoff policy.
    #[must_use]
    pub const fn retry(mut self, cfg: RetryConfig) -> Self {
        self.cfg.retry = cfg;
        self
    }

    /// Override the inter-batch pacing policy.
    #[must_use]
    pub const fn pacing(mut self, cfg: PacingConfig) -> Self {
        self.cfg.pacing = cfg;
        self
    }

    /// Build the `Tendencia` orchestrator.
    ///
    /// # Errors
    /// Returns `Validation` if no provider has been registered or if
    /// `batch_size`/`max_queries` are zero.
    pub fn build(self) -> Result<Tendencia, TrendsError> {
        let provider = self.provider.ok_or_else(|| {
            TrendsError::validation("no provider registered; add one via provider(...)")
        })?;
        if self.cfg.batch_size == 0 {
            return Err(TrendsError::validation("batch_size must be at least 1"));
        }
        if self.cfg.max_queries == 0 {
            return Err(TrendsError::validation("max_queries must be at least 1"));
        }
        let pacer = Pacer::new(self.cfg.pacing);
        Ok(Tendencia {
            provider,
            cfg: self.cfg,
            pacer,
        })
    }
}

impl Tendencia {
    /// Start building a new `Tendencia` instance.
    #[must_use]
    pub fn builder() -> TendenciaBuilder {
        TendenciaBuilder::new()
    }
}
