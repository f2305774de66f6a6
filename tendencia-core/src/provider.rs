use async_trait::async_trait;

use crate::types::{BatchSeries, FetchParams};
use tendencia_types::TrendsError;

/// Contract implemented by trend-data provider clients.
///
/// The orchestrator depends on the provider only through this narrow fetch
/// surface; authentication, session/cookie handling, and the wire protocol
/// are the client crate's concern and stay opaque here.
///
/// Error contract: implementations should raise [`TrendsError::RateLimited`]
/// when the provider signals a quota hit, and one of the transient variants
/// (`Network`, `MalformedResponse`, `Provider`) for anything else that failed
/// at fetch time. The orchestrator never inspects provider-specific payloads
/// beyond that classification.
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// A stable identifier for logging and error tagging
    /// (e.g. "tendencia-gtrends", "tendencia-mock").
    fn name(&self) -> &'static str;

    /// Fetch interest-over-time series for one batch of queries.
    ///
    /// `queries` is an ordered batch no larger than the orchestrator's
    /// configured batch size; `params` are immutable for the lifetime of the
    /// owning request. A query absent from the returned [`BatchSeries`]
    /// means the provider has no data for it, which is a valid result.
    ///
    /// # Errors
    /// `RateLimited` on a quota signal; `Network`, `MalformedResponse`, or
    /// `Provider` for transient fetch faults.
    async fn interest_over_time(
        &self,
        queries: &[String],
        params: &FetchParams,
    ) -> Result<BatchSeries, TrendsError>;
}
