use tendencia_core::{
    FetchParams, QueryMetric, TrendsError, TrendsResponse, chunk_queries, normalize_queries,
    normalize_scores, summarize, unavailable,
};

use crate::core::Tendencia;

impl Tendencia {
    /// Fetch interest-over-time metrics for a set of queries.
    ///
    /// Queries are normalized (trimmed, de-duplicated against their neighbor,
    /// capped), partitioned into ordered batches, and fetched sequentially
    /// with pacing between batches. Queries of a batch that exhausted its
    /// retries come back with zeroed metrics and an error tag; the request as
    /// a whole still succeeds. Scores are normalized across the request after
    /// all batches have been processed.
    ///
    /// # Errors
    /// Returns `Validation` when normalization leaves no usable query.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, queries), fields(provider = self.provider.name()))
    )]
    pub async fn interest_over_time(
        &self,
        queries: &[String],
        params: FetchParams,
    ) -> Result<TrendsResponse, TrendsError> {
        let normalized = normalize_queries(queries, self.cfg.max_queries)?;
        let batches = chunk_queries(&normalized, self.cfg.batch_size);
        let total = batches.len();

        let mut items: Vec<QueryMetric> = Vec::with_capacity(normalized.len());
        for (idx, batch) in batches.iter().enumerate() {
            let outcome = self.fetch_batch(batch, &params).await;
            if let tendencia_core::BatchOutcome::Success(series) = &outcome {
                items.extend(batch.iter().map(|q| summarize(q, series.get(q))));
            } else if let Some(tag) = outcome.error_tag() {
                items.extend(batch.iter().map(|q| unavailable(q, tag)));
            }
            // No cooldown owed after the final batch.
            if idx + 1 < total {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    batch = idx,
                    delay_ms = self.pacer.delay_after(&outcome).as_millis() as u64,
                    "pacing before next batch"
                );
                self.pacer.rest(&outcome).await;
            }
        }

        normalize_scores(&mut items);

        Ok(TrendsResponse {
            geo: params.geo,
            timeframe: params.timeframe,
            items,
        })
    }
}
