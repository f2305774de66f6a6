//! Per-query aggregation and cross-query score normalization.

use crate::types::{ErrorTag, QueryMetric, RawSeries};

/// Number of most-recent points kept as the sparkline.
pub const SPARKLINE_POINTS: usize = 26;

/// Summarize one query's series into a metric.
///
/// An empty or absent series yields zeroed fields and an empty sparkline with
/// no error tag: "no signal" is a valid result, distinct from a failed fetch.
/// The score is filled in later by [`normalize_scores`].
#[must_use]
pub fn summarize(query: &str, series: Option<&RawSeries>) -> QueryMetric {
    let values = series.map(RawSeries::values).unwrap_or_default();
    if values.is_empty() {
        return zeroed(query, None);
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg = round2(sum as f64 / values.len() as f64);
    let last = *values.last().unwrap_or(&0);
    let max = values.iter().copied().max().unwrap_or(0);
    let sparkline = values[values.len().saturating_sub(SPARKLINE_POINTS)..].to_vec();
    QueryMetric {
        query: query.to_string(),
        avg,
        last,
        max,
        sparkline,
        error: None,
        score: 0.0,
    }
}

/// The single fallback constructor for queries in a failed batch: zeroed
/// fields plus an explicit error tag, bypassing series extraction entirely.
#[must_use]
pub fn unavailable(query: &str, tag: ErrorTag) -> QueryMetric {
    zeroed(query, Some(tag))
}

fn zeroed(query: &str, error: Option<ErrorTag>) -> QueryMetric {
    QueryMetric {
        query: query.to_string(),
        avg: 0.0,
        last: 0,
        max: 0,
        sparkline: Vec::new(),
        error,
        score: 0.0,
    }
}

/// Compute request-relative scores across the full ordered metric sequence.
///
/// `global_max` is the largest average among untagged metrics; every metric
/// (tagged ones included, from their zeroed average) gets
/// `round((avg / global_max) * 100, 1)`, or 0 when no metric qualifies. The
/// result is comparable across queries even though the provider's indices
/// are only meaningful within a single query's own scale.
pub fn normalize_scores(metrics: &mut [QueryMetric]) {
    let global_max = metrics
        .iter()
        .filter(|m| m.error.is_none())
        .map(|m| m.avg)
        .fold(0.0_f64, f64::max);
    for m in metrics {
        m.score = if global_max > 0.0 {
            round1(m.avg / global_max * 100.0)
        } else {
            0.0
        };
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
