//! Request parameters, raw provider series, and response DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tendencia_types::FailureKind;

/// Parameters passed unchanged to every batch fetch of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParams {
    /// Language tag for the provider session (e.g. "es-AR").
    pub hl: String,
    /// Timezone offset in minutes.
    pub tz: i32,
    /// Geographic region code (e.g. "AR").
    pub geo: String,
    /// Provider timeframe expression (e.g. "today 12-m").
    pub timeframe: String,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            hl: "es-AR".to_string(),
            tz: 180,
            geo: "AR".to_string(),
            timeframe: "today 12-m".to_string(),
        }
    }
}

/// One query's interest-over-time series as returned by the provider.
///
/// Points are ordered oldest to newest. Gaps (periods the provider has no
/// value for) are kept explicit here and dropped by [`RawSeries::values`]
/// before any aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSeries {
    /// Ordered index points; `None` marks a gap.
    pub points: Vec<Option<u32>>,
}

impl RawSeries {
    /// Build a series with no gaps.
    #[must_use]
    pub fn dense(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            points: values.into_iter().map(Some).collect(),
        }
    }

    /// The usable values of the series, gaps dropped, order preserved.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.points.iter().copied().flatten().collect()
    }
}

/// Per-query raw series for one fetched batch.
///
/// A query missing from the map means the provider has no data for it, which
/// is a valid "no signal" result rather than a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSeries {
    /// Series keyed by query string.
    pub series: HashMap<String, RawSeries>,
}

impl BatchSeries {
    /// Series for `query`, if the provider returned one.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<&RawSeries> {
        self.series.get(query)
    }

    /// Insert a series for `query`.
    pub fn insert(&mut self, query: impl Into<String>, series: RawSeries) {
        self.series.insert(query.into(), series);
    }
}

impl<Q: Into<String>> FromIterator<(Q, RawSeries)> for BatchSeries {
    fn from_iter<I: IntoIterator<Item = (Q, RawSeries)>>(iter: I) -> Self {
        Self {
            series: iter.into_iter().map(|(q, s)| (q.into(), s)).collect(),
        }
    }
}

/// Outcome of fetching one batch, produced by the retrying fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The provider answered; the payload may still be empty for some or all
    /// queries ("no signal").
    Success(BatchSeries),
    /// Rate-limit retries were exhausted.
    RateLimited,
    /// Generic transient retries were exhausted; `FailureKind` identifies the
    /// failure category for diagnostics.
    Transient(FailureKind),
}

impl BatchOutcome {
    /// The error tag every query of a failed batch should carry, or `None`
    /// for a successful batch.
    #[must_use]
    pub const fn error_tag(&self) -> Option<ErrorTag> {
        match self {
            Self::Success(_) => None,
            Self::RateLimited => Some(ErrorTag::RateLimited),
            Self::Transient(kind) => Some(ErrorTag::Transient(*kind)),
        }
    }
}

/// Why a query carries zeroed metrics instead of real ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    /// The owning batch exhausted its rate-limit retries.
    RateLimited,
    /// The owning batch exhausted its transient-failure retries.
    Transient(FailureKind),
}

impl core::fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RateLimited => f.write_str("rate_limited"),
            Self::Transient(kind) => write!(f, "{kind}"),
        }
    }
}

/// Summary metrics for one query within one request.
///
/// Produced by the aggregator; the score normalizer later fills in `score`
/// relative to the request's strongest query. No other field is mutated after
/// aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetric {
    /// The query these metrics describe.
    pub query: String,
    /// Arithmetic mean of the surviving index values, rounded to 2 decimals.
    pub avg: f64,
    /// Most recent surviving index value.
    pub last: u32,
    /// Maximum surviving index value.
    pub max: u32,
    /// Most recent points of the series, for compact visualization.
    pub sparkline: Vec<u32>,
    /// Present when the owning batch failed; identifies the failure kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorTag>,
    /// Request-relative popularity score in `[0, 100]`.
    pub score: f64,
}

/// Final assembled response for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsResponse {
    /// Region the request was scoped to.
    pub geo: String,
    /// Timeframe the request was scoped to.
    pub timeframe: String,
    /// Per-query metrics in original query order.
    pub items: Vec<QueryMetric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_series_drops_gaps_preserving_order() {
        let s = RawSeries {
            points: vec![Some(3), None, Some(7), None, None, Some(1)],
        };
        assert_eq!(s.values(), vec![3, 7, 1]);
    }

    #[test]
    fn dense_series_has_no_gaps() {
        let s = RawSeries::dense([10, 20, 30]);
        assert_eq!(s.values(), vec![10, 20, 30]);
        assert_eq!(s.points.len(), 3);
    }

    #[test]
    fn outcome_tags_map_failure_kinds() {
        assert_eq!(
            BatchOutcome::RateLimited.error_tag(),
            Some(ErrorTag::RateLimited)
        );
        assert_eq!(
            BatchOutcome::Transient(FailureKind::Network).error_tag(),
            Some(ErrorTag::Transient(FailureKind::Network))
        );
        assert_eq!(BatchOutcome::Success(BatchSeries::default()).error_tag(), None);
    }

    #[test]
    fn error_tag_display_matches_wire_names() {
        assert_eq!(ErrorTag::RateLimited.to_string(), "rate_limited");
        assert_eq!(
            ErrorTag::Transient(FailureKind::MalformedResponse).to_string(),
            "malformed_response"
        );
    }

    #[test]
    fn metric_serialization_omits_absent_error() {
        let m = QueryMetric {
            query: "mate".into(),
            avg: 20.0,
            last: 30,
            max: 30,
            sparkline: vec![10, 20, 30],
            error: None,
            score: 100.0,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("error"));
    }
}
