//! Deterministic mock providers for tests and examples.
//!
//! [`FixtureProvider`] answers every query with a reproducible series derived
//! from the query text, with a few sentinel query strings that force error
//! paths. [`ScriptedProvider`] defers entirely to an external
//! [`ScriptController`] so tests can script per-call behavior.

use async_trait::async_trait;

use tendencia_core::{BatchSeries, FetchParams, RawSeries, TrendProvider, TrendsError};

mod dynamic;

pub use dynamic::{MockBehavior, ScriptController, ScriptedProvider};

/// Number of points in every fixture series, matching a weekly 12-month
/// timeframe.
pub const FIXTURE_POINTS: usize = 52;

/// CI-safe provider that serves deterministic fixture data.
///
/// Sentinel queries force specific paths:
/// - `"FAIL"` raises a provider error for the whole batch.
/// - `"RATELIMIT"` raises a rate-limit signal for the whole batch.
/// - `"NODATA"` is silently omitted from the result ("no signal").
pub struct FixtureProvider;

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The series this provider would return for `query`.
    ///
    /// Derived from the query bytes so different queries get visibly
    /// different but stable shapes.
    #[must_use]
    pub fn series_for(query: &str) -> RawSeries {
        let seed: u32 = query.bytes().map(u32::from).sum::<u32>().max(1);
        RawSeries::dense((0..FIXTURE_POINTS as u32).map(move |i| {
            let phase = seed.wrapping_mul(31).wrapping_add(i.wrapping_mul(7));
            phase % 101
        }))
    }
}

#[async_trait]
impl TrendProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "tendencia-mock"
    }

    async fn interest_over_time(
        &self,
        queries: &[String],
        _params: &FetchParams,
    ) -> Result<BatchSeries, TrendsError> {
        for q in queries {
            match q.as_str() {
                "FAIL" => {
                    return Err(TrendsError::provider(
                        "tendencia-mock",
                        format!("forced failure for {q}"),
                    ));
                }
                "RATELIMIT" => return Err(TrendsError::RateLimited),
                _ => {}
            }
        }
        Ok(queries
            .iter()
            .filter(|q| q.as_str() != "NODATA")
            .map(|q| (q.clone(), Self::series_for(q)))
            .collect())
    }
}
