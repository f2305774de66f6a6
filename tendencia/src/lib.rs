//! Tendencia orchestrates batched fetches against a rate-limited trend-data
//! provider and turns the results into comparable popularity scores.
//!
//! Overview
//! - Normalizes and caps the caller's query set, then partitions it into
//!   small ordered batches.
//! - Fetches each batch through the `tendencia_core::TrendProvider` contract
//!   under an exponential-backoff retry policy with two curves: a slower one
//!   for rate-limit recovery and a faster one for generic transient faults.
//! - Paces successive batch fetches with a fixed delay (plus a penalty after
//!   a rate-limit exhaustion) to stay under the provider's implicit quota.
//! - Tolerates partial failure: a batch that exhausts its retries degrades to
//!   per-query error tags and zeroed metrics instead of aborting the request.
//! - Normalizes averages into request-relative 0-100 scores so queries can be
//!   compared even though the provider's indices are per-query scales.
//!
//! Key behaviors and trade-offs
//! - Batches are fetched strictly sequentially; parallel fetches would defeat
//!   the pacing against a shared per-identity quota.
//! - Retries are local to one batch, which bounds the blast radius of a bad
//!   batch and maximizes partial results under an unreliable provider.
//! - Backoff jitter avoids retry synchronization; the jitter bounds live in
//!   [`RetryConfig`], and a zero bound makes delays deterministic for tests.
//! - There is no per-attempt timeout and no whole-request deadline: only the
//!   backoff bounds limit how long a batch may take.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use tendencia::Tendencia;
//! use tendencia_core::FetchParams;
//!
//! let provider = Arc::new(GtrendsClient::new_default());
//! let tendencia = Tendencia::builder().provider(provider).build()?;
//!
//! let queries = vec!["yerba mate".to_string(), "asado".to_string()];
//! let response = tendencia
//!     .interest_over_time(&queries, FetchParams::default())
//!     .await?;
//! for item in &response.items {
//!     println!("{}: score {}", item.query, item.score);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod fetch;
mod pace;
mod router;

pub use core::{Tendencia, TendenciaBuilder};

pub use tendencia_core::{FailureKind, PacingConfig, RetryConfig, TendenciaConfig, TrendsError};

// Re-export core types for convenience
pub use tendencia_core::{
    BatchOutcome,
    BatchSeries,
    ErrorTag,
    FetchParams,
    QueryMetric,
    RawSeries,
    TrendProvider,
    TrendsResponse,
};
