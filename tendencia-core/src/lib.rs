//! tendencia-core
//!
//! Core types, traits, and utilities shared across the tendencia ecosystem.
//!
//! - `types`: request parameters, per-query series, metrics, and outcomes.
//! - `provider`: the `TrendProvider` contract implemented by client crates.
//! - `query`: input normalization and batching helpers.
//! - `series`: aggregation and cross-query score normalization.
//!
//! Everything in this crate is request-scoped and free of shared mutable
//! state; the orchestration crate owns retries, pacing, and control flow.
#![warn(missing_docs)]

/// The `TrendProvider` contract implemented by provider client crates.
pub mod provider;
pub mod query;
pub mod series;
pub mod types;

pub use provider::TrendProvider;
pub use query::{chunk_queries, normalize_queries};
pub use series::{normalize_scores, summarize, unavailable};
pub use tendencia_types::{FailureKind, PacingConfig, RetryConfig, TendenciaConfig, TrendsError};
pub use types::*;
