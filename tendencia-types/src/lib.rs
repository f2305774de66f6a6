//! Tendencia-specific data transfer objects: the unified error taxonomy and
//! the retry/pacing configuration primitives shared across the workspace.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{PacingConfig, RetryConfig, TendenciaConfig};
pub use error::{FailureKind, TrendsError};
