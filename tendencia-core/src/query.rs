//! Query-set normalization and batch partitioning.
//!
//! Both helpers are deterministic and side-effect free; order is always the
//! caller's order.

use tendencia_types::TrendsError;

/// Clean and cap a raw query list.
///
/// Entries are whitespace-trimmed, empty results are discarded, adjacent
/// duplicates (after trimming) are collapsed, and surviving entries beyond
/// `max_queries` are dropped from the tail.
///
/// # Errors
/// Returns `TrendsError::Validation` when nothing survives; this is a caller
/// fault, not a retryable condition.
pub fn normalize_queries(raw: &[String], max_queries: usize) -> Result<Vec<String>, TrendsError> {
    let mut out: Vec<String> = Vec::new();
    for q in raw {
        let trimmed = q.trim();
        if trimmed.is_empty() {
            continue;
        }
        if out.last().is_some_and(|prev| prev == trimmed) {
            continue;
        }
        if out.len() == max_queries {
            break;
        }
        out.push(trimmed.to_string());
    }
    if out.is_empty() {
        return Err(TrendsError::validation("empty query list"));
    }
    Ok(out)
}

/// Split a normalized query set into contiguous batches of at most
/// `batch_size`, preserving order. The final batch may be smaller; no batch
/// is empty. Concatenating the batches reconstructs the input exactly.
///
/// `batch_size >= 1` is an orchestrator build-time invariant, so this is
/// infallible.
#[must_use]
pub fn chunk_queries(queries: &[String], batch_size: usize) -> Vec<Vec<String>> {
    queries
        .chunks(batch_size.max(1))
        .map(<[String]>::to_vec)
        .collect()
}
