use crate::error::{AggregateError, StoreError};
use crate::store::{ProviderStore, ReviewStore};
use crate::types::{ProviderAggregate, ProviderId, Rating};
use chrono::Utc;
use std::time::Duration;

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean (rounded to one decimal) and count over a set of ratings. An empty
/// set yields mean 0, count 0.
pub fn summarize(ratings: &[Rating]) -> (f64, u64) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let total: u64 = ratings.iter().map(|rating| u64::from(rating.get())).sum();
    let mean = total as f64 / ratings.len() as f64;
    (round_to_tenth(mean), ratings.len() as u64)
}

/// Per-star tallies, index 0 holding one-star counts.
pub fn distribution(ratings: &[Rating]) -> [u64; 5] {
    let mut counts = [0u64; 5];
    for rating in ratings {
        counts[usize::from(rating.get()) - 1] += 1;
    }
    counts
}

/// Full re-scan recomputation of a provider's aggregate: fetch up to
/// `fetch_limit` reviews, summarize, and merge-write the result. Zero
/// records still write mean 0 / count 0 so the aggregate never goes stale.
pub async fn recompute<S>(
    store: &S,
    provider_id: &ProviderId,
    fetch_limit: usize,
) -> Result<ProviderAggregate, AggregateError>
where
    S: ReviewStore + ProviderStore + Sync,
{
    let reviews = store
        .reviews_for_provider(provider_id, fetch_limit)
        .await
        .map_err(|err| AggregateError::FetchFailed {
            message: err.to_string(),
        })?;

    let ratings: Vec<Rating> = reviews.iter().map(|review| review.rating).collect();
    let (mean, count) = summarize(&ratings);
    let aggregate = ProviderAggregate {
        mean,
        count,
        recomputed_at: Utc::now(),
    };

    store
        .merge_aggregate(provider_id, &aggregate)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => AggregateError::ProviderNotFound,
            other => AggregateError::UpdateFailed {
                message: other.to_string(),
            },
        })?;

    Ok(aggregate)
}

/// Maintenance-mode recomputation: up to `attempts` tries with linear
/// backoff. Post-submission recomputation never goes through here; it
/// performs exactly one attempt.
pub async fn recompute_with_retry<S>(
    store: &S,
    provider_id: &ProviderId,
    fetch_limit: usize,
    attempts: u32,
    backoff: Duration,
) -> Result<ProviderAggregate, AggregateError>
where
    S: ReviewStore + ProviderStore + Sync,
{
    let attempts = attempts.max(1);
    let mut last_err = None;
    for attempt in 1..=attempts {
        match recompute(store, provider_id, fetch_limit).await {
            Ok(aggregate) => return Ok(aggregate),
            // A missing provider will not appear on retry.
            Err(AggregateError::ProviderNotFound) => {
                return Err(AggregateError::ProviderNotFound)
            }
            Err(err) => {
                tracing::warn!(
                    provider = %provider_id,
                    attempt,
                    error = %err,
                    "aggregate recomputation attempt failed"
                );
                last_err = Some(err);
                if attempt < attempts {
                    tokio::time::sleep(backoff * attempt).await;
                }
            }
        }
    }
    Err(last_err.unwrap_or(AggregateError::FetchFailed {
        message: "no attempts made".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[u8]) -> Vec<Rating> {
        values
            .iter()
            .map(|value| Rating::new(*value).unwrap())
            .collect()
    }

    #[test]
    fn mean_rounds_to_one_decimal() {
        assert_eq!(summarize(&ratings(&[5, 4])), (4.5, 2));
        assert_eq!(summarize(&ratings(&[5, 4, 3])), (4.0, 3));
        assert_eq!(summarize(&ratings(&[1, 1, 2])), (1.3, 3));
    }

    #[test]
    fn empty_set_yields_zeroes() {
        assert_eq!(summarize(&[]), (0.0, 0));
    }

    #[test]
    fn distribution_counts_per_star() {
        let counts = distribution(&ratings(&[5, 5, 3, 1]));
        assert_eq!(counts, [1, 0, 1, 0, 2]);
    }

    #[test]
    fn rounding_is_exact_at_half_steps() {
        assert_eq!(round_to_tenth(4.45), 4.5);
        assert_eq!(round_to_tenth(4.44), 4.4);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }
}
