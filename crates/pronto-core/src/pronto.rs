use crate::aggregate;
use crate::config::ProntoConfig;
use crate::error::{AggregateError, SessionError, StoreError, SubmissionError};
use crate::identity::resolve_identity;
use crate::store::{IdentityCache, SessionProvider, Store};
use crate::types::{
    Identity, NewReview, ProviderAggregate, ProviderId, ProviderSummary, ReviewRecord,
    ReviewStats, ServiceId, StarCount, SubmitReviewInput,
};
use crate::validation::{
    normalize_comment, validate_provider_id, validate_rating, validate_reviewer,
};
use chrono::Utc;

/// The workflow facade. Collaborator handles are constructed once at the
/// process entry point and injected here; nothing in this crate reaches for
/// ambient globals or probes a readiness flag.
pub struct Pronto<S, A, C> {
    store: S,
    sessions: A,
    cache: C,
    config: ProntoConfig,
}

impl<S: Store, A: SessionProvider, C: IdentityCache> Pronto<S, A, C> {
    pub fn new(store: S, sessions: A, cache: C, config: ProntoConfig) -> Self {
        Self {
            store,
            sessions,
            cache,
            config,
        }
    }

    pub fn reviews(&self) -> ReviewsApi<'_, S, A, C> {
        ReviewsApi { core: self }
    }

    pub fn providers(&self) -> ProvidersApi<'_, S, A, C> {
        ProvidersApi { core: self }
    }

    pub fn identity(&self) -> IdentityApi<'_, S, A, C> {
        IdentityApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &ProntoConfig {
        &self.config
    }
}

pub struct ReviewsApi<'a, S, A, C> {
    core: &'a Pronto<S, A, C>,
}

impl<'a, S: Store, A: SessionProvider, C: IdentityCache> ReviewsApi<'a, S, A, C> {
    /// Validate and append one review record, then recompute the provider
    /// aggregate best-effort. The submission is successful once the append
    /// succeeds; a recomputation failure is logged and swallowed because the
    /// record is already durable.
    pub async fn submit(
        &self,
        input: SubmitReviewInput,
        reviewer: &Identity,
    ) -> Result<ReviewRecord, SubmissionError> {
        let provider_id = validate_provider_id(&input.provider_id)?;
        let rating = validate_rating(input.rating)?;
        let reviewer_id = validate_reviewer(reviewer)?;
        let comment = normalize_comment(input.comment.as_deref());
        let service_id = input
            .service_id
            .and_then(|raw| ServiceId::new(raw).ok());

        let record = self
            .core
            .store
            .append_review(NewReview {
                provider_id: provider_id.clone(),
                reviewer_id,
                reviewer_name: reviewer.display_name.clone(),
                reviewer_contact: reviewer.contact.clone(),
                rating,
                comment,
                created_at: Utc::now(),
                service_id,
            })
            .await
            .map_err(|err| SubmissionError::StoreUnavailable {
                message: err.to_string(),
            })?;

        // Single attempt; retry is reserved for standalone maintenance runs.
        if let Err(err) =
            aggregate::recompute(&self.core.store, &provider_id, self.core.config.fetch_limit)
                .await
        {
            tracing::warn!(
                provider = %provider_id,
                review = %record.id,
                error = %err,
                "aggregate recomputation failed after submission"
            );
        }

        Ok(record)
    }

    /// Reviews for display, most recent first. Records with an empty
    /// reviewer name are dropped rather than rendered; rating validity is
    /// already enforced at the store boundary.
    pub async fn list(
        &self,
        provider_id: &ProviderId,
        limit: usize,
    ) -> Result<Vec<ReviewRecord>, StoreError> {
        let reviews = self
            .core
            .store
            .reviews_for_provider(provider_id, limit)
            .await?;
        Ok(reviews
            .into_iter()
            .filter(|review| !review.reviewer_name.trim().is_empty())
            .collect())
    }

    /// Display statistics over the fetched window: mean, count, and the
    /// per-star distribution.
    pub async fn stats(&self, provider_id: &ProviderId) -> Result<ReviewStats, StoreError> {
        let reviews = self
            .core
            .store
            .reviews_for_provider(provider_id, self.core.config.fetch_limit)
            .await?;
        let ratings: Vec<_> = reviews.iter().map(|review| review.rating).collect();
        let (mean, count) = aggregate::summarize(&ratings);
        let distribution = aggregate::distribution(&ratings)
            .into_iter()
            .enumerate()
            .map(|(index, count)| StarCount {
                stars: index as u8 + 1,
                count,
            })
            .collect();
        Ok(ReviewStats {
            mean,
            count,
            distribution,
        })
    }
}

pub struct ProvidersApi<'a, S, A, C> {
    core: &'a Pronto<S, A, C>,
}

impl<'a, S: Store, A: SessionProvider, C: IdentityCache> ProvidersApi<'a, S, A, C> {
    /// Display card for a provider. A failed or empty read falls back to
    /// static defaults instead of erroring the page.
    pub async fn summary(
        &self,
        provider_id: &ProviderId,
        fallback_name: Option<&str>,
    ) -> ProviderSummary {
        match self.core.store.provider(provider_id).await {
            Ok(Some(provider)) => ProviderSummary::from_provider(provider),
            Ok(None) => ProviderSummary::fallback(provider_id.clone(), fallback_name),
            Err(err) => {
                tracing::warn!(provider = %provider_id, error = %err, "provider read failed, using defaults");
                ProviderSummary::fallback(provider_id.clone(), fallback_name)
            }
        }
    }

    /// One full-scan recomputation attempt.
    pub async fn recompute(
        &self,
        provider_id: &ProviderId,
    ) -> Result<ProviderAggregate, AggregateError> {
        aggregate::recompute(&self.core.store, provider_id, self.core.config.fetch_limit).await
    }

    /// Standalone maintenance recomputation with bounded linear backoff.
    pub async fn recompute_with_retry(
        &self,
        provider_id: &ProviderId,
    ) -> Result<ProviderAggregate, AggregateError> {
        aggregate::recompute_with_retry(
            &self.core.store,
            provider_id,
            self.core.config.fetch_limit,
            self.core.config.recompute_attempts,
            self.core.config.retry_backoff,
        )
        .await
    }
}

pub struct IdentityApi<'a, S, A, C> {
    core: &'a Pronto<S, A, C>,
}

impl<'a, S: Store, A: SessionProvider, C: IdentityCache> IdentityApi<'a, S, A, C> {
    pub async fn resolve(&self) -> Identity {
        resolve_identity(&self.core.store, &self.core.sessions, &self.core.cache).await
    }

    /// End the remote session and drop the local fallback identity. A cache
    /// clear failure is logged; the remote sign-out already happened.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.core.sessions.sign_out().await?;
        if let Err(err) = self.core.cache.clear() {
            tracing::warn!(error = %err, "failed to clear identity cache on sign-out");
        }
        Ok(())
    }
}
