use crate::error::{CacheError, SessionError, StoreError};
use crate::types::{
    CachedIdentity, NewReview, Profile, Provider, ProviderAggregate, ProviderId, ReviewRecord,
    Session, UserId,
};
use std::future::Future;

/// Reviews collection of the remote document store. Records are appended
/// once and never mutated; the store assigns the record id.
pub trait ReviewStore {
    fn append_review(
        &self,
        input: NewReview,
    ) -> impl Future<Output = Result<ReviewRecord, StoreError>> + Send;

    /// Reviews for one provider, ordered by creation timestamp descending,
    /// capped at `limit`.
    fn reviews_for_provider(
        &self,
        provider_id: &ProviderId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ReviewRecord>, StoreError>> + Send;
}

/// Providers collection. Aggregate writes are partial merge-updates; no
/// other provider field is touched by this workflow.
pub trait ProviderStore {
    fn provider(
        &self,
        id: &ProviderId,
    ) -> impl Future<Output = Result<Option<Provider>, StoreError>> + Send;

    fn merge_aggregate(
        &self,
        id: &ProviderId,
        aggregate: &ProviderAggregate,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Users collection, read-only here.
pub trait ProfileStore {
    fn profile(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Option<Profile>, StoreError>> + Send;
}

/// The full document-store client handle injected into [`crate::Pronto`].
/// The remote store is an external collaborator; this trait is the seam.
pub trait Store: ReviewStore + ProviderStore + ProfileStore + Send + Sync {}

impl<T: ReviewStore + ProviderStore + ProfileStore + Send + Sync> Store for T {}

/// External auth collaborator: current session or none, plus sign-out.
pub trait SessionProvider: Send + Sync {
    fn current_session(&self)
        -> impl Future<Output = Result<Option<Session>, SessionError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Local fallback identity storage. Purely local, so synchronous.
pub trait IdentityCache: Send + Sync {
    fn load(&self) -> Result<Option<CachedIdentity>, CacheError>;
    fn save(&self, identity: &CachedIdentity) -> Result<(), CacheError>;
    fn clear(&self) -> Result<(), CacheError>;
}
