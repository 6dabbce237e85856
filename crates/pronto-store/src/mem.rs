use pronto_core::error::{SessionError, StoreError};
use pronto_core::store::{ProfileStore, ProviderStore, ReviewStore, SessionProvider};
use pronto_core::types::{
    NewReview, Profile, Provider, ProviderAggregate, ProviderId, ReviewId, ReviewRecord, Session,
    UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory stand-in for the remote document store, used by the dev server
/// and the test suite. The real store is an external collaborator; this
/// double honors the same contract, including generated review ids and
/// merge-only aggregate updates, and can inject a bounded number of
/// failures per operation.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<MemInner>,
}

#[derive(Default)]
struct MemInner {
    reviews: RwLock<Vec<ReviewRecord>>,
    providers: RwLock<HashMap<ProviderId, Provider>>,
    profiles: RwLock<HashMap<UserId, Profile>>,
    faults: Faults,
}

#[derive(Default)]
struct Faults {
    review_reads: AtomicUsize,
    review_appends: AtomicUsize,
    provider_reads: AtomicUsize,
    provider_writes: AtomicUsize,
}

fn take_fault(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| {
            value.checked_sub(1)
        })
        .is_ok()
}

fn unavailable(what: &str) -> StoreError {
    StoreError::Unavailable {
        message: format!("injected {what} failure"),
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_provider(&self, provider: Provider) {
        self.inner
            .providers
            .write()
            .expect("providers lock poisoned")
            .insert(provider.id.clone(), provider);
    }

    pub fn put_profile(&self, profile: Profile) {
        self.inner
            .profiles
            .write()
            .expect("profiles lock poisoned")
            .insert(profile.user_id.clone(), profile);
    }

    /// Insert a record verbatim, bypassing the append path. Lets tests seed
    /// malformed-but-storable documents such as blank reviewer names.
    pub fn push_review(&self, record: ReviewRecord) {
        self.inner
            .reviews
            .write()
            .expect("reviews lock poisoned")
            .push(record);
    }

    pub fn review_count(&self) -> usize {
        self.inner
            .reviews
            .read()
            .expect("reviews lock poisoned")
            .len()
    }

    pub fn provider(&self, id: &ProviderId) -> Option<Provider> {
        self.inner
            .providers
            .read()
            .expect("providers lock poisoned")
            .get(id)
            .cloned()
    }

    pub fn fail_next_review_reads(&self, count: usize) {
        self.inner
            .faults
            .review_reads
            .store(count, Ordering::SeqCst);
    }

    pub fn fail_next_appends(&self, count: usize) {
        self.inner
            .faults
            .review_appends
            .store(count, Ordering::SeqCst);
    }

    pub fn fail_next_provider_reads(&self, count: usize) {
        self.inner
            .faults
            .provider_reads
            .store(count, Ordering::SeqCst);
    }

    pub fn fail_next_provider_writes(&self, count: usize) {
        self.inner
            .faults
            .provider_writes
            .store(count, Ordering::SeqCst);
    }
}

impl ReviewStore for MemStore {
    async fn append_review(&self, input: NewReview) -> Result<ReviewRecord, StoreError> {
        if take_fault(&self.inner.faults.review_appends) {
            return Err(unavailable("append"));
        }
        let record = input.into_record(ReviewId::generate());
        self.inner
            .reviews
            .write()
            .expect("reviews lock poisoned")
            .push(record.clone());
        Ok(record)
    }

    async fn reviews_for_provider(
        &self,
        provider_id: &ProviderId,
        limit: usize,
    ) -> Result<Vec<ReviewRecord>, StoreError> {
        if take_fault(&self.inner.faults.review_reads) {
            return Err(unavailable("review read"));
        }
        let mut reviews: Vec<ReviewRecord> = self
            .inner
            .reviews
            .read()
            .expect("reviews lock poisoned")
            .iter()
            .filter(|record| &record.provider_id == provider_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(limit);
        Ok(reviews)
    }
}

impl ProviderStore for MemStore {
    async fn provider(&self, id: &ProviderId) -> Result<Option<Provider>, StoreError> {
        if take_fault(&self.inner.faults.provider_reads) {
            return Err(unavailable("provider read"));
        }
        Ok(self
            .inner
            .providers
            .read()
            .expect("providers lock poisoned")
            .get(id)
            .cloned())
    }

    async fn merge_aggregate(
        &self,
        id: &ProviderId,
        aggregate: &ProviderAggregate,
    ) -> Result<(), StoreError> {
        if take_fault(&self.inner.faults.provider_writes) {
            return Err(unavailable("provider update"));
        }
        let mut providers = self
            .inner
            .providers
            .write()
            .expect("providers lock poisoned");
        let Some(provider) = providers.get_mut(id) else {
            return Err(StoreError::NotFound);
        };
        provider.aggregate = Some(aggregate.clone());
        Ok(())
    }
}

impl ProfileStore for MemStore {
    async fn profile(&self, user_id: &UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .inner
            .profiles
            .read()
            .expect("profiles lock poisoned")
            .get(user_id)
            .cloned())
    }
}

/// In-memory auth collaborator for the dev server and tests.
#[derive(Clone, Default)]
pub struct MemSessions {
    inner: Arc<RwLock<Option<Session>>>,
}

impl MemSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, session: Session) {
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }
}

impl SessionProvider for MemSessions {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.inner.read().expect("session lock poisoned").clone())
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        *self.inner.write().expect("session lock poisoned") = None;
        Ok(())
    }
}
