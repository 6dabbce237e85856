pub mod identity;
pub mod ids;
pub mod io;
pub mod provider;
pub mod review;

pub use identity::{CachedIdentity, Identity, Profile, Session, DEFAULT_DISPLAY_NAME};
pub use ids::{IdError, ProviderId, ReviewId, ServiceId, UserId};
pub use io::SubmitReviewInput;
pub use provider::{Provider, ProviderAggregate, ProviderSummary};
pub use review::{NewReview, Rating, ReviewRecord, ReviewStats, StarCount};
