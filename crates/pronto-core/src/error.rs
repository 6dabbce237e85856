use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("provider id is required")]
    MissingTarget,
    #[error("rating must be between 1 and 5 stars, got {value}")]
    InvalidRating { value: i32 },
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },
}

/// Recomputation-only failures. Never fatal to a submission: the review
/// record is already durable by the time recomputation runs.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("failed to fetch reviews: {message}")]
    FetchFailed { message: String },
    #[error("failed to update aggregate: {message}")]
    UpdateFailed { message: String },
    #[error("provider not found")]
    ProviderNotFound,
}

/// Failures at the remote document-store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },
    #[error("document not found")]
    NotFound,
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("auth backend unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache open failed: {message}")]
    OpenFailed { message: String },
    #[error("cache read failed: {message}")]
    ReadFailed { message: String },
    #[error("cache write failed: {message}")]
    WriteFailed { message: String },
}

#[derive(Debug, Error)]
pub enum ProntoError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("internal error: {message}")]
    Internal { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_messages_are_transparent() {
        let err: ProntoError = CacheError::WriteFailed {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "cache write failed: disk full");

        let err: ProntoError = SubmissionError::AuthenticationRequired.into();
        assert_eq!(err.to_string(), "authentication required");
    }
}
