use std::time::Duration;

/// Soft cap on how many reviews one recomputation or display fetch pulls.
/// An aggregation-input limit, not a hard correctness bound.
pub const DEFAULT_FETCH_LIMIT: usize = 50;
pub const DEFAULT_RECOMPUTE_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct ProntoConfig {
    pub fetch_limit: usize,
    /// Attempts for maintenance-mode recomputation only; the post-submission
    /// path always performs a single attempt.
    pub recompute_attempts: u32,
    pub retry_backoff: Duration,
}

impl Default for ProntoConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            recompute_attempts: DEFAULT_RECOMPUTE_ATTEMPTS,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl ProntoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let fetch_limit = std::env::var("PRONTO_FETCH_LIMIT")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.fetch_limit);
        let recompute_attempts = std::env::var("PRONTO_RECOMPUTE_RETRIES")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.recompute_attempts);
        let retry_backoff = std::env::var("PRONTO_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_backoff);
        Self {
            fetch_limit,
            recompute_attempts,
            retry_backoff,
        }
    }
}
