use crate::error::SubmissionError;
use crate::types::{Identity, ProviderId, Rating, UserId};

pub fn validate_provider_id(raw: &str) -> Result<ProviderId, SubmissionError> {
    ProviderId::new(raw.trim()).map_err(|_| SubmissionError::MissingTarget)
}

/// 0 is the star widget's "unselected" sentinel; it is rejected like any
/// other out-of-range value, never treated as a valid low score.
pub fn validate_rating(value: i32) -> Result<Rating, SubmissionError> {
    u8::try_from(value)
        .ok()
        .and_then(Rating::new)
        .ok_or(SubmissionError::InvalidRating { value })
}

pub fn validate_reviewer(identity: &Identity) -> Result<UserId, SubmissionError> {
    identity
        .user_id
        .clone()
        .ok_or(SubmissionError::AuthenticationRequired)
}

/// Trimmed, empty collapsed to `None`, otherwise stored as given. No length
/// cap; the source behavior never defined one.
pub fn normalize_comment(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_ratings() {
        for value in [-1, 0, 6, 100] {
            assert!(matches!(
                validate_rating(value),
                Err(SubmissionError::InvalidRating { value: v }) if v == value
            ));
        }
    }

    #[test]
    fn accepts_star_range() {
        for value in 1..=5 {
            assert_eq!(validate_rating(value).unwrap().get(), value as u8);
        }
    }

    #[test]
    fn empty_provider_id_is_missing_target() {
        assert!(matches!(
            validate_provider_id("  "),
            Err(SubmissionError::MissingTarget)
        ));
        assert_eq!(validate_provider_id("prv-1").unwrap().as_str(), "prv-1");
    }

    #[test]
    fn anonymous_identity_requires_authentication() {
        assert!(matches!(
            validate_reviewer(&Identity::anonymous()),
            Err(SubmissionError::AuthenticationRequired)
        ));
    }

    #[test]
    fn comments_are_trimmed_and_empty_dropped() {
        assert_eq!(normalize_comment(None), None);
        assert_eq!(normalize_comment(Some("   ")), None);
        assert_eq!(
            normalize_comment(Some("  great service  ")),
            Some("great service".to_string())
        );
    }
}
