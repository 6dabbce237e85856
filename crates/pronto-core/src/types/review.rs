use crate::types::ids::{ProviderId, ReviewId, ServiceId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A 1-5 star rating. Out-of-range values, including the 0 "unselected"
/// sentinel, are rejected at construction and at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = u8)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        })
    }
}

/// One rating event. Immutable once appended; never updated or deleted by
/// this workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewRecord {
    pub id: ReviewId,
    pub provider_id: ProviderId,
    pub reviewer_id: UserId,
    pub reviewer_name: String,
    pub reviewer_contact: Option<String>,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub service_id: Option<ServiceId>,
}

/// A review as handed to the store for appending; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewReview {
    pub provider_id: ProviderId,
    pub reviewer_id: UserId,
    pub reviewer_name: String,
    pub reviewer_contact: Option<String>,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub service_id: Option<ServiceId>,
}

impl NewReview {
    pub fn into_record(self, id: ReviewId) -> ReviewRecord {
        ReviewRecord {
            id,
            provider_id: self.provider_id,
            reviewer_id: self.reviewer_id,
            reviewer_name: self.reviewer_name,
            reviewer_contact: self.reviewer_contact,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
            service_id: self.service_id,
        }
    }
}

/// Per-star tally for the display stats block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StarCount {
    pub stars: u8,
    pub count: u64,
}

/// Display-only statistics computed over the fetched review window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewStats {
    pub mean: f64,
    pub count: u64,
    pub distribution: Vec<StarCount>,
}
