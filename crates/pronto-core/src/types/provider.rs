use crate::types::ids::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PROVIDER_NAME: &str = "Provider";
pub const DEFAULT_CATEGORY: &str = "Service";

/// Cached rating summary attached to a provider document. Derived entirely
/// from the provider's review records; rebuilt by a full re-scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProviderAggregate {
    /// Mean rating, rounded to one decimal for storage and display.
    pub mean: f64,
    pub count: u64,
    pub recomputed_at: DateTime<Utc>,
}

/// A service-offering entity as stored in the providers collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub aggregate: Option<ProviderAggregate>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Display card for a provider. Falls back to static defaults when the store
/// read fails or the document is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProviderSummary {
    pub id: ProviderId,
    pub name: String,
    pub category: String,
    pub mean: f64,
    pub count: u64,
}

impl ProviderSummary {
    pub fn from_provider(provider: Provider) -> Self {
        let (mean, count) = provider
            .aggregate
            .map(|aggregate| (aggregate.mean, aggregate.count))
            .unwrap_or((0.0, 0));
        Self {
            id: provider.id,
            name: provider.name,
            category: provider.category,
            mean,
            count,
        }
    }

    pub fn fallback(id: ProviderId, name: Option<&str>) -> Self {
        Self {
            id,
            name: name
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(DEFAULT_PROVIDER_NAME)
                .to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            mean: 0.0,
            count: 0,
        }
    }
}
