use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw submission payload as received from the outer surface. Validated
/// field by field before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewInput {
    pub provider_id: String,
    /// 0 is the "unselected" star widget sentinel and is always rejected.
    pub rating: i32,
    pub comment: Option<String>,
    pub service_id: Option<String>,
}
