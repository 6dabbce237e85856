use crate::types::ids::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_DISPLAY_NAME: &str = "Customer";

/// The acting user as resolved for the current page view. A missing
/// `user_id` means no session and no cached identifier; submission is
/// refused for such identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub user_id: Option<UserId>,
    pub display_name: String,
    pub contact: Option<String>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            contact: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Claims supplied by the auth collaborator for an active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// The richer profile document kept in the users collection. Preferred over
/// bare session claims when retrievable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Locally persisted identity fields, used only when no session exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CachedIdentity {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}
