use crate::store::{IdentityCache, ProfileStore, SessionProvider};
use crate::types::{CachedIdentity, Identity, Profile, Session, UserId, DEFAULT_DISPLAY_NAME};

/// Resolve the acting user: an authenticated session enriched by its profile
/// document when retrievable, else bare session claims, else the locally
/// cached fallback, else anonymous. Reads only; never writes the cache.
pub async fn resolve_identity<S, A, C>(store: &S, sessions: &A, cache: &C) -> Identity
where
    S: ProfileStore + Sync,
    A: SessionProvider,
    C: IdentityCache,
{
    let session = match sessions.current_session().await {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(error = %err, "auth backend unreachable, falling back to cached identity");
            None
        }
    };

    if let Some(session) = session {
        return match store.profile(&session.user_id).await {
            Ok(Some(profile)) => from_profile(session, profile),
            Ok(None) => from_session(session),
            Err(err) => {
                tracing::debug!(error = %err, "profile fetch failed, using bare session claims");
                from_session(session)
            }
        };
    }

    match cache.load() {
        Ok(Some(cached)) => from_cached(cached),
        Ok(None) => Identity::anonymous(),
        Err(err) => {
            tracing::warn!(error = %err, "identity cache unreadable");
            Identity::anonymous()
        }
    }
}

fn from_profile(session: Session, profile: Profile) -> Identity {
    Identity {
        user_id: Some(session.user_id),
        display_name: profile
            .display_name
            .or(session.display_name)
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        contact: profile.email.or(session.email),
    }
}

fn from_session(session: Session) -> Identity {
    Identity {
        user_id: Some(session.user_id),
        display_name: session
            .display_name
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        contact: session.email,
    }
}

fn from_cached(cached: CachedIdentity) -> Identity {
    Identity {
        user_id: cached.user_id.and_then(|raw| UserId::new(raw).ok()),
        display_name: cached
            .display_name
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        contact: cached.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_fields_win_over_claims() {
        let session = Session {
            user_id: UserId::new("u1").unwrap(),
            display_name: Some("claims name".to_string()),
            email: Some("claims@example.com".to_string()),
        };
        let profile = Profile {
            user_id: UserId::new("u1").unwrap(),
            display_name: Some("profile name".to_string()),
            email: None,
            phone: None,
            location: None,
        };
        let identity = from_profile(session, profile);
        assert_eq!(identity.display_name, "profile name");
        assert_eq!(identity.contact.as_deref(), Some("claims@example.com"));
    }

    #[test]
    fn cached_identity_without_id_stays_unauthenticated() {
        let identity = from_cached(CachedIdentity {
            user_id: None,
            display_name: Some("Maria".to_string()),
            email: None,
        });
        assert!(!identity.is_authenticated());
        assert_eq!(identity.display_name, "Maria");
    }

    #[test]
    fn blank_cached_name_falls_back_to_default() {
        let identity = from_cached(CachedIdentity {
            user_id: Some("u2".to_string()),
            display_name: Some("  ".to_string()),
            email: None,
        });
        assert!(identity.is_authenticated());
        assert_eq!(identity.display_name, DEFAULT_DISPLAY_NAME);
    }
}
