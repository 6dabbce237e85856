use chrono::Utc;
use pronto_core::error::CacheError;
use pronto_core::store::IdentityCache;
use pronto_core::types::CachedIdentity;
use rusqlite::Connection;
use std::sync::Mutex;

/// Local fallback identity storage backed by sqlite, the equivalent of the
/// browser-side profile cache. Holds a single slot for the acting user.
pub struct ProfileCache {
    conn: Mutex<Connection>,
}

impl ProfileCache {
    pub fn open(path: &str) -> Result<Self, CacheError> {
        let conn = Connection::open(path).map_err(open_failed)?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory().map_err(open_failed)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, CacheError> {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(open_failed)?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(open_failed)?;
        conn.execute_batch(include_str!("../migrations/0001_init.sql"))
            .map_err(open_failed)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn open_failed(err: rusqlite::Error) -> CacheError {
    CacheError::OpenFailed {
        message: err.to_string(),
    }
}

impl IdentityCache for ProfileCache {
    fn load(&self) -> Result<Option<CachedIdentity>, CacheError> {
        let conn = self.conn.lock().expect("cache lock poisoned");
        let mut stmt = conn
            .prepare("SELECT user_id, display_name, email FROM cached_identity WHERE slot = 'me'")
            .map_err(|err| CacheError::ReadFailed {
                message: err.to_string(),
            })?;
        let mut rows = stmt.query([]).map_err(|err| CacheError::ReadFailed {
            message: err.to_string(),
        })?;
        let Some(row) = rows.next().map_err(|err| CacheError::ReadFailed {
            message: err.to_string(),
        })?
        else {
            return Ok(None);
        };
        let read = |index: usize| -> Result<Option<String>, CacheError> {
            row.get(index).map_err(|err| CacheError::ReadFailed {
                message: err.to_string(),
            })
        };
        Ok(Some(CachedIdentity {
            user_id: read(0)?,
            display_name: read(1)?,
            email: read(2)?,
        }))
    }

    fn save(&self, identity: &CachedIdentity) -> Result<(), CacheError> {
        let conn = self.conn.lock().expect("cache lock poisoned");
        conn.execute(
            "INSERT INTO cached_identity (slot, user_id, display_name, email, updated_at)
             VALUES ('me', ?1, ?2, ?3, ?4)
             ON CONFLICT(slot) DO UPDATE SET
                 user_id = excluded.user_id,
                 display_name = excluded.display_name,
                 email = excluded.email,
                 updated_at = excluded.updated_at",
            (
                identity.user_id.as_deref(),
                identity.display_name.as_deref(),
                identity.email.as_deref(),
                Utc::now().to_rfc3339(),
            ),
        )
        .map_err(|err| CacheError::WriteFailed {
            message: err.to_string(),
        })?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let conn = self.conn.lock().expect("cache lock poisoned");
        conn.execute("DELETE FROM cached_identity", [])
            .map_err(|err| CacheError::WriteFailed {
                message: err.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(user_id: Option<&str>, name: Option<&str>) -> CachedIdentity {
        CachedIdentity {
            user_id: user_id.map(str::to_string),
            display_name: name.map(str::to_string),
            email: None,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let cache = ProfileCache::in_memory().unwrap();
        assert_eq!(cache.load().unwrap(), None);

        cache.save(&cached(Some("u1"), Some("Maria"))).unwrap();
        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.user_id.as_deref(), Some("u1"));
        assert_eq!(loaded.display_name.as_deref(), Some("Maria"));
    }

    #[test]
    fn save_overwrites_the_single_slot() {
        let cache = ProfileCache::in_memory().unwrap();
        cache.save(&cached(Some("u1"), Some("Maria"))).unwrap();
        cache.save(&cached(Some("u2"), None)).unwrap();
        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.user_id.as_deref(), Some("u2"));
        assert_eq!(loaded.display_name, None);
    }

    #[test]
    fn open_failure_is_reported_as_such() {
        let result = ProfileCache::open("/nonexistent-pronto-dir/identity.db");
        assert!(matches!(result, Err(CacheError::OpenFailed { .. })));
    }

    #[test]
    fn clear_removes_the_identity() {
        let cache = ProfileCache::in_memory().unwrap();
        cache.save(&cached(Some("u1"), None)).unwrap();
        cache.clear().unwrap();
        assert_eq!(cache.load().unwrap(), None);
    }
}
