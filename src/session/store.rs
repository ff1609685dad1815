//! Session token storage on top of the cookie jar.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::cookie::CookieJar;
use crate::api::Session;
use crate::config::SessionConfig;
use crate::Result;

/// Holds the session token cookie, optionally persisted to a file.
#[derive(Debug)]
pub struct SessionStore {
    jar: Mutex<CookieJar>,
    cookie_name: String,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// Create a store that keeps cookies in memory only.
    pub fn in_memory(cookie_name: impl Into<String>) -> Self {
        Self {
            jar: Mutex::new(CookieJar::new()),
            cookie_name: cookie_name.into(),
            file: None,
        }
    }

    /// Open the store described by the configuration, loading any saved cookies.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        if config.cookie_file.is_empty() {
            return Ok(Self::in_memory(config.cookie_name.clone()));
        }
        let file = PathBuf::from(&config.cookie_file);
        let jar = CookieJar::load(&file)?;
        debug!(path = %file.display(), cookies = jar.len(), "cookie jar loaded");
        Ok(Self {
            jar: Mutex::new(jar),
            cookie_name: config.cookie_name.clone(),
            file: Some(file),
        })
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// The stored session token, if any and unexpired.
    pub fn token(&self) -> Option<String> {
        let token = self.lock().get_cookie(&self.cookie_name);
        (!token.is_empty()).then_some(token)
    }

    /// Store a session's token with the session's expiry.
    pub fn store(&self, session: &Session) -> Result<()> {
        let mut jar = self.lock();
        jar.set_cookie(&self.cookie_name, &session.id, session.expires)?;
        info!(expires = session.expires, "session stored");
        self.persist(&jar)
    }

    /// Delete the session cookie.
    pub fn clear(&self) -> Result<()> {
        let mut jar = self.lock();
        jar.del_cookie(&self.cookie_name)?;
        info!("session cleared");
        self.persist(&jar)
    }

    fn persist(&self, jar: &CookieJar) -> Result<()> {
        match &self.file {
            Some(path) => jar.save(path),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CookieJar> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(id: &str, expires: i64) -> Session {
        Session {
            id: id.to_string(),
            user_id: "u1".to_string(),
            created: 0,
            expires,
        }
    }

    #[test]
    fn test_store_and_clear() {
        let store = SessionStore::in_memory("sess");
        assert_eq!(store.token(), None);

        store
            .store(&session("abc", Utc::now().timestamp() + 3600))
            .unwrap();
        assert_eq!(store.token(), Some("abc".to_string()));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_store_expired_session_keeps_nothing() {
        let store = SessionStore::in_memory("sess");
        store.store(&session("abc", 1)).unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_persisted_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            cookie_name: "sess".to_string(),
            cookie_file: dir.path().join("cookies.txt").display().to_string(),
        };

        let store = SessionStore::open(&config).unwrap();
        store
            .store(&session("persisted", Utc::now().timestamp() + 3600))
            .unwrap();

        let reopened = SessionStore::open(&config).unwrap();
        assert_eq!(reopened.token(), Some("persisted".to_string()));

        reopened.clear().unwrap();
        let reopened = SessionStore::open(&config).unwrap();
        assert_eq!(reopened.token(), None);
    }

    #[test]
    fn test_open_without_file_is_in_memory() {
        let config = SessionConfig {
            cookie_name: "sess".to_string(),
            cookie_file: String::new(),
        };
        let store = SessionStore::open(&config).unwrap();
        assert_eq!(store.cookie_name(), "sess");
        assert_eq!(store.token(), None);
    }
}
