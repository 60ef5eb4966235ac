//! Persisted login session
//!
//! The session file is a small JSON key/value document. The logged-in
//! account lives under the `user` key as `{access_token, user}`; other keys
//! are preserved untouched on write.

use hkadm_common::config::write_atomic;
use hkadm_common::models::{LoginResponse, User};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::Result;

/// Key under which the session entry is stored
pub const SESSION_KEY: &str = "user";

/// File-backed session holder
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<LoginResponse>>,
}

impl SessionStore {
    /// Load the session file
    ///
    /// A missing file means "logged out". An unreadable or malformed `user`
    /// entry is discarded with a warning and removed from the file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match read_entries(&path) {
            Ok(mut entries) => match entries.get(SESSION_KEY).cloned() {
                None => None,
                Some(value) => match serde_json::from_value::<LoginResponse>(value) {
                    Ok(session) => {
                        debug!(email = %session.user.email, "Restored session");
                        Some(session)
                    }
                    Err(e) => {
                        warn!(path = %path.display(), "Discarding malformed session entry: {}", e);
                        entries.remove(SESSION_KEY);
                        if let Err(e) = write_entries(&path, &entries) {
                            warn!("Could not rewrite session file: {}", e);
                        }
                        None
                    }
                },
            },
            Err(e) => {
                warn!(path = %path.display(), "Ignoring unreadable session file: {}", e);
                None
            }
        };

        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn current(&self) -> Option<LoginResponse> {
        self.current.read().await.clone()
    }

    /// Bearer token of the logged-in account
    pub async fn token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub async fn user(&self) -> Option<User> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_admin(&self) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.user.is_admin())
    }

    /// Store a fresh login
    pub async fn save(&self, session: LoginResponse) -> Result<()> {
        let mut current = self.current.write().await;
        let mut entries = read_entries(&self.path).unwrap_or_default();
        entries.insert(
            SESSION_KEY.to_string(),
            serde_json::to_value(&session).map_err(hkadm_common::Error::from)?,
        );
        write_entries(&self.path, &entries)?;
        *current = Some(session);
        Ok(())
    }

    /// Replace the stored user record, keeping the token
    pub async fn update_user(&self, user: User) -> Result<()> {
        let session = match self.current().await {
            Some(session) => LoginResponse { user, ..session },
            None => return Ok(()),
        };
        self.save(session).await
    }

    /// Forget the logged-in account
    pub async fn clear(&self) -> Result<()> {
        let mut current = self.current.write().await;
        if self.path.exists() {
            let mut entries = read_entries(&self.path).unwrap_or_default();
            if entries.remove(SESSION_KEY).is_some() {
                write_entries(&self.path, &entries)?;
            }
        }
        *current = None;
        Ok(())
    }
}

fn read_entries(path: &Path) -> hkadm_common::Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(hkadm_common::Error::InvalidInput(
            "session file is not a JSON object".to_string(),
        )),
    }
}

fn write_entries(path: &Path, entries: &Map<String, Value>) -> hkadm_common::Result<()> {
    let content = serde_json::to_vec_pretty(entries)?;
    write_atomic(path, &content)
}
