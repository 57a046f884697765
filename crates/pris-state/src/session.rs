//! Signed-in user, as recorded by the identity provider

use crate::storage::{SharedStore, StorageError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key the identity provider writes the active user under
pub const SESSION_KEY: &str = "prissjekk-user";

/// Opaque user identifier issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default, rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            first_name: None,
            username: None,
        }
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Name used in greetings
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

/// Port to the identity provider's session record
pub trait SessionSource: Send + Sync {
    fn current(&self) -> Result<Option<SessionUser>, StorageError>;
    fn sign_in(&self, user: &SessionUser) -> Result<(), StorageError>;
    fn sign_out(&self) -> Result<(), StorageError>;
}

pub type SharedSession = Arc<dyn SessionSource>;

/// Session record kept as JSON in a key-value store
#[derive(Clone)]
pub struct StoredSession {
    store: SharedStore,
}

impl StoredSession {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl SessionSource for StoredSession {
    fn current(&self) -> Result<Option<SessionUser>, StorageError> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Malformed {
                key: SESSION_KEY.to_string(),
                reason: e.to_string(),
            })
    }

    fn sign_in(&self, user: &SessionUser) -> Result<(), StorageError> {
        let json = serde_json::to_string(user).map_err(|e| StorageError::Backend(e.to_string()))?;
        self.store.set(SESSION_KEY, &json)
    }

    fn sign_out(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY)
    }
}
