//! Key/value stores for persisted client state.
//!
//! A client keeps two stores: a durable one (the equivalent of browser
//! `localStorage`) and a session-scoped one (`sessionStorage`). The remember
//! flag always lives in the durable store and decides which of the two holds
//! the bearer token.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::User;

pub const TOKEN_KEY: &str = "token";
pub const REMEMBER_KEY: &str = "rememberLogin";
/// Serialized profile written by older front-end builds; cleared with the token
pub const LEGACY_USER_KEY: &str = "user";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Used as the session-scoped store: it dies with the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Durable store backed by a single JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like `load`, but an unparseable file counts as empty so a write can
    /// replace it.
    async fn load_for_write(&self) -> Result<HashMap<String, String>, StorageError> {
        match self.load().await {
            Err(StorageError::Format(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Replacing unreadable storage file");
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut entries = self.load_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut entries = match self.load().await {
            Err(StorageError::Format(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Resetting unreadable storage file");
                return self.save(&HashMap::new()).await;
            }
            other => other?,
        };
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

/// Bearer-token persistence over a durable and a session-scoped store.
#[derive(Clone)]
pub struct TokenStorage {
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl TokenStorage {
    pub fn new(local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Both stores in memory; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    pub fn local(&self) -> &Arc<dyn KeyValueStore> {
        &self.local
    }

    pub fn session(&self) -> &Arc<dyn KeyValueStore> {
        &self.session
    }

    pub async fn remembered(&self) -> Result<bool, StorageError> {
        Ok(matches!(self.local.get(REMEMBER_KEY).await?.as_deref(), Some("true")))
    }

    /// Token from whichever store the remember flag selects.
    pub async fn resolve_token(&self) -> Result<Option<String>, StorageError> {
        let store = if self.remembered().await? { &self.local } else { &self.session };
        Ok(store.get(TOKEN_KEY).await?.filter(|t| !t.is_empty()))
    }

    pub async fn store(&self, token: &str, remember: bool, user: Option<&User>) -> Result<(), StorageError> {
        // Drop any token left in the other store so resolution stays unambiguous
        self.clear().await?;

        let store = if remember { &self.local } else { &self.session };
        store.set(TOKEN_KEY, token).await?;
        self.local.set(REMEMBER_KEY, if remember { "true" } else { "false" }).await?;

        if let Some(user) = user {
            let json = serde_json::to_string(user)?;
            store.set(LEGACY_USER_KEY, &json).await?;
        }
        Ok(())
    }

    /// Removes token, remember flag and legacy profile from both stores.
    ///
    /// Every removal is attempted; the first failure is reported after the rest
    /// have run.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for store in [&self.local, &self.session] {
            for key in [TOKEN_KEY, REMEMBER_KEY, LEGACY_USER_KEY] {
                if let Err(e) = store.remove(key).await {
                    tracing::warn!(key, error = %e, "Failed to remove stored credential");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
