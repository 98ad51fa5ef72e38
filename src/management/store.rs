use std::{future::Future, path::PathBuf, sync::Mutex};

use crate::{error::StoreError, management::Token};

/// Fixed key under which the single token record lives.
pub const TOKEN_KEY: &str = "spotclean-token";

/// Durable single-record persistence for the [`Token`].
///
/// `get` never fails: a missing or undecodable record reads as "no token".
pub trait CredentialStore: Send + Sync {
    fn set(&self, token: &Token) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn get(&self) -> impl Future<Output = Option<Token>> + Send;
    fn delete(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Stores the token as JSON in the local data directory.
///
/// Writes go to a sibling temp file that is renamed over the record, so a
/// crash mid-write leaves either the old or the new token, never a mix.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        FileCredentialStore { path }
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self::new(dir.join(format!("{TOKEN_KEY}.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!("spotclean/cache/{TOKEN_KEY}.json"));
        path
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl CredentialStore for FileCredentialStore {
    async fn set(&self, token: &Token) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(token)?;
        let tmp = self.temp_path();
        async_fs::write(&tmp, json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            async_fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;
        }

        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn get(&self) -> Option<Token> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Cannot read stored token at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!("Ignoring undecodable stored token: {}", e);
                None
            }
        }
    }

    async fn delete(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

/// Process-local store holding the serialized record, for embedding and tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &Token) -> Result<Self, StoreError> {
        let json = serde_json::to_string(token)?;
        Ok(MemoryCredentialStore {
            slot: Mutex::new(Some(json)),
        })
    }

    /// Replaces the raw record, bypassing serialization.
    pub fn put_raw(&self, raw: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw.to_string());
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn set(&self, token: &Token) -> Result<(), StoreError> {
        let json = serde_json::to_string(token)?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(json);
        }
        Ok(())
    }

    async fn get(&self) -> Option<Token> {
        let raw = self.slot.lock().ok()?.clone()?;
        serde_json::from_str(&raw).ok()
    }

    async fn delete(&self) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
