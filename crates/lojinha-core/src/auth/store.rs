use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Token file name in the data directory
const TOKEN_FILE: &str = "auth_token";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read token: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write token: {0}")]
    Write(#[source] io::Error),

    #[error("failed to clear token: {0}")]
    Clear(#[source] io::Error),
}

/// Durable storage for the single auth credential.
///
/// Exactly one token is persisted at a time; an absent file means
/// "unauthenticated". All operations are async and there is no in-memory
/// caching, so every reader observes the latest durable value.
#[derive(Debug, Clone)]
pub struct TokenStore {
    data_dir: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }

    /// Read the stored credential. Absence is `Ok(None)`, not an error.
    pub async fn get(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.token_path()).await {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    /// Persist the credential, replacing any previous one.
    pub async fn set(&self, token: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(StoreError::Write)?;
        tokio::fs::write(self.token_path(), token)
            .await
            .map_err(StoreError::Write)
    }

    /// Remove the credential. Clearing an absent token succeeds (idempotent).
    pub async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.token_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Clear(e)),
        }
    }

    /// Remove the credential only if it still equals `expected`.
    ///
    /// Used by the dispatcher when a request comes back 401: if a new login
    /// replaced the token while that request was in flight, the newer
    /// credential must survive.
    pub async fn clear_if(&self, expected: &str) -> Result<(), StoreError> {
        match self.get().await {
            Ok(Some(current)) if current == expected => self.clear().await,
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
