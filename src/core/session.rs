//! Persisted session state over a pluggable key/value backend

use miette::Diagnostic;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::auth::{PendingSignup, User};

/// Key holding the signed-in user
pub const USER_KEY: &str = "rfp_user";

/// Key holding a signup awaiting its first login
pub const SIGNUP_KEY: &str = "rfp_signup_data";

#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("failed to access session file {path:?}")]
    #[diagnostic(code(rfp::session::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session data is corrupt")]
    #[diagnostic(
        code(rfp::session::corrupt),
        help("run 'rfp auth logout' to reset the session")
    )]
    Corrupt(#[from] serde_json::Error),
}

/// String key/value storage backing a session
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SessionError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Typed access to the session keys
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn user(&self) -> Result<Option<User>, SessionError> {
        self.read(USER_KEY)
    }

    pub fn set_user(&mut self, user: &User) -> Result<(), SessionError> {
        self.write(USER_KEY, user)
    }

    pub fn pending_signup(&self) -> Result<Option<PendingSignup>, SessionError> {
        self.read(SIGNUP_KEY)
    }

    pub fn set_pending_signup(&mut self, signup: &PendingSignup) -> Result<(), SessionError> {
        self.write(SIGNUP_KEY, signup)
    }

    pub fn clear_pending_signup(&mut self) -> Result<(), SessionError> {
        self.storage.remove(SIGNUP_KEY)
    }

    /// Remove both the user and any pending signup
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.storage.remove(USER_KEY)?;
        self.storage.remove(SIGNUP_KEY)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        match self.storage.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)?;
        self.storage.set(key, raw)
    }
}
