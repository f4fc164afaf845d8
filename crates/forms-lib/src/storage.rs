// ============================
// authforms-lib/src/storage.rs
// ============================
//! User lookups behind a trait, with in-memory and flat-file implementations.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use authforms_common::{User, UserId};
use dashmap::DashMap;
use tokio::fs as tokio_fs;

use crate::error::AppError;

/// Read access to stored accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the account with exactly this name
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError>;

    /// Find the account with exactly this email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        (**self).find_by_name(name).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        (**self).find_by_email(email).await
    }
}

/// In-memory store, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account, keyed by id
    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn remove(&self, id: UserId) -> Option<User> {
        self.users.remove(&id).map(|(_, user)| user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
    }
}

impl FromIterator<User> for MemoryUserStore {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let store = Self::new();
        for user in iter {
            store.insert(user);
        }
        store
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        Ok(self.find(|user| user.name == name))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.find(|user| user.email == email))
    }
}

/// Flat-file implementation: a JSON array of users, read on every lookup
#[derive(Debug, Clone)]
pub struct FlatFileUserStore {
    path: PathBuf,
}

impl FlatFileUserStore {
    /// Open a store at `path`; a missing file is an empty store
    pub fn new<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored account
    pub async fn load_all(&self) -> Result<Vec<User>, AppError> {
        if !tokio_fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let content = tokio_fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "malformed user store");
            AppError::Store(format!("{}: {e}", self.path.display()))
        })
    }

    /// Replace the file contents with `users`
    pub async fn write_all(&self, users: &[User]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(users)?;
        tokio_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Insert or replace an account, keyed by id
    pub async fn upsert(&self, user: User) -> Result<(), AppError> {
        let mut users = self.load_all().await?;
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
        self.write_all(&users).await
    }
}

#[async_trait]
impl UserStore for FlatFileUserStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|user| user.name == name))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|user| user.email == email))
    }
}
