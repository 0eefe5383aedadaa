//! Account, file and session storage.
//!
//! Locking:
//! - `accounts` is held for writing across the whole of `register`, so two
//!   racing registrations of one username cannot both succeed.
//! - `sessions` is held for writing while a token is minted and recorded.
//! - each account's file set has its own lock, so writers on different
//!   accounts never contend.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::validation;

/// In-memory store of accounts, their files, and login sessions.
pub struct Store {
    /// Registered accounts keyed by username
    accounts: RwLock<HashMap<String, Arc<Account>>>,
    /// Active sessions keyed by token
    sessions: RwLock<HashMap<String, Arc<Account>>>,
}

/// A registered account and the files it owns.
struct Account {
    username: String,
    /// Stored verbatim, compared byte-for-byte
    password: String,
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl Account {
    fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            files: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    // --- Accounts ---

    /// Register a new account with an empty file set.
    ///
    /// An existing username is reported as [`StoreError::AlreadyExists`]
    /// before the fields are validated.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        let mut accounts = write(&self.accounts);

        if accounts.contains_key(username) {
            tracing::debug!(username, "Registration rejected: username taken");
            return Err(StoreError::AlreadyExists);
        }

        if let Err(e) = validation::validate_credentials(username, password) {
            tracing::debug!(username, "Registration rejected: invalid fields");
            return Err(e);
        }

        accounts.insert(
            username.to_string(),
            Arc::new(Account::new(username, password)),
        );
        tracing::info!(username, "Registered account");
        Ok(())
    }

    /// Authenticate and open a new session, returning its token.
    ///
    /// Every call mints a fresh token; earlier sessions stay valid.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let account = read(&self.accounts).get(username).cloned();

        let account = match account {
            Some(account) if account.password == password => account,
            _ => {
                tracing::debug!(username, "Login rejected");
                return Err(StoreError::InvalidCredentials);
            }
        };

        let mut sessions = write(&self.sessions);
        let token = loop {
            let candidate = Uuid::new_v4().to_string();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(token.clone(), account);

        tracing::info!(username, "Opened session");
        Ok(token)
    }

    /// Username owning a session, without touching any file.
    pub fn session_owner(&self, token: &str) -> Result<String> {
        Ok(self.resolve(token)?.username.clone())
    }

    // --- Files ---

    /// Create or overwrite a file owned by the session's account.
    ///
    /// Returns the owning username.
    pub fn put_file(
        &self,
        token: &str,
        filename: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<String> {
        let account = self.resolve(token)?;
        let content = content.into();
        let size = content.len();

        let replaced = write(&account.files)
            .insert(filename.to_string(), content)
            .is_some();

        tracing::debug!(
            owner = %account.username,
            filename,
            size,
            replaced,
            "Stored file"
        );
        Ok(account.username.clone())
    }

    /// Fetch the exact bytes of a file owned by the session's account.
    pub fn get_file(&self, token: &str, filename: &str) -> Result<Vec<u8>> {
        let account = self.resolve(token)?;
        let files = read(&account.files);
        files.get(filename).cloned().ok_or(StoreError::NotFound)
    }

    /// Remove a file owned by the session's account.
    ///
    /// Deleting a missing file is [`StoreError::NotFound`], including a
    /// second delete of the same name.
    pub fn delete_file(&self, token: &str, filename: &str) -> Result<()> {
        let account = self.resolve(token)?;

        if write(&account.files).remove(filename).is_none() {
            return Err(StoreError::NotFound);
        }

        tracing::debug!(owner = %account.username, filename, "Deleted file");
        Ok(())
    }

    /// List the names of every file owned by the session's account.
    ///
    /// The order is unspecified.
    pub fn list_files(&self, token: &str) -> Result<Vec<String>> {
        let account = self.resolve(token)?;
        let files = read(&account.files);
        Ok(files.keys().cloned().collect())
    }

    // --- Introspection ---

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        read(&self.accounts).len()
    }

    /// Number of sessions opened so far (sessions never expire).
    pub fn session_count(&self) -> usize {
        read(&self.sessions).len()
    }

    fn resolve(&self, token: &str) -> Result<Arc<Account>> {
        read(&self.sessions)
            .get(token)
            .cloned()
            .ok_or(StoreError::InvalidSession)
    }
}

// A panic while a guard is held cannot leave a map half-updated: every
// mutation is a single insert or remove. Poisoning is safe to ignore.

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
