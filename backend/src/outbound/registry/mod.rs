//! In-memory user registry.
//!
//! [`InMemoryUserRegistry`] is the sole owner of user records for the life
//! of the process. It implements the [`UserRepository`] port and also
//! exposes the same operations synchronously for callers outside an async
//! runtime.
//!
//! # Concurrency
//!
//! - Records and the email index share one [`RwLock`]. Every mutating
//!   operation runs its uniqueness check and its write inside a single
//!   write-locked region, so two concurrent creates with the same email
//!   cannot both succeed.
//! - Identifiers come from an [`AtomicU64`] that is independent of the lock.
//!   Values are drawn only after a create has passed its checks, so ids are
//!   never burned on rejected requests and never reused after deletes.
//! - Readers clone whole records under the read lock and never observe a
//!   partially written record.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserDraft, UserId};

const FIRST_ID: u64 = 1;

#[derive(Debug, Default)]
struct RegistryState {
    records: BTreeMap<UserId, User>,
    emails: HashMap<EmailAddress, UserId>,
}

/// Thread-safe in-memory user store.
///
/// # Examples
/// ```
/// use user_registry::domain::UserDraft;
/// use user_registry::outbound::registry::InMemoryUserRegistry;
///
/// let registry = InMemoryUserRegistry::new();
/// let draft = UserDraft::try_from_parts("John", "Doe", "john@x.com", 30, None)?;
/// let user = registry.create(draft)?;
/// assert_eq!(user.id().get(), 1);
/// assert_eq!(registry.count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct InMemoryUserRegistry {
    next_id: AtomicU64,
    state: RwLock<RegistryState>,
}

impl Default for InMemoryUserRegistry {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(FIRST_ID),
            state: RwLock::new(RegistryState::default()),
        }
    }
}

impl InMemoryUserRegistry {
    /// Create an empty registry whose first identifier is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryState>, UserRepositoryError> {
        self.state
            .read()
            .map_err(|_| UserRepositoryError::unavailable("registry lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryState>, UserRepositoryError> {
        self.state
            .write()
            .map_err(|_| UserRepositoryError::unavailable("registry lock poisoned"))
    }

    fn next_id(&self) -> UserId {
        UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Snapshot of every record in ascending identifier order.
    ///
    /// # Errors
    /// Returns [`UserRepositoryError::Unavailable`] if the lock is poisoned.
    pub fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    /// Fetch the record for `id`.
    ///
    /// # Errors
    /// Returns [`UserRepositoryError::NotFound`] when absent.
    pub fn get(&self, id: UserId) -> Result<User, UserRepositoryError> {
        self.read()?
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(id))
    }

    /// Store `draft` under the next identifier.
    ///
    /// # Errors
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    pub fn create(&self, draft: UserDraft) -> Result<User, UserRepositoryError> {
        let mut state = self.write()?;
        if state.emails.contains_key(draft.email()) {
            return Err(UserRepositoryError::duplicate_email(draft.email().clone()));
        }

        let id = self.next_id();
        let user = User::new(id, draft);
        state.emails.insert(user.email().clone(), id);
        state.records.insert(id, user.clone());
        Ok(user)
    }

    /// Replace every field of record `id` with `draft`.
    ///
    /// # Errors
    /// Returns [`UserRepositoryError::NotFound`] when `id` is absent and
    /// [`UserRepositoryError::DuplicateEmail`] when the new email belongs to
    /// another record.
    pub fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserRepositoryError> {
        let mut state = self.write()?;
        let current_email = state
            .records
            .get(&id)
            .map(|existing| existing.email().clone())
            .ok_or_else(|| UserRepositoryError::not_found(id))?;

        if &current_email != draft.email() {
            if state
                .emails
                .get(draft.email())
                .is_some_and(|owner| *owner != id)
            {
                return Err(UserRepositoryError::duplicate_email(draft.email().clone()));
            }
            state.emails.remove(&current_email);
            state.emails.insert(draft.email().clone(), id);
        }

        let user = User::new(id, draft);
        state.records.insert(id, user.clone());
        Ok(user)
    }

    /// Remove record `id`.
    ///
    /// # Errors
    /// Returns [`UserRepositoryError::NotFound`] when absent.
    pub fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let mut state = self.write()?;
        let removed = state
            .records
            .remove(&id)
            .ok_or_else(|| UserRepositoryError::not_found(id))?;
        state.emails.remove(removed.email());
        Ok(())
    }

    /// Number of stored records.
    ///
    /// Mutations replace whole entries, so a poisoned lock still guards a
    /// consistent map and is read through.
    #[must_use]
    pub fn count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    /// Whether a record exists for `id`.
    #[must_use]
    pub fn exists(&self, id: UserId) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .contains_key(&id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRegistry {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Self::list(self)
    }

    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError> {
        Self::get(self, id)
    }

    async fn create(&self, draft: UserDraft) -> Result<User, UserRepositoryError> {
        Self::create(self, draft)
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserRepositoryError> {
        Self::update(self, id, draft)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        Self::delete(self, id)
    }

    async fn count(&self) -> Result<usize, UserRepositoryError> {
        Ok(Self::count(self))
    }

    async fn exists(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        Ok(Self::exists(self, id))
    }
}
