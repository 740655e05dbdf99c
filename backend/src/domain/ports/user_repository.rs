//! Port abstraction for the user store and its errors.
//!
//! The store owns every user record. It assigns identifiers on create and
//! enforces email uniqueness; field validation has already happened by the
//! time a [`UserDraft`] reaches it.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserRepositoryError {
        /// No record exists for the identifier.
        NotFound { id: UserId } => "user not found with id: {id}",
        /// Another record already uses the email address.
        DuplicateEmail { email: EmailAddress } => "user with email {email} already exists",
        /// The store could not serve the request.
        Unavailable { message: String } => "user store unavailable: {message}",
    }
}

/// Port for storing, replacing and removing user records.
///
/// # Identifier semantics
///
/// - Identifiers start at 1 and increase by one per successful create.
/// - Identifiers are never reused, even after the record is deleted.
/// - Concurrent creates never observe the same identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Snapshot of every stored record in ascending identifier order.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch the record for `id`.
    ///
    /// Fails with [`UserRepositoryError::NotFound`] when absent.
    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError>;

    /// Store `draft` under the next identifier.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when any stored
    /// record already uses the draft's email.
    async fn create(&self, draft: UserDraft) -> Result<User, UserRepositoryError>;

    /// Replace every field of record `id` with `draft`, keeping `id`.
    ///
    /// Fails with [`UserRepositoryError::NotFound`] when `id` is absent, and
    /// with [`UserRepositoryError::DuplicateEmail`] when the email changes to
    /// one held by a different record.
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserRepositoryError>;

    /// Remove record `id`.
    ///
    /// Fails with [`UserRepositoryError::NotFound`] when absent.
    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, UserRepositoryError>;

    /// Whether a record exists for `id`.
    async fn exists(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
