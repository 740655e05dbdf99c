//! User registry domain service.
//!
//! Implements the driving ports over any [`UserRepository`], logging each
//! operation and translating store failures into transport-agnostic
//! [`Error`] values.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UserRegistryService<R> {
    repository: Arc<R>,
}

impl<R> UserRegistryService<R> {
    /// Create a new service backed by `repository`.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserRegistryService<R>
where
    R: UserRepository,
{
    fn map_repository_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::NotFound { id } => {
                warn!(user_id = %id, "user not found");
                Error::not_found(format!("user not found with id: {id}")).with_details(json!({
                    "id": id.get(),
                    "code": "user_not_found",
                }))
            }
            UserRepositoryError::DuplicateEmail { email } => {
                warn!(%email, "user with email already exists");
                Error::conflict(format!("user with email {email} already exists")).with_details(
                    json!({
                        "field": "email",
                        "code": "duplicate_email",
                    }),
                )
            }
            UserRepositoryError::Unavailable { message } => {
                Error::internal(format!("user store unavailable: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserRegistryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        debug!("retrieving all users");
        self.repository
            .list()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        debug!(user_id = %id, "retrieving user");
        self.repository
            .get(id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn count_users(&self) -> Result<usize, Error> {
        self.repository
            .count()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, Error> {
        self.repository
            .exists(id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserRegistryService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        debug!(email = %draft.email(), "creating user");
        let user = self
            .repository
            .create(draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %user.id(), "created user");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        debug!(user_id = %id, "updating user");
        let user = self
            .repository
            .update(id, draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %id, "updated user");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        debug!(user_id = %id, "deleting user");
        self.repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
