//! Driving port for user read use-cases.
//!
//! Inbound adapters (HTTP handlers) depend on this port instead of the store
//! so they stay free of outbound concerns and can be tested with mocks.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user in ascending identifier order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with the given identifier.
    async fn find_user(&self, id: UserId) -> Result<User, Error>;

    /// Return the number of stored users.
    async fn count_users(&self) -> Result<usize, Error>;

    /// Return whether a user with the given identifier exists.
    async fn user_exists(&self, id: UserId) -> Result<bool, Error>;
}
