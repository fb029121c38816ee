//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{BlogId, PasswordHash, StoredCredentials, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already holds the username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Storage for user accounts and their blog back-references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account with its password hash.
    ///
    /// Fails with [`UserRepositoryError::DuplicateUsername`] when the
    /// username is taken.
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user and stored hash by username.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;

    /// Every account in creation order.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Append `blog_id` to the user's back-references.
    async fn append_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError>;

    /// Remove `blog_id` from the user's back-references.
    async fn remove_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError>;
}
