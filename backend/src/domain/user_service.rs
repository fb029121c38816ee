//! Account signup and listing services.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, BlogSummary, PasswordHasher, UserRegistration,
    UserRepository, UserRepositoryError, UserWithBlogs, UsersQuery,
};
use crate::domain::{BlogId, Error, Registration, User, UserId};

/// Message returned when a username is already registered.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "expected `username` to be unique";

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => {
            Error::invalid_request(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

pub(crate) fn map_blog_repository_error(error: BlogRepositoryError) -> Error {
    match error {
        BlogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blog repository unavailable: {message}"))
        }
        BlogRepositoryError::Query { message } => {
            Error::internal(format!("blog repository error: {message}"))
        }
    }
}

/// User service implementing the signup and listing driving ports.
#[derive(Clone)]
pub struct UserService<U, B, H> {
    users: Arc<U>,
    blogs: Arc<B>,
    hasher: Arc<H>,
}

impl<U, B, H> UserService<U, B, H> {
    /// Create a new service over the user and blog repositories.
    pub fn new(users: Arc<U>, blogs: Arc<B>, hasher: Arc<H>) -> Self {
        Self {
            users,
            blogs,
            hasher,
        }
    }
}

#[async_trait]
impl<U, B, H> UserRegistration for UserService<U, B, H>
where
    U: UserRepository,
    B: BlogRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let taken = self
            .users
            .find_credentials(registration.username())
            .await
            .map_err(map_user_repository_error)?;
        if taken.is_some() {
            return Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.name(),
        );
        self.users
            .insert(&user, &password_hash)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, B, H> UsersQuery for UserService<U, B, H>
where
    U: UserRepository,
    B: BlogRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, Error> {
        let users = self.users.list().await.map_err(map_user_repository_error)?;
        let blogs = self.blogs.list().await.map_err(map_blog_repository_error)?;
        let summaries: HashMap<BlogId, BlogSummary> = blogs
            .iter()
            .map(|blog| (blog.id(), BlogSummary::from(blog)))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let blogs = user
                    .blog_ids()
                    .iter()
                    .filter_map(|id| summaries.get(id).cloned())
                    .collect();
                UserWithBlogs { user, blogs }
            })
            .collect())
    }
}
