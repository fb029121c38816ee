//! Driving port for account signup.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Hash the password and persist the account.
    ///
    /// A taken username yields an invalid-request error.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
