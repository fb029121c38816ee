//! Driving ports for login and bearer-token authentication.
//!
//! Inbound adapters call these to exchange credentials for a signed token
//! and to resolve a presented token into an identity, without touching the
//! hashing or signing infrastructure directly.

use async_trait::async_trait;

use crate::domain::{AuthenticatedIdentity, Error, LoginCredentials, LoginSession};

/// Domain use-case port for logging in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a signed token.
    ///
    /// Unknown users and wrong passwords fail identically.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;
}

/// Domain use-case port for verifying presented bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenAuthenticator: Send + Sync {
    /// Resolve `token` into the identity it was issued for.
    fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, Error>;
}
