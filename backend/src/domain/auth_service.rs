//! Login and bearer-token authentication service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, TokenAuthenticator, TokenError, TokenIssuer, UserRepository,
};
use crate::domain::user_service::map_user_repository_error;
use crate::domain::{
    AuthenticatedIdentity, Error, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, LoginSession,
    TokenClaims, Username,
};

/// Default bearer-token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Service implementing [`LoginService`] and [`TokenAuthenticator`].
#[derive(Clone)]
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a new service issuing tokens valid for [`DEFAULT_TOKEN_TTL`].
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

#[async_trait]
impl<U, H, T> LoginService for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(invalid_credentials());
        };
        let Some(stored) = self
            .users
            .find_credentials(&username)
            .await
            .map_err(map_user_repository_error)?
        else {
            debug!(username = %username, "login for unknown user");
            self.hasher.verify_decoy(credentials.password());
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;
        if !matches {
            debug!(user_id = %stored.user.id(), "login with wrong password");
            return Err(invalid_credentials());
        }

        let claims = TokenClaims::new(&stored.user, self.clock.utc(), self.token_ttl);
        let token = self
            .tokens
            .sign(&claims)
            .map_err(|err| Error::internal(format!("token signing failed: {err}")))?;

        info!(user_id = %stored.user.id(), "user logged in");
        Ok(LoginSession {
            token,
            username: stored.user.username().to_string(),
            name: stored.user.name().to_owned(),
        })
    }
}

impl<U, H, T> TokenAuthenticator for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, Error> {
        match self.tokens.verify(token) {
            Ok(claims) => Ok(claims.identity()),
            Err(err @ (TokenError::Expired | TokenError::Invalid)) => {
                Err(Error::unauthorized(err.to_string()))
            }
            Err(err @ TokenError::Signing { .. }) => {
                Err(Error::internal(format!("token verification failed: {err}")))
            }
        }
    }
}
