//! Authentication primitives: credentials, registrations, stored hashes and
//! bearer-token claims.
//!
//! Inbound payload parsing stays outside the domain; handlers call these
//! constructors before talking to a port or service.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Minimum allowed password length, counted in characters.
pub const PASSWORD_MIN: usize = 3;

/// Maximum allowed display name length, counted in characters.
pub const NAME_MAX: usize = 255;

/// Message returned for any failed login attempt.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid username or password";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    /// Returns a [`LoginValidationError`] for blank inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation error for signup payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username or password shorter than the required minimum.
    #[error("username and password should be at least 3 characters")]
    TooShort,
    /// Username longer than [`USERNAME_MAX`].
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Allowed maximum length.
        max: usize,
    },
    /// Display name longer than [`NAME_MAX`].
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Allowed maximum length.
        max: usize,
    },
}

/// Validated signup request.
///
/// # Examples
/// ```
/// use bloglist_backend::domain::Registration;
///
/// let registration = Registration::try_from_parts("mluukkai", "Matti Luukkainen", "salainen")
///     .expect("valid registration");
/// assert_eq!(registration.username().as_ref(), "mluukkai");
/// assert!(Registration::try_from_parts("ml", "Matti", "salainen").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    name: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw signup inputs.
    ///
    /// # Errors
    /// Returns [`RegistrationValidationError::TooShort`] when the username or
    /// password is shorter than three characters, and a `*TooLong` variant
    /// when the username or display name exceeds its maximum length.
    pub fn try_from_parts(
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username).map_err(|err| match err {
            UserValidationError::UsernameTooLong { .. } => {
                RegistrationValidationError::UsernameTooLong { max: USERNAME_MAX }
            }
            _ => RegistrationValidationError::TooShort,
        })?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::TooShort);
        }
        let display_name = name.trim();
        if display_name.chars().count() > NAME_MAX {
            return Err(RegistrationValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self {
            username,
            name: display_name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plain-text password awaiting hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// One-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`PasswordHasher`](crate::domain::ports::PasswordHasher).
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// A user together with the hash needed to check their password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// The account.
    pub user: User,
    /// Hash recorded at signup.
    pub password_hash: PasswordHash,
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Login name at signing time.
    pub username: String,
    /// Account identifier.
    pub id: UserId,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `user` valid for `ttl` from `issued_at`.
    #[must_use]
    pub fn new(user: &User, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            username: user.username().to_string(),
            id: user.id(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }

    /// Identity extracted from verified claims.
    #[must_use]
    pub fn identity(&self) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Account identifier.
    pub id: UserId,
    /// Login name recorded in the token.
    pub username: String,
}

/// Successful login outcome returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Signed bearer token.
    pub token: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}
