//! User identity and account data.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BlogId;

/// Minimum allowed length for a username, counted in characters.
pub const USERNAME_MIN: usize = 3;

/// Maximum allowed length for a username, counted in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The username is shorter than [`USERNAME_MIN`] once trimmed.
    #[error("username must be at least {min} characters")]
    UsernameTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// The username is longer than [`USERNAME_MAX`] once trimmed.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Allowed maximum length.
        max: usize,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidId`] when `id` is not a UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique login name.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - Between [`USERNAME_MIN`] and [`USERNAME_MAX`] characters remain after
///   trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::UsernameTooShort`] for short input and
    /// [`UserValidationError::UsernameTooLong`] for long input.
    ///
    /// # Examples
    /// ```
    /// use bloglist_backend::domain::Username;
    ///
    /// let name = Username::new("  mluukkai ").expect("long enough");
    /// assert_eq!(name.as_ref(), "mluukkai");
    /// assert!(Username::new("ab").is_err());
    /// ```
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account.
///
/// The password hash is deliberately absent; see
/// [`StoredCredentials`](crate::domain::StoredCredentials).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    name: String,
    blog_ids: Vec<BlogId>,
}

impl User {
    /// Build a [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, username: Username, name: impl Into<String>) -> Self {
        Self {
            id,
            username,
            name: name.into(),
            blog_ids: Vec::new(),
        }
    }

    /// Replace the back-references to blogs this user created.
    #[must_use]
    pub fn with_blog_ids(mut self, blog_ids: Vec<BlogId>) -> Self {
        self.blog_ids = blog_ids;
        self
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Free-form display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blogs created by this user, in creation order.
    #[must_use]
    pub fn blog_ids(&self) -> &[BlogId] {
        &self.blog_ids
    }

    /// Record a newly created blog. Duplicate ids are ignored.
    pub fn push_blog(&mut self, blog_id: BlogId) {
        if !self.blog_ids.contains(&blog_id) {
            self.blog_ids.push(blog_id);
        }
    }

    /// Drop a deleted blog from the back-references.
    pub fn remove_blog(&mut self, blog_id: BlogId) {
        self.blog_ids.retain(|id| *id != blog_id);
    }
}
