//! Wire types shared with the backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public fields of the account that created a blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogOwner {
    /// Account identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}

/// Blog as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// Blog identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Author; empty when not given.
    pub author: String,
    /// Link to the post.
    pub url: String,
    /// Like count.
    pub likes: u32,
    /// Creator, or `None` for unowned blogs.
    pub user: Option<BlogOwner>,
}

/// Body for creating a blog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlog {
    /// Title; required by the server.
    pub title: String,
    /// Author.
    pub author: String,
    /// Link; required by the server.
    pub url: String,
    /// Initial likes; the server defaults to zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
}

/// Login form contents.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plain-text password; only ever sent to the login endpoint.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session object returned by login and persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedUser {
    /// Bearer token attached to authenticated requests.
    pub token: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}
