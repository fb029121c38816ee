//! Driving port for reading the blog list.
//!
//! Inbound adapters receive blogs with their owner already joined so they
//! never need to query users themselves.

use async_trait::async_trait;

use crate::domain::{Blog, Error, User, UserId};

/// Public fields of a blog owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    /// Account identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            name: user.name().to_owned(),
        }
    }
}

/// A blog with its owner resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogWithOwner {
    /// The stored blog.
    pub blog: Blog,
    /// Owner details; `None` for unowned blogs or dangling references.
    pub owner: Option<OwnerSummary>,
}

/// Domain use-case port for listing blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsQuery: Send + Sync {
    /// Every blog with owner details joined in.
    async fn list_blogs(&self) -> Result<Vec<BlogWithOwner>, Error>;
}
