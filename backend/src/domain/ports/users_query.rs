//! Driving port for user-facing account queries.

use async_trait::async_trait;

use crate::domain::{Blog, BlogId, Error, User};

/// Compact blog fields shown inside a user listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSummary {
    /// Blog identifier.
    pub id: BlogId,
    /// Blog title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Link to the post.
    pub url: String,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id(),
            title: blog.title().to_owned(),
            author: blog.author().to_owned(),
            url: blog.url().to_owned(),
        }
    }
}

/// A user with their blogs resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithBlogs {
    /// The account.
    pub user: User,
    /// Blogs listed in the account's back-references that still exist.
    pub blogs: Vec<BlogSummary>,
}

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every account with blogs populated.
    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, Error>;
}
