//! Driving port for blog mutations performed by authenticated users.

use async_trait::async_trait;

use crate::domain::{AuthenticatedIdentity, BlogDraft, BlogId, Error};

use super::BlogWithOwner;

/// Domain use-case port for creating, replacing and deleting blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsCommand: Send + Sync {
    /// Store `draft` owned by `actor` and record it on the owner's account.
    async fn create_blog(
        &self,
        actor: &AuthenticatedIdentity,
        draft: BlogDraft,
    ) -> Result<BlogWithOwner, Error>;

    /// Replace the content of blog `id` when `actor` may edit it.
    async fn update_blog(
        &self,
        actor: &AuthenticatedIdentity,
        id: BlogId,
        draft: BlogDraft,
    ) -> Result<BlogWithOwner, Error>;

    /// Delete blog `id` when `actor` may edit it.
    async fn delete_blog(&self, actor: &AuthenticatedIdentity, id: BlogId) -> Result<(), Error>;
}
