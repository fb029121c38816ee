//! Port abstraction for blog persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Blog, BlogId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blog repository adapters.
    pub enum BlogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
    }
}

/// Storage for blog documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Every stored blog in insertion order.
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError>;

    /// Fetch a blog by identifier.
    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, BlogRepositoryError>;

    /// Persist a new blog.
    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError>;

    /// Overwrite an existing blog; `false` when no row matched.
    async fn replace(&self, blog: &Blog) -> Result<bool, BlogRepositoryError>;

    /// Remove a blog; `false` when no row matched.
    async fn delete(&self, id: BlogId) -> Result<bool, BlogRepositoryError>;
}
