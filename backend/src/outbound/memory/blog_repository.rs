//! `BlogRepository` over an in-memory vector.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{BlogRepository, BlogRepositoryError};
use crate::domain::{Blog, BlogId};

use super::poisoned;

/// Blogs kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<Vec<Blog>>,
}

impl InMemoryBlogRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `blogs`.
    pub fn with_blogs(blogs: Vec<Blog>) -> Self {
        Self {
            blogs: RwLock::new(blogs),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Vec<Blog>) -> T) -> Result<T, BlogRepositoryError> {
        let guard = self
            .blogs
            .read()
            .map_err(|_| BlogRepositoryError::query(poisoned("blog")))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Vec<Blog>) -> T) -> Result<T, BlogRepositoryError> {
        let mut guard = self
            .blogs
            .write()
            .map_err(|_| BlogRepositoryError::query(poisoned("blog")))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        self.read(Vec::clone)
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, BlogRepositoryError> {
        self.read(|blogs| blogs.iter().find(|blog| blog.id() == id).cloned())
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        self.write(|blogs| {
            if blogs.iter().any(|stored| stored.id() == blog.id()) {
                return Err(BlogRepositoryError::query("duplicate blog id"));
            }
            blogs.push(blog.clone());
            Ok(())
        })?
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, BlogRepositoryError> {
        self.write(|blogs| {
            let Some(stored) = blogs.iter_mut().find(|stored| stored.id() == blog.id()) else {
                return false;
            };
            // Ownership is fixed at creation.
            *stored = stored.clone().replaced_with(blog.draft().clone());
            true
        })
    }

    async fn delete(&self, id: BlogId) -> Result<bool, BlogRepositoryError> {
        self.write(|blogs| {
            let before = blogs.len();
            blogs.retain(|blog| blog.id() != id);
            blogs.len() != before
        })
    }
}
