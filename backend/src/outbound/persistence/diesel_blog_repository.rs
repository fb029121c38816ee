//! PostgreSQL-backed `BlogRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BlogRepository, BlogRepositoryError};
use crate::domain::{Blog, BlogId};

use super::error_mapping::{blog_diesel_error, blog_pool_error};
use super::models::{BlogRow, BlogUpdate, NewBlogRow};
use super::pool::DbPool;
use super::schema::blogs;

/// Diesel-backed blog storage.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_blog(row: BlogRow) -> Result<Blog, BlogRepositoryError> {
    row.into_blog().map_err(BlogRepositoryError::query)
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(blog_pool_error)?;
        let rows: Vec<BlogRow> = blogs::table
            .select(BlogRow::as_select())
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .load(&mut conn)
            .await
            .map_err(blog_diesel_error)?;
        rows.into_iter().map(row_to_blog).collect()
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(blog_pool_error)?;
        let row: Option<BlogRow> = blogs::table
            .find(*id.as_uuid())
            .select(BlogRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(blog_diesel_error)?;
        row.map(row_to_blog).transpose()
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(blog_pool_error)?;
        diesel::insert_into(blogs::table)
            .values(NewBlogRow::from(blog))
            .execute(&mut conn)
            .await
            .map_err(blog_diesel_error)?;
        Ok(())
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(blog_pool_error)?;
        let updated = diesel::update(blogs::table.find(*blog.id().as_uuid()))
            .set(BlogUpdate::from(blog))
            .execute(&mut conn)
            .await
            .map_err(blog_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: BlogId) -> Result<bool, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(blog_pool_error)?;
        let deleted = diesel::delete(blogs::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(blog_diesel_error)?;
        Ok(deleted > 0)
    }
}
