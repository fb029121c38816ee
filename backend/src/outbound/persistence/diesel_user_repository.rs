//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Blog back-references live in the `users.blog_ids` array column and are
//! edited in place with `array_append`/`array_remove` so concurrent blog
//! creation by the same user cannot drop entries.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{BlogId, PasswordHash, StoredCredentials, User, UserId, Username};

use super::error_mapping::{user_diesel_error, user_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const APPEND_BLOG_SQL: &str = "UPDATE users SET blog_ids = array_append(blog_ids, $1) \
     WHERE id = $2 AND NOT ($1 = ANY(blog_ids))";
const REMOVE_BLOG_SQL: &str = "UPDATE users SET blog_ids = array_remove(blog_ids, $1) WHERE id = $2";

/// Diesel-backed user storage.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn edit_blog_ids(
        &self,
        sql: &'static str,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let updated = diesel::sql_query(sql)
            .bind::<sql_types::Uuid, _>(*blog_id.as_uuid())
            .bind::<sql_types::Uuid, _>(*user_id.as_uuid())
            .execute(&mut conn)
            .await
            .map_err(|err| user_diesel_error(err, ""))?;
        if updated == 0 {
            debug!(%user_id, %blog_id, "blog reference unchanged");
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            name: user.name(),
            password_hash: password_hash.as_str(),
            blog_ids: user.blog_ids().iter().map(|id| *id.as_uuid()).collect(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| user_diesel_error(err, row.username))?;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| user_diesel_error(err, ""))?;
        row.map(|row| row.into_user().map_err(UserRepositoryError::query))
            .transpose()
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| user_diesel_error(err, username.as_ref()))?;
        row.map(|row| row.into_credentials().map_err(UserRepositoryError::query))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| user_diesel_error(err, ""))?;
        rows.into_iter()
            .map(|row| row.into_user().map_err(UserRepositoryError::query))
            .collect()
    }

    async fn append_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError> {
        self.edit_blog_ids(APPEND_BLOG_SQL, user_id, blog_id).await
    }

    async fn remove_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError> {
        self.edit_blog_ids(REMOVE_BLOG_SQL, user_id, blog_id).await
    }
}
