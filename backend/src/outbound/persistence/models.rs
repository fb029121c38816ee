//! Diesel row structs. Internal to the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Blog, BlogDraft, BlogId, PasswordHash, StoredCredentials, User, UserId, Username,
};

use super::schema::{blogs, users};

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub blog_ids: Vec<Uuid>,
    #[expect(dead_code, reason = "ordering column only read by queries")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to a domain user.
    ///
    /// Stored usernames passed validation on insert, so a failure here means
    /// the row was edited out of band.
    pub(crate) fn into_user(self) -> Result<User, String> {
        self.into_credentials().map(|stored| stored.user)
    }

    pub(crate) fn into_credentials(self) -> Result<StoredCredentials, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored user {} is invalid: {err}", self.id))?;
        let user = User::new(UserId::from(self.id), username, self.name)
            .with_blog_ids(self.blog_ids.into_iter().map(BlogId::from).collect());
        Ok(StoredCredentials {
            user,
            password_hash: PasswordHash::new(self.password_hash),
        })
    }
}

/// Insertable user record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub blog_ids: Vec<Uuid>,
}

/// Row read from the `blogs` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
    pub user_id: Option<Uuid>,
    #[expect(dead_code, reason = "ordering column only read by queries")]
    pub created_at: DateTime<Utc>,
}

impl BlogRow {
    pub(crate) fn into_blog(self) -> Result<Blog, String> {
        let draft = BlogDraft::new(
            Some(self.title),
            Some(self.author),
            Some(self.url),
            Some(i64::from(self.likes)),
        )
        .map_err(|err| format!("stored blog {} is invalid: {err}", self.id))?;
        Ok(Blog::new(
            BlogId::from(self.id),
            draft,
            self.user_id.map(UserId::from),
        ))
    }
}

/// Insertable blog record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blogs)]
pub(crate) struct NewBlogRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: &'a str,
    pub url: &'a str,
    pub likes: i32,
    pub user_id: Option<Uuid>,
}

/// Full-document replacement; ownership is never changed by updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blogs)]
pub(crate) struct BlogUpdate<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub url: &'a str,
    pub likes: i32,
}

/// Like counts are capped at `LIKES_MAX`, which fits in an `i32`.
pub(crate) fn likes_column(likes: u32) -> i32 {
    i32::try_from(likes).unwrap_or(i32::MAX)
}

impl<'a> From<&'a Blog> for NewBlogRow<'a> {
    fn from(blog: &'a Blog) -> Self {
        Self {
            id: *blog.id().as_uuid(),
            title: blog.title(),
            author: blog.author(),
            url: blog.url(),
            likes: likes_column(blog.likes()),
            user_id: blog.owner().map(|owner| *owner.as_uuid()),
        }
    }
}

impl<'a> From<&'a Blog> for BlogUpdate<'a> {
    fn from(blog: &'a Blog) -> Self {
        Self {
            title: blog.title(),
            author: blog.author(),
            url: blog.url(),
            likes: likes_column(blog.likes()),
        }
    }
}
