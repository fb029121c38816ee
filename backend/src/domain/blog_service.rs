//! Blog listing and mutation services.
//!
//! Mutations keep the owner's `blogs` back-references in step with the blog
//! collection: creation appends the new id and deletion prunes it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    BlogRepository, BlogWithOwner, BlogsCommand, BlogsQuery, OwnerSummary, UserRepository,
};
use crate::domain::user_service::{map_blog_repository_error, map_user_repository_error};
use crate::domain::{AuthenticatedIdentity, Blog, BlogDraft, BlogId, Error, UserId};

const BLOG_NOT_FOUND: &str = "blog not found";

/// Blog service implementing the list and mutation driving ports.
#[derive(Clone)]
pub struct BlogService<B, U> {
    blogs: Arc<B>,
    users: Arc<U>,
}

impl<B, U> BlogService<B, U> {
    /// Create a new service over the blog and user repositories.
    pub fn new(blogs: Arc<B>, users: Arc<U>) -> Self {
        Self { blogs, users }
    }
}

impl<B, U> BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn owner_summary(&self, owner: Option<UserId>) -> Result<Option<OwnerSummary>, Error> {
        let Some(id) = owner else {
            return Ok(None);
        };
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?;
        Ok(user.as_ref().map(OwnerSummary::from))
    }

    async fn editable_blog(
        &self,
        actor: &AuthenticatedIdentity,
        id: BlogId,
        action: &str,
    ) -> Result<Blog, Error> {
        let blog = self
            .blogs
            .find_by_id(id)
            .await
            .map_err(map_blog_repository_error)?
            .ok_or_else(|| Error::not_found(BLOG_NOT_FOUND))?;
        if !blog.is_editable_by(actor.id) {
            warn!(blog_id = %id, user_id = %actor.id, action, "blog edit refused for non-owner");
            return Err(Error::unauthorized(format!(
                "only the creator can {action} a blog"
            )));
        }
        Ok(blog)
    }
}

#[async_trait]
impl<B, U> BlogsQuery for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn list_blogs(&self) -> Result<Vec<BlogWithOwner>, Error> {
        let blogs = self.blogs.list().await.map_err(map_blog_repository_error)?;
        let owners: HashMap<UserId, OwnerSummary> = self
            .users
            .list()
            .await
            .map_err(map_user_repository_error)?
            .iter()
            .map(|user| (user.id(), OwnerSummary::from(user)))
            .collect();

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let owner = blog.owner().and_then(|id| owners.get(&id).cloned());
                BlogWithOwner { blog, owner }
            })
            .collect())
    }
}

#[async_trait]
impl<B, U> BlogsCommand for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn create_blog(
        &self,
        actor: &AuthenticatedIdentity,
        draft: BlogDraft,
    ) -> Result<BlogWithOwner, Error> {
        let owner = self
            .users
            .find_by_id(actor.id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized("token invalid"))?;

        let blog = Blog::new(BlogId::random(), draft, Some(owner.id()));
        self.blogs
            .insert(&blog)
            .await
            .map_err(map_blog_repository_error)?;
        self.users
            .append_blog(owner.id(), blog.id())
            .await
            .map_err(|err| {
                warn!(blog_id = %blog.id(), user_id = %owner.id(), error = %err,
                    "blog stored but owner back-reference not recorded");
                map_user_repository_error(err)
            })?;

        info!(blog_id = %blog.id(), user_id = %owner.id(), "blog created");
        Ok(BlogWithOwner {
            blog,
            owner: Some(OwnerSummary::from(&owner)),
        })
    }

    async fn update_blog(
        &self,
        actor: &AuthenticatedIdentity,
        id: BlogId,
        draft: BlogDraft,
    ) -> Result<BlogWithOwner, Error> {
        let updated = self
            .editable_blog(actor, id, "update")
            .await?
            .replaced_with(draft);
        let matched = self
            .blogs
            .replace(&updated)
            .await
            .map_err(map_blog_repository_error)?;
        if !matched {
            return Err(Error::not_found(BLOG_NOT_FOUND));
        }

        info!(blog_id = %id, user_id = %actor.id, "blog updated");
        let owner = self.owner_summary(updated.owner()).await?;
        Ok(BlogWithOwner {
            blog: updated,
            owner,
        })
    }

    async fn delete_blog(&self, actor: &AuthenticatedIdentity, id: BlogId) -> Result<(), Error> {
        let blog = self.editable_blog(actor, id, "delete").await?;
        let removed = self
            .blogs
            .delete(id)
            .await
            .map_err(map_blog_repository_error)?;
        if !removed {
            return Err(Error::not_found(BLOG_NOT_FOUND));
        }

        if let Some(owner) = blog.owner() {
            self.users.remove_blog(owner, id).await.map_err(|err| {
                warn!(blog_id = %id, user_id = %owner, error = %err,
                    "blog deleted but owner back-reference not pruned");
                map_user_repository_error(err)
            })?;
        }

        info!(blog_id = %id, user_id = %actor.id, "blog deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Ownership rules and back-reference bookkeeping over mocked repositories.
    use super::*;
    use crate::domain::ports::{BlogRepositoryError, MockBlogRepository, MockUserRepository};
    use crate::domain::{ErrorCode, User, Username};
    use rstest::{fixture, rstest};

    type Service = BlogService<MockBlogRepository, MockUserRepository>;

    fn service(blogs: MockBlogRepository, users: MockUserRepository) -> Service {
        BlogService::new(Arc::new(blogs), Arc::new(users))
    }

    #[fixture]
    fn owner() -> User {
        User::new(
            UserId::random(),
            Username::new("root").expect("valid username"),
            "Superuser",
        )
    }

    #[fixture]
    fn draft() -> BlogDraft {
        BlogDraft::new(
            Some("First class tests".to_owned()),
            Some("Robert C. Martin".to_owned()),
            Some("http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll".to_owned()),
            Some(10),
        )
        .expect("valid draft")
    }

    fn identity(user: &User) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            id: user.id(),
            username: user.username().to_string(),
        }
    }

    fn stranger() -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            id: UserId::random(),
            username: "stranger".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_records_owner_and_back_reference(owner: User, draft: BlogDraft) {
        let owner_id = owner.id();
        let mut users = MockUserRepository::new();
        let found = owner.clone();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(found)));
        users
            .expect_append_blog()
            .withf(move |user_id, _| *user_id == owner_id)
            .times(1)
            .return_once(|_, _| Ok(()));
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_insert()
            .withf(move |blog| blog.owner() == Some(owner_id))
            .times(1)
            .return_once(|_| Ok(()));

        let created = service(blogs, users)
            .create_blog(&identity(&owner), draft)
            .await
            .expect("creation succeeds");

        assert_eq!(created.blog.likes(), 10);
        assert_eq!(created.owner.map(|summary| summary.username), Some("root".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_tokens_for_deleted_users(owner: User, draft: BlogDraft) {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        let mut blogs = MockBlogRepository::new();
        blogs.expect_insert().times(0);

        let err = service(blogs, users)
            .create_blog(&identity(&owner), draft)
            .await
            .expect_err("missing owner must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_stranger_is_unauthorized(owner: User, draft: BlogDraft) {
        let blog = Blog::new(BlogId::random(), draft, Some(owner.id()));
        let id = blog.id();
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(blog)));
        blogs.expect_delete().times(0);

        let err = service(blogs, MockUserRepository::new())
            .delete_blog(&stranger(), id)
            .await
            .expect_err("stranger must be refused");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "only the creator can delete a blog");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_owner_prunes_back_reference(owner: User, draft: BlogDraft) {
        let blog = Blog::new(BlogId::random(), draft, Some(owner.id()));
        let id = blog.id();
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(blog)));
        blogs.expect_delete().times(1).return_once(|_| Ok(true));
        let mut users = MockUserRepository::new();
        users
            .expect_remove_blog()
            .withf(move |_, blog_id| *blog_id == id)
            .times(1)
            .return_once(|_, _| Ok(()));

        service(blogs, users)
            .delete_blog(&identity(&owner), id)
            .await
            .expect("owner may delete");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unowned_blog_skips_back_reference(owner: User, draft: BlogDraft) {
        let blog = Blog::new(BlogId::random(), draft, None);
        let id = blog.id();
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(blog)));
        blogs.expect_delete().return_once(|_| Ok(true));
        let mut users = MockUserRepository::new();
        users.expect_remove_blog().times(0);

        service(blogs, users)
            .delete_blog(&identity(&owner), id)
            .await
            .expect("unowned blogs are deletable");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_missing_blog_is_not_found(owner: User) {
        let mut blogs = MockBlogRepository::new();
        blogs.expect_find_by_id().return_once(|_| Ok(None));

        let err = service(blogs, MockUserRepository::new())
            .delete_blog(&identity(&owner), BlogId::random())
            .await
            .expect_err("missing blog must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn update_by_stranger_leaves_blog_untouched(owner: User, draft: BlogDraft) {
        let blog = Blog::new(BlogId::random(), draft.clone(), Some(owner.id()));
        let id = blog.id();
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(blog)));
        blogs.expect_replace().times(0);

        let err = service(blogs, MockUserRepository::new())
            .update_blog(&stranger(), id, draft)
            .await
            .expect_err("stranger must be refused");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn update_by_owner_replaces_content(owner: User, draft: BlogDraft) {
        let blog = Blog::new(BlogId::random(), draft, Some(owner.id()));
        let id = blog.id();
        let replacement = BlogDraft::new(
            Some("First class tests".to_owned()),
            None,
            Some("http://blog.cleancoder.com/".to_owned()),
            Some(11),
        )
        .expect("valid draft");
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(blog)));
        blogs
            .expect_replace()
            .withf(|blog| blog.likes() == 11)
            .return_once(|_| Ok(true));
        let mut users = MockUserRepository::new();
        let found = owner.clone();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(found)));

        let updated = service(blogs, users)
            .update_blog(&identity(&owner), id, replacement)
            .await
            .expect("owner may update");

        assert_eq!(updated.blog.id(), id);
        assert_eq!(updated.blog.likes(), 11);
        assert_eq!(updated.blog.author(), "");
    }

    #[rstest]
    #[tokio::test]
    async fn list_joins_owners_and_tolerates_dangling_references(owner: User, draft: BlogDraft) {
        let owned = Blog::new(BlogId::random(), draft.clone(), Some(owner.id()));
        let dangling = Blog::new(BlogId::random(), draft, Some(UserId::random()));
        let mut blogs = MockBlogRepository::new();
        let listed = vec![owned, dangling];
        blogs.expect_list().return_once(move || Ok(listed));
        let mut users = MockUserRepository::new();
        let account = owner.clone();
        users.expect_list().return_once(move || Ok(vec![account]));

        let listing = service(blogs, users)
            .list_blogs()
            .await
            .expect("listing succeeds");

        let owners: Vec<Option<UserId>> = listing
            .iter()
            .map(|entry| entry.owner.as_ref().map(|summary| summary.id))
            .collect();
        assert_eq!(owners, vec![Some(owner.id()), None]);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_list()
            .return_once(|| Err(BlogRepositoryError::connection("pool timed out")));

        let err = service(blogs, MockUserRepository::new())
            .list_blogs()
            .await
            .expect_err("connection failure must fail");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
