//! `UserRepository` over an in-memory vector of accounts.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{BlogId, PasswordHash, StoredCredentials, User, UserId, Username};

use super::poisoned;

/// Accounts kept in creation order alongside their hashes.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<Vec<StoredCredentials>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&[StoredCredentials]) -> T,
    ) -> Result<T, UserRepositoryError> {
        let guard = self
            .accounts
            .read()
            .map_err(|_| UserRepositoryError::query(poisoned("user")))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Vec<StoredCredentials>) -> T,
    ) -> Result<T, UserRepositoryError> {
        let mut guard = self
            .accounts
            .write()
            .map_err(|_| UserRepositoryError::query(poisoned("user")))?;
        Ok(f(&mut guard))
    }

    fn edit_user(
        &self,
        user_id: UserId,
        edit: impl FnOnce(&mut User),
    ) -> Result<(), UserRepositoryError> {
        self.write(|accounts| {
            if let Some(stored) = accounts
                .iter_mut()
                .find(|stored| stored.user.id() == user_id)
            {
                edit(&mut stored.user);
            }
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        self.write(|accounts| {
            if accounts
                .iter()
                .any(|stored| stored.user.username() == user.username())
            {
                return Err(UserRepositoryError::duplicate_username(
                    user.username().as_ref(),
                ));
            }
            accounts.push(StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            });
            Ok(())
        })?
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        self.read(|accounts| {
            accounts
                .iter()
                .find(|stored| stored.user.id() == id)
                .map(|stored| stored.user.clone())
        })
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        self.read(|accounts| {
            accounts
                .iter()
                .find(|stored| stored.user.username() == username)
                .cloned()
        })
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        self.read(|accounts| accounts.iter().map(|stored| stored.user.clone()).collect())
    }

    async fn append_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError> {
        self.edit_user(user_id, |user| user.push_blog(blog_id))
    }

    async fn remove_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
    ) -> Result<(), UserRepositoryError> {
        self.edit_user(user_id, |user| user.remove_blog(blog_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn user(username: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
            "Tester",
        )
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn usernames_are_unique(repo: InMemoryUserRepository) {
        let hash = PasswordHash::new("h");
        repo.insert(&user("root"), &hash).await.expect("first insert");

        let err = repo
            .insert(&user("root"), &hash)
            .await
            .expect_err("duplicate username");
        assert_eq!(err, UserRepositoryError::duplicate_username("root"));
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_lookup_returns_hash(repo: InMemoryUserRepository) {
        let account = user("mluukkai");
        repo.insert(&account, &PasswordHash::new("stored"))
            .await
            .expect("insert");

        let stored = repo
            .find_credentials(account.username())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.user, account);
        assert_eq!(stored.password_hash.as_str(), "stored");

        let missing = Username::new("nobody").expect("valid username");
        assert!(repo.find_credentials(&missing).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn blog_references_append_once_and_remove(repo: InMemoryUserRepository) {
        let account = user("root");
        repo.insert(&account, &PasswordHash::new("h"))
            .await
            .expect("insert");
        let blog = BlogId::random();

        repo.append_blog(account.id(), blog).await.expect("append");
        repo.append_blog(account.id(), blog).await.expect("append again");
        let stored = repo
            .find_by_id(account.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.blog_ids(), &[blog]);

        repo.remove_blog(account.id(), blog).await.expect("remove");
        let stored = repo
            .find_by_id(account.id())
            .await
            .expect("find")
            .expect("present");
        assert!(stored.blog_ids().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn editing_unknown_user_is_a_no_op(repo: InMemoryUserRepository) {
        repo.append_blog(UserId::random(), BlogId::random())
            .await
            .expect("append tolerates unknown users");
        assert!(repo.list().await.expect("list").is_empty());
    }
}
