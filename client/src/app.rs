//! Client application state.
//!
//! [`ClientApp`] owns everything a front end renders: the logged-in user,
//! the blog list and the latest notification. Every operation updates that
//! state explicitly; nothing lives in globals.

use tracing::{info, warn};

use crate::api::BlogApi;
use crate::error::ClientError;
use crate::model::{Blog, Credentials, LoggedUser, NewBlog};
use crate::session::SessionStore;

/// Message shown when login fails for any reason.
pub const WRONG_CREDENTIALS_MESSAGE: &str = "Wrong credentials";

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Confirmation of a successful action.
    Info,
    /// Report of a failed action.
    Error,
}

/// User-facing message produced by the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to display.
    pub message: String,
    /// Severity.
    pub kind: NotificationKind,
}

impl Notification {
    /// Informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    /// Error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Client state driven through a [`BlogApi`] and a [`SessionStore`].
pub struct ClientApp<A, S> {
    api: A,
    store: S,
    blogs: Vec<Blog>,
    user: Option<LoggedUser>,
    notification: Option<Notification>,
}

impl<A: BlogApi, S: SessionStore> ClientApp<A, S> {
    /// Logged-out state with no blogs loaded.
    pub const fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            blogs: Vec::new(),
            user: None,
            notification: None,
        }
    }

    /// Adopt the session saved by a previous run, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError::Storage`] from the store.
    pub fn restore_session(&mut self) -> Result<Option<&LoggedUser>, ClientError> {
        self.user = self.store.load()?;
        Ok(self.user.as_ref())
    }

    /// Replace the local blog list with the server's.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures; the previous list is kept.
    pub async fn refresh_blogs(&mut self) -> Result<&[Blog], ClientError> {
        self.blogs = self.api.list_blogs().await?;
        Ok(&self.blogs)
    }

    /// Log in and persist the session.
    ///
    /// Any failure leaves the user logged out and sets an error
    /// notification reading [`WRONG_CREDENTIALS_MESSAGE`].
    ///
    /// # Errors
    ///
    /// Returns the login or storage failure.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&LoggedUser, ClientError> {
        let credentials = Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        let outcome = match self.api.login(&credentials).await {
            Ok(user) => self.store.save(&user).map(|()| user),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(user) => {
                info!(username = %user.username, "logged in");
                self.notification = None;
                Ok(&*self.user.insert(user))
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.user = None;
                self.notification = Some(Notification::error(WRONG_CREDENTIALS_MESSAGE));
                Err(err)
            }
        }
    }

    /// Forget the session locally and in the store.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError::Storage`]; the in-memory session is cleared
    /// regardless.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.user = None;
        self.store.clear()
    }

    /// Create a blog as the logged-in user and append it to the list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] without a session, otherwise the
    /// server failure, which is also surfaced as an error notification.
    pub async fn add_blog(&mut self, blog: NewBlog) -> Result<&Blog, ClientError> {
        let token = self
            .user
            .as_ref()
            .map(|user| user.token.clone())
            .ok_or(ClientError::NotLoggedIn)?;
        match self.api.create_blog(&token, &blog).await {
            Ok(created) => {
                self.notification = Some(Notification::info(format!(
                    "Blog '{}' added",
                    created.title
                )));
                self.blogs.push(created);
                self.blogs.last().ok_or_else(|| ClientError::Decode {
                    message: "created blog missing from list".to_owned(),
                })
            }
            Err(err) => {
                warn!(error = %err, "adding blog failed");
                self.notification = Some(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Current session, if logged in.
    #[must_use]
    pub const fn user(&self) -> Option<&LoggedUser> {
        self.user.as_ref()
    }

    /// Blogs loaded so far.
    #[must_use]
    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    /// Latest notification.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Remove and return the latest notification.
    pub const fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Drop the latest notification.
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBlogApi;
    use crate::session::MemorySessionStore;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn root() -> LoggedUser {
        LoggedUser {
            token: "root-token".to_owned(),
            username: "root".to_owned(),
            name: "Superuser".to_owned(),
        }
    }

    fn blog(title: &str) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            author: "Edsger W. Dijkstra".to_owned(),
            url: format!("https://blogs.example.com/{}", title.replace(' ', "-")),
            likes: 0,
            user: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn successful_login_persists_the_session(root: LoggedUser) {
        let mut api = MockBlogApi::new();
        let returned = root.clone();
        api.expect_login()
            .withf(|credentials| credentials.username == "root" && credentials.password == "sekret")
            .times(1)
            .return_once(move |_| Ok(returned));
        let mut app = ClientApp::new(api, MemorySessionStore::new());

        let user = app.login("root", "sekret").await.expect("login succeeds").clone();

        assert_eq!(user, root);
        assert_eq!(app.user(), Some(&root));
        assert_eq!(app.notification(), None);
        assert_eq!(app.store.load().expect("load"), Some(root));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_login_reports_wrong_credentials() {
        let mut api = MockBlogApi::new();
        api.expect_login().times(1).return_once(|_| {
            Err(ClientError::Status {
                status: 401,
                message: "invalid username or password".to_owned(),
            })
        });
        let mut app = ClientApp::new(api, MemorySessionStore::new());

        let err = app.login("root", "wrong").await.expect_err("login fails");

        assert!(err.is_unauthorized());
        assert_eq!(app.user(), None);
        assert_eq!(
            app.take_notification(),
            Some(Notification::error(WRONG_CREDENTIALS_MESSAGE))
        );
        assert_eq!(app.notification(), None);
    }

    #[rstest]
    fn restored_sessions_survive_until_logout(root: LoggedUser) {
        let mut app = ClientApp::new(MockBlogApi::new(), MemorySessionStore::with_user(root.clone()));

        assert_eq!(app.restore_session().expect("restore"), Some(&root));

        app.logout().expect("logout");
        assert_eq!(app.user(), None);
        assert_eq!(app.store.load().expect("load"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn adding_requires_a_session() {
        let mut app = ClientApp::new(MockBlogApi::new(), MemorySessionStore::new());

        let err = app
            .add_blog(NewBlog::default())
            .await
            .expect_err("no session");

        assert!(matches!(err, ClientError::NotLoggedIn));
        assert!(app.blogs().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn added_blogs_are_appended_and_announced(root: LoggedUser) {
        let created = blog("Go To Statement Considered Harmful");
        let mut api = MockBlogApi::new();
        api.expect_list_blogs()
            .times(1)
            .return_once(|| Ok(vec![blog("React patterns")]));
        let response = created.clone();
        api.expect_create_blog()
            .withf(|token, _| token == "root-token")
            .times(1)
            .return_once(move |_, _| Ok(response));
        let mut app = ClientApp::new(api, MemorySessionStore::with_user(root));
        app.restore_session().expect("restore");
        app.refresh_blogs().await.expect("refresh");

        let new_blog = NewBlog {
            title: created.title.clone(),
            author: created.author.clone(),
            url: created.url.clone(),
            likes: None,
        };
        app.add_blog(new_blog).await.expect("add succeeds");

        assert_eq!(app.blogs().len(), 2);
        assert_eq!(app.blogs().last(), Some(&created));
        assert_eq!(
            app.notification(),
            Some(&Notification::info(
                "Blog 'Go To Statement Considered Harmful' added"
            ))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_blogs_surface_the_server_message(root: LoggedUser) {
        let mut api = MockBlogApi::new();
        api.expect_create_blog().times(1).return_once(|_, _| {
            Err(ClientError::Status {
                status: 400,
                message: "title and url are required".to_owned(),
            })
        });
        let mut app = ClientApp::new(api, MemorySessionStore::with_user(root));
        app.restore_session().expect("restore");

        app.add_blog(NewBlog::default())
            .await
            .expect_err("server rejects blog");

        let notification = app.notification().expect("notification set");
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.message.contains("title and url are required"));
        assert!(app.blogs().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_list() {
        let mut api = MockBlogApi::new();
        api.expect_list_blogs().times(1).return_once(|| {
            Err(ClientError::Transport {
                message: "connection refused".to_owned(),
            })
        });
        let mut app = ClientApp::new(api, MemorySessionStore::new());
        app.blogs.push(blog("React patterns"));

        app.refresh_blogs().await.expect_err("refresh fails");

        assert_eq!(app.blogs().len(), 1);
    }
}
