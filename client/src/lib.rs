//! Client for the blog list REST API.
//!
//! [`api`] talks HTTP through the [`BlogApi`] port, [`session`] persists the
//! logged-in user between runs and [`app`] holds the explicit client state:
//! the current session, the loaded blogs and the latest notification.

pub mod api;
pub mod app;
pub mod error;
pub mod model;
pub mod session;

pub use api::{ApiClient, BlogApi};
pub use app::{ClientApp, Notification, NotificationKind};
pub use error::ClientError;
pub use model::{Blog, BlogOwner, Credentials, LoggedUser, NewBlog};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
