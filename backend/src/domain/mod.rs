//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for the blog list and the
//! services behind the driving ports. Types are transport agnostic; inbound
//! adapters map them onto wire formats.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `User`, `Blog` and their identifiers and validated drafts.
//! - Authentication primitives (`LoginCredentials`, `Registration`,
//!   `TokenClaims`, `PasswordHash`).
//! - `blog_stats`: pure aggregation helpers over blog lists.
//! - `BlogService`, `UserService`, `AuthService`: driving-port
//!   implementations over the repository ports.

pub mod auth;
pub mod auth_service;
pub mod blog;
pub mod blog_service;
pub mod blog_stats;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{
    AuthenticatedIdentity, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, LoginSession,
    LoginValidationError, NAME_MAX, PASSWORD_MIN, PasswordHash, Registration,
    RegistrationValidationError, StoredCredentials, TokenClaims,
};
pub use self::auth_service::{AuthService, DEFAULT_TOKEN_TTL};
pub use self::blog::{Blog, BlogDraft, BlogField, BlogId, BlogValidationError, LIKES_MAX};
pub use self::blog_service::BlogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};
pub use self::user_service::{DUPLICATE_USERNAME_MESSAGE, UserService};
