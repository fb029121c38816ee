//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`BlogRepository`, `UserRepository`, `PasswordHasher`,
//! `TokenIssuer`) are implemented by outbound adapters. Driving ports
//! (`BlogsQuery`, `BlogsCommand`, `UsersQuery`, `UserRegistration`,
//! `LoginService`, `TokenAuthenticator`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod blog_repository;
mod blogs_command;
mod blogs_query;
mod login_service;
mod password_hasher;
mod token_issuer;
mod user_registration;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use blog_repository::{BlogRepository, BlogRepositoryError};
#[cfg(test)]
pub use blogs_command::MockBlogsCommand;
pub use blogs_command::BlogsCommand;
#[cfg(test)]
pub use blogs_query::MockBlogsQuery;
pub use blogs_query::{BlogWithOwner, BlogsQuery, OwnerSummary};
#[cfg(test)]
pub use login_service::{MockLoginService, MockTokenAuthenticator};
pub use login_service::{LoginService, TokenAuthenticator};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{BlogSummary, UserWithBlogs, UsersQuery};
