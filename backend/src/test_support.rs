//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`; only
//! compiled for tests or with the `test-support` feature. Services built
//! here run over the in-memory repositories with cheap argon2 parameters.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::domain::{AuthService, BlogService, UserService};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_config;
use crate::middleware::Trace;
use crate::outbound::memory::{InMemoryBlogRepository, InMemoryUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

/// Blog service over in-memory storage.
pub type MemoryBlogService = BlogService<InMemoryBlogRepository, InMemoryUserRepository>;
/// User service over in-memory storage.
pub type MemoryUserService =
    UserService<InMemoryUserRepository, InMemoryBlogRepository, Argon2PasswordHasher>;
/// Auth service over in-memory storage.
pub type MemoryAuthService =
    AuthService<InMemoryUserRepository, Argon2PasswordHasher, JwtTokenIssuer>;

/// Build the three services over one shared pair of in-memory repositories.
///
/// # Examples
/// ```
/// use bloglist_backend::test_support::in_memory_services;
///
/// let (_blogs, _users, _auth) = in_memory_services(b"a-development-signing-secret-0123");
/// ```
pub fn in_memory_services(
    secret: &[u8],
) -> (
    Arc<MemoryBlogService>,
    Arc<MemoryUserService>,
    Arc<MemoryAuthService>,
) {
    let blog_repo = Arc::new(InMemoryBlogRepository::new());
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(Argon2PasswordHasher::low_cost().unwrap_or_default());
    let tokens = Arc::new(JwtTokenIssuer::new(secret));

    let blogs = Arc::new(BlogService::new(blog_repo.clone(), user_repo.clone()));
    let users = Arc::new(UserService::new(
        user_repo.clone(),
        blog_repo,
        hasher.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        user_repo,
        hasher,
        tokens,
        Arc::new(DefaultClock),
    ));
    (blogs, users, auth)
}

/// HTTP state over fresh in-memory services.
pub fn in_memory_state(secret: &[u8]) -> web::Data<HttpState> {
    let (blogs, users, auth) = in_memory_services(secret);
    web::Data::new(HttpState::new(blogs, users, auth))
}

/// Application with the full `/api` surface, JSON error handling and trace
/// middleware, as served by the binary.
pub fn api_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
}
