//! Builders wiring repositories and credential adapters into HTTP state.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use bloglist_backend::domain::ports::{BlogRepository, UserRepository};
use bloglist_backend::domain::{AuthService, BlogService, UserService};
use bloglist_backend::inbound::http::state::HttpState;
use bloglist_backend::outbound::memory::{InMemoryBlogRepository, InMemoryUserRepository};
use bloglist_backend::outbound::persistence::{DieselBlogRepository, DieselUserRepository};
use bloglist_backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

use super::ServerConfig;

/// Build the services over one repository pair.
fn services_over<B, U>(
    blogs: Arc<B>,
    users: Arc<U>,
    secret: &[u8],
    token_ttl: Duration,
) -> HttpState
where
    B: BlogRepository + 'static,
    U: UserRepository + 'static,
{
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenIssuer::new(secret));

    let blog_service = Arc::new(BlogService::new(blogs.clone(), users.clone()));
    let user_service = Arc::new(UserService::new(users.clone(), blogs, hasher.clone()));
    let auth_service = Arc::new(
        AuthService::new(users, hasher, tokens, Arc::new(DefaultClock)).with_token_ttl(token_ttl),
    );
    HttpState::new(blog_service, user_service, auth_service)
}

/// Build HTTP state using Diesel repositories when a pool is configured,
/// otherwise in-memory repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let secret = config.token_secret.as_bytes();
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            services_over(
                Arc::new(DieselBlogRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                secret,
                config.token_ttl,
            )
        }
        None => {
            info!("no database configured; using in-memory storage");
            services_over(
                Arc::new(InMemoryBlogRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                secret,
                config.token_ttl,
            )
        }
    };
    web::Data::new(state)
}
