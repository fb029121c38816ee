//! HTTP inbound adapter exposing the blog list REST endpoints.

pub mod auth;
pub mod blogs;
pub mod error;
pub mod health;
pub mod login;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bloglist_backend::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(blogs::list_blogs)
        .service(blogs::create_blog)
        .service(blogs::update_blog)
        .service(blogs::delete_blog)
        .service(users::create_user)
        .service(users::list_users)
        .service(login::login);
}
