//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BlogsCommand, BlogsQuery, LoginService, TokenAuthenticator, UserRegistration, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub blogs: Arc<dyn BlogsQuery>,
    pub blog_commands: Arc<dyn BlogsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenAuthenticator>,
}

impl HttpState {
    /// Build state from one service per concern, each serving both of its
    /// ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use bloglist_backend::test_support::in_memory_services;
    /// use bloglist_backend::inbound::http::state::HttpState;
    ///
    /// let (blogs, users, auth) = in_memory_services(b"a-development-signing-secret-0123");
    /// let state = HttpState::new(blogs, users, auth);
    /// let _login = state.login.clone();
    /// ```
    pub fn new<B, U, A>(blogs: Arc<B>, users: Arc<U>, auth: Arc<A>) -> Self
    where
        B: BlogsQuery + BlogsCommand + 'static,
        U: UsersQuery + UserRegistration + 'static,
        A: LoginService + TokenAuthenticator + 'static,
    {
        Self {
            blogs: blogs.clone(),
            blog_commands: blogs,
            users: users.clone(),
            registration: users,
            login: auth.clone(),
            tokens: auth,
        }
    }
}
