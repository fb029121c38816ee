//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockBlogsCommand, MockBlogsQuery, MockLoginService, MockTokenAuthenticator,
    MockUserRegistration, MockUsersQuery,
};
use crate::domain::{AuthenticatedIdentity, UserId};

use super::state::HttpState;
use super::validation::json_config;

/// Token accepted by [`TestPorts::accepting_token`].
pub const VALID_TOKEN: &str = "valid.test.token";

/// Mocked driving ports; unset mocks reject every call.
#[derive(Default)]
pub struct TestPorts {
    pub blogs: MockBlogsQuery,
    pub blog_commands: MockBlogsCommand,
    pub users: MockUsersQuery,
    pub registration: MockUserRegistration,
    pub login: MockLoginService,
    pub tokens: MockTokenAuthenticator,
}

impl TestPorts {
    /// Ports whose authenticator resolves [`VALID_TOKEN`] to `identity`.
    pub fn accepting_token(identity: AuthenticatedIdentity) -> Self {
        let mut ports = Self::default();
        ports
            .tokens
            .expect_authenticate()
            .withf(|token| token == VALID_TOKEN)
            .returning(move |_| Ok(identity.clone()));
        ports
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            blogs: Arc::new(self.blogs),
            blog_commands: Arc::new(self.blog_commands),
            users: Arc::new(self.users),
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// Identity used by handler tests.
pub fn test_identity() -> AuthenticatedIdentity {
    AuthenticatedIdentity {
        id: UserId::random(),
        username: "root".to_owned(),
    }
}

/// `Authorization` header carrying [`VALID_TOKEN`].
pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {VALID_TOKEN}"))
}

/// App with `state`, the JSON error handler and an `/api` scope.
pub fn test_app(
    state: web::Data<HttpState>,
    configure: impl FnOnce(&mut web::ServiceConfig) + 'static,
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
        .service(web::scope("/api").configure(configure))
}
