//! Login handler issuing bearer tokens.
//!
//! ```text
//! POST /api/login {"username":"mluukkai","password":"salainen"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, LoginSession, LoginValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "salainen")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Token and account details returned on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token,
            username: session.username,
            name: session.name,
        }
    }
}

// Blank fields fail like wrong credentials so the response never hints at
// which part was wrong.
fn map_login_validation_error(_err: LoginValidationError) -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["login"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let session = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse::from(session)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};
    use serde_json::{Value, json};

    fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(login);
    }

    async fn post_login(ports: TestPorts, payload: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(ports.into_state(), configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("JSON body"))
    }

    #[given("a login service that accepts the root password")]
    fn a_login_service_accepting_root() -> TestPorts {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_login()
            .withf(|credentials| {
                credentials.username() == "root" && credentials.password() == "sekret"
            })
            .return_once(|_| {
                Ok(LoginSession {
                    token: "signed.token.value".to_owned(),
                    username: "root".to_owned(),
                    name: "Superuser".to_owned(),
                })
            });
        ports
    }

    #[when("root logs in with the right password")]
    fn root_logs_in() -> Value {
        json!({"username": "root", "password": "sekret"})
    }

    #[then("the response carries the token and account details")]
    fn the_response_carries_the_token(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("token").and_then(Value::as_str),
            Some("signed.token.value")
        );
        assert_eq!(body.get("username").and_then(Value::as_str), Some("root"));
        assert_eq!(body.get("name").and_then(Value::as_str), Some("Superuser"));
    }

    #[rstest]
    #[actix_web::test]
    async fn login_returns_token_and_profile() {
        let ports = a_login_service_accepting_root();
        let payload = root_logs_in();
        let (status, body) = post_login(ports, payload).await;
        the_response_carries_the_token(status, &body);
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let mut ports = TestPorts::default();
        ports
            .login
            .expect_login()
            .return_once(|_| Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)));

        let (status, body) =
            post_login(ports, json!({"username": "root", "password": "wrong"})).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some(INVALID_CREDENTIALS_MESSAGE)
        );
        assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));
    }

    #[rstest]
    #[case(json!({"username": "   ", "password": "sekret"}))]
    #[case(json!({"username": "root", "password": ""}))]
    #[case(json!({}))]
    #[actix_web::test]
    async fn blank_fields_fail_like_wrong_credentials(#[case] payload: Value) {
        let mut ports = TestPorts::default();
        ports.login.expect_login().times(0);

        let (status, body) = post_login(ports, payload).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some(INVALID_CREDENTIALS_MESSAGE)
        );
    }
}
