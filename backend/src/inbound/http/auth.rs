//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers that mutate blogs take an [`AuthenticatedUser`] argument; the
//! extractor reads `Authorization: Bearer <token>` and resolves it through
//! the [`TokenAuthenticator`](crate::domain::ports::TokenAuthenticator) port
//! held in [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{AuthenticatedIdentity, Error};

use super::state::HttpState;

/// Message returned when no bearer token accompanies the request.
pub const TOKEN_MISSING_MESSAGE: &str = "token missing";
/// Message returned when the header is not a usable bearer token.
pub const TOKEN_INVALID_MESSAGE: &str = "token invalid";

const BEARER_PREFIX: &str = "bearer ";

/// Identity of the caller, resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub AuthenticatedIdentity);

impl AuthenticatedUser {
    /// Verified identity of the caller.
    pub fn identity(&self) -> &AuthenticatedIdentity {
        &self.0
    }
}

/// Extract the raw token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
pub(crate) fn bearer_token(header: Option<&str>) -> Result<&str, Error> {
    let header = header.ok_or_else(|| Error::unauthorized(TOKEN_MISSING_MESSAGE))?;
    match header.split_at_checked(BEARER_PREFIX.len()) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
            let token = rest.trim();
            if token.is_empty() {
                Err(Error::unauthorized(TOKEN_MISSING_MESSAGE))
            } else {
                Ok(token)
            }
        }
        _ => Err(Error::unauthorized(TOKEN_INVALID_MESSAGE)),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| Error::unauthorized(TOKEN_INVALID_MESSAGE))?,
        ),
        None => None,
    };
    let token = bearer_token(header)?;
    state.tokens.authenticate(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[given("an authorization header carrying a bearer token")]
    fn a_bearer_header() -> Option<&'static str> {
        Some("Bearer eyJhbGciOiJIUzI1NiJ9.e30.sig")
    }

    #[given("a request without an authorization header")]
    fn no_header() -> Option<&'static str> {
        None
    }

    #[when("the token is extracted")]
    fn the_token_is_extracted(header: Option<&'static str>) -> Result<&'static str, Error> {
        bearer_token(header)
    }

    #[then("the raw token is returned")]
    fn the_raw_token_is_returned(result: Result<&'static str, Error>) {
        assert_eq!(result.expect("token present"), "eyJhbGciOiJIUzI1NiJ9.e30.sig");
    }

    #[then("the caller is told the token is missing")]
    fn the_caller_is_told_the_token_is_missing(result: Result<&'static str, Error>) {
        let error = result.expect_err("token absent");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), TOKEN_MISSING_MESSAGE);
    }

    #[rstest]
    fn bearer_tokens_are_extracted() {
        let header = a_bearer_header();
        let result = the_token_is_extracted(header);
        the_raw_token_is_returned(result);
    }

    #[rstest]
    fn absent_headers_report_missing_tokens() {
        let header = no_header();
        let result = the_token_is_extracted(header);
        the_caller_is_told_the_token_is_missing(result);
    }

    #[rstest]
    #[case("bearer abc", "abc")]
    #[case("BEARER abc", "abc")]
    #[case("Bearer   abc  ", "abc")]
    fn scheme_is_case_insensitive(#[case] header: &str, #[case] token: &str) {
        assert_eq!(bearer_token(Some(header)).expect("token"), token);
    }

    #[rstest]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("abc")]
    #[case("Bearerabc")]
    fn other_schemes_are_invalid(#[case] header: &str) {
        let error = bearer_token(Some(header)).expect_err("not a bearer token");
        assert_eq!(error.message(), TOKEN_INVALID_MESSAGE);
    }

    #[rstest]
    fn empty_bearer_is_missing() {
        let error = bearer_token(Some("Bearer ")).expect_err("empty token");
        assert_eq!(error.message(), TOKEN_MISSING_MESSAGE);
    }
}
