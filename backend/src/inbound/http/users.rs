//! Users API handlers.
//!
//! ```text
//! POST /api/users {"username":"mluukkai","name":"Matti Luukkainen","password":"salainen"}
//! GET  /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{BlogSummary, UserWithBlogs};
use crate::domain::{Error, Registration, RegistrationValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::registration_error;

/// Signup request body for `POST /api/users`.
///
/// Absent fields deserialise as empty strings so they fail the length
/// checks instead of the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
    #[schema(example = "salainen")]
    pub password: String,
}

impl TryFrom<SignupRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.name, &value.password)
    }
}

/// Blog fields embedded in a user listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct BlogSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
}

impl From<BlogSummary> for BlogSummaryResponse {
    fn from(summary: BlogSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            title: summary.title,
            author: summary.author,
            url: summary.url,
        }
    }
}

/// Public account representation; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
    pub blogs: Vec<BlogSummaryResponse>,
}

impl UserResponse {
    fn from_user(user: &User, blogs: Vec<BlogSummaryResponse>) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().to_string(),
            name: user.name().to_owned(),
            blogs,
        }
    }
}

impl From<UserWithBlogs> for UserResponse {
    fn from(value: UserWithBlogs) -> Self {
        let blogs = value
            .blogs
            .into_iter()
            .map(BlogSummaryResponse::from)
            .collect();
        Self::from_user(&value.user, blogs)
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Too short or duplicate username", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(registration_error)?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from_user(&user, Vec::new())))
}

/// List every account with the blogs it created.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}
