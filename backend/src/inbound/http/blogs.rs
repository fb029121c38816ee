//! Blog API handlers.
//!
//! ```text
//! GET    /api/blogs
//! POST   /api/blogs      {"title":"React patterns","author":"Michael Chan","url":"https://reactpatterns.com/"}
//! PUT    /api/blogs/{id} {"title":"React patterns","author":"Michael Chan","url":"https://reactpatterns.com/","likes":8}
//! DELETE /api/blogs/{id}
//! ```
//!
//! Mutations require `Authorization: Bearer <token>`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{BlogWithOwner, OwnerSummary};
use crate::domain::{BlogDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{blog_draft_error, parse_blog_id};

/// Body for creating or replacing a blog.
///
/// `title` and `url` are required; `author` defaults to empty and `likes`
/// to zero.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct BlogRequest {
    #[schema(example = "React patterns")]
    pub title: Option<String>,
    #[schema(example = "Michael Chan")]
    pub author: Option<String>,
    #[schema(example = "https://reactpatterns.com/")]
    pub url: Option<String>,
    #[schema(example = 7)]
    pub likes: Option<i64>,
}

impl BlogRequest {
    fn into_draft(self) -> Result<BlogDraft, Error> {
        BlogDraft::new(self.title, self.author, self.url, self.likes).map_err(blog_draft_error)
    }
}

/// Public owner fields embedded in a blog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct OwnerResponse {
    pub id: Uuid,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}

impl From<OwnerSummary> for OwnerResponse {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            id: *owner.id.as_uuid(),
            username: owner.username,
            name: owner.name,
        }
    }
}

/// Blog as returned to clients; `user` is `null` for unowned blogs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u32,
    pub user: Option<OwnerResponse>,
}

impl From<BlogWithOwner> for BlogResponse {
    fn from(value: BlogWithOwner) -> Self {
        let BlogWithOwner { blog, owner } = value;
        Self {
            id: *blog.id().as_uuid(),
            title: blog.title().to_owned(),
            author: blog.author().to_owned(),
            url: blog.url().to_owned(),
            likes: blog.likes(),
            user: owner.map(OwnerResponse::from),
        }
    }
}

/// List every blog with its creator.
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "Blogs", body = [BlogResponse]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs",
    security([])
)]
#[get("/blogs")]
pub async fn list_blogs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BlogResponse>>> {
    let blogs = state.blogs.list_blogs().await?;
    Ok(web::Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

/// Create a blog owned by the caller.
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Missing title or url", body = Error),
        (status = 401, description = "Token missing, invalid or expired", body = Error)
    ),
    tags = ["blogs"],
    operation_id = "createBlog",
    security(("bearer" = []))
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<BlogRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let created = state
        .blog_commands
        .create_blog(user.identity(), draft)
        .await?;
    Ok(HttpResponse::Created().json(BlogResponse::from(created)))
}

/// Replace a blog's content.
///
/// Only the creator may update an owned blog. Responds 201 with the stored
/// result.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier")),
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog replaced", body = BlogResponse),
        (status = 400, description = "Malformed id or invalid body", body = Error),
        (status = 401, description = "Not authenticated or not the creator", body = Error),
        (status = 404, description = "Blog not found", body = Error)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog",
    security(("bearer" = []))
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<BlogRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let draft = payload.into_inner().into_draft()?;
    let updated = state
        .blog_commands
        .update_blog(user.identity(), id, draft)
        .await?;
    Ok(HttpResponse::Created().json(BlogResponse::from(updated)))
}

/// Delete a blog created by the caller.
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Not authenticated or not the creator", body = Error),
        (status = 404, description = "Blog not found", body = Error)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog",
    security(("bearer" = []))
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    state.blog_commands.delete_blog(user.identity(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
