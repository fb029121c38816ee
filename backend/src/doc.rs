//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response
//! bodies, the shared error envelope and the bearer-token security scheme.
//! The document is served by Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::blogs::{BlogRequest, BlogResponse, OwnerResponse};
use crate::inbound::http::login::{LoginRequest, LoginResponse};
use crate::inbound::http::users::{BlogSummaryResponse, SignupRequest, UserResponse};

/// Enrich the generated document with the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog list API",
        description = "Blog bookmarks with token-authenticated authorship."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::login::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BlogRequest,
        BlogResponse,
        OwnerResponse,
        SignupRequest,
        UserResponse,
        BlogSummaryResponse,
        LoginRequest,
        LoginResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "blogs", description = "Blog bookmarks"),
        (name = "users", description = "Account signup and listing"),
        (name = "login", description = "Bearer token issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Structural checks on the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    #[case("/api/blogs")]
    #[case("/api/blogs/{id}")]
    #[case("/api/users")]
    #[case("/api/login")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[rstest]
    fn blog_response_schema_has_owner_field() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        let schema = components
            .schemas
            .get("BlogResponse")
            .expect("BlogResponse schema");
        assert!(object_has_field(schema, "user"));
        assert!(object_has_field(schema, "likes"));
    }
}
