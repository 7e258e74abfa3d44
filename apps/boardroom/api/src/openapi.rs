use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer token scheme referenced by the protected user paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token minted with `boardroom-api issue-token`."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Boardroom API",
        version = "0.1.0",
        description = "User accounts with their roles, wallet and board membership"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
