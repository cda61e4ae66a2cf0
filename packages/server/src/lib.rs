pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod search;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::extractors::auth::{AUTH_ID, WWW_AUTHENTICATION};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "1.0.0",
        description = "Members, GG pass, products, reviews, inquiries, wish lists, categories and points"
    ),
    tags(
        (name = "Members", description = "Signup and member profiles"),
        (name = "GG Pass", description = "Loyalty pass subscription"),
        (name = "Points", description = "Point ledger"),
        (name = "Products", description = "Product catalog and search"),
        (name = "Admin Products", description = "Product registration and maintenance"),
        (name = "Reviews", description = "Product reviews with images"),
        (name = "Product Inquiries", description = "Questions about products and admin replies"),
        (name = "Dibs", description = "Wish list of the calling member"),
        (name = "Categories", description = "Category hierarchy"),
        (name = "Images", description = "Uploaded image download"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "auth_id",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                AUTH_ID,
                "Member uuid asserted by the gateway",
            ))),
        );
        components.add_security_scheme(
            "roles",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                WWW_AUTHENTICATION,
                "JSON array of roles, e.g. [\"ROLE_ADMIN\"]",
            ))),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::api_routes())
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
