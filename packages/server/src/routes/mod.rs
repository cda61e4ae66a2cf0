mod v1;

use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::handlers::multipart::image_upload_body_limit;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/shop/v1", v1::shop_routes())
        .nest("/admin/v1", v1::admin_routes())
        .nest("/products", review_routes())
}

/// Review endpoints keep their unversioned `/products/{product_id}/review` paths.
fn review_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::review::list_reviews))
        .routes(routes!(
            handlers::review::create_review,
            handlers::review::get_review,
            handlers::review::update_review,
            handlers::review::delete_review
        ))
        .layer(image_upload_body_limit())
}
