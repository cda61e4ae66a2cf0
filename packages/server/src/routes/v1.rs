use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::handlers::multipart::image_upload_body_limit;
use crate::state::AppState;

pub fn shop_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/members", member_routes())
        .nest("/dibs", dib_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/images", image_routes())
}

pub fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/products", admin_product_routes())
        .nest("/reviews", admin_review_routes())
        .nest("/categories", admin_category_routes())
        .nest("/categorizations", admin_categorization_routes())
        .nest("/members", admin_member_routes())
}

fn member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::member::signup))
        .routes(routes!(handlers::member::get_member))
        .routes(routes!(handlers::member::get_ggpass))
        .routes(routes!(handlers::member::subscribe_ggpass))
        .routes(routes!(handlers::member::withdraw_ggpass))
        .routes(routes!(handlers::point::list_point_histories))
        .routes(routes!(handlers::member::list_member_inquiries))
}

fn dib_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::dib::create_dib,
        handlers::dib::list_dibs,
        handlers::dib::delete_dib
    ))
}

fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::product::list_products))
        .routes(routes!(handlers::product::search_products))
        .routes(routes!(handlers::product::get_product))
        .routes(routes!(
            handlers::product_inquiry::create_inquiry,
            handlers::product_inquiry::list_product_inquiries
        ))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::category::list_categories))
        .routes(routes!(handlers::product::list_category_products))
}

fn image_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::image::download_image))
}

fn admin_product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::admin_product::create_product,
            handlers::admin_product::list_products
        ))
        .routes(routes!(
            handlers::admin_product::get_product,
            handlers::admin_product::update_product,
            handlers::admin_product::delete_product
        ))
        .routes(routes!(handlers::product_inquiry::reply_inquiry))
        .routes(routes!(handlers::product_inquiry::delete_inquiry))
        .layer(image_upload_body_limit())
}

fn admin_review_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::review::approve_review))
}

fn admin_category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::category::admin_list_categories,
            handlers::category::create_category
        ))
        .routes(routes!(
            handlers::category::get_category,
            handlers::category::update_category,
            handlers::category::delete_category
        ))
}

fn admin_categorization_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::category::list_categorizations))
}

fn admin_member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::point::create_point_history))
}
