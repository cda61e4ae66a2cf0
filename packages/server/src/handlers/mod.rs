pub mod admin_product;
pub mod category;
pub mod dib;
pub mod image;
pub mod member;
pub mod multipart;
pub mod point;
pub mod product;
pub mod product_inquiry;
pub mod review;

use axum::http::{HeaderName, header};

/// `Location` header pointing at the created or updated resource.
pub fn location(path: String) -> [(HeaderName, String); 1] {
    [(header::LOCATION, path)]
}
