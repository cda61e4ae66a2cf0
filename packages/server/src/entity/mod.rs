pub mod asset;
pub mod categorization;
pub mod category;
pub mod dib;
pub mod image;
pub mod member;
pub mod point_history;
pub mod product;
pub mod product_inquiry_post;
pub mod review;
