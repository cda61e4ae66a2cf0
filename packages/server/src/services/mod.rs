pub mod category;
pub mod dib;
pub mod image;
pub mod member;
pub mod point;
pub mod product;
pub mod product_inquiry;
pub mod review;
