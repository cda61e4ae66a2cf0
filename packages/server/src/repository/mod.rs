//! Query functions per entity, generic over the connection so they run the
//! same inside or outside a transaction.

pub mod asset;
pub mod category;
pub mod dib;
pub mod member;
pub mod point_history;
pub mod product;
pub mod product_inquiry_post;
pub mod review;
