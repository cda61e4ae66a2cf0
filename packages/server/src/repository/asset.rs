use chrono::Utc;
use sea_orm::*;

use crate::entity::{asset, image};

/// An image already written to the blob store, ready to be recorded.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub image_address: String,
    pub name: String,
    pub content_type: Option<String>,
    pub size: i64,
}

/// Create an asset holding `images` in the given order.
pub async fn create_with_images<C: ConnectionTrait>(
    conn: &C,
    images: Vec<NewImage>,
) -> Result<(asset::Model, Vec<image::Model>), DbErr> {
    let now = Utc::now();
    let asset = asset::ActiveModel {
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    let mut saved = Vec::with_capacity(images.len());
    for (idx, img) in images.into_iter().enumerate() {
        let model = image::ActiveModel {
            asset_id: Set(asset.id),
            image_address: Set(img.image_address),
            name: Set(img.name),
            content_type: Set(img.content_type),
            size: Set(img.size),
            sequence: Set(idx as i32 + 1),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        saved.push(model);
    }

    Ok((asset, saved))
}

pub async fn exists<C: ConnectionTrait>(conn: &C, asset_id: i32) -> Result<bool, DbErr> {
    Ok(asset::Entity::find_by_id(asset_id).one(conn).await?.is_some())
}

pub async fn images_of<C: ConnectionTrait>(
    conn: &C,
    asset_id: i32,
) -> Result<Vec<image::Model>, DbErr> {
    image::Entity::find()
        .filter(image::Column::AssetId.eq(asset_id))
        .order_by_asc(image::Column::Sequence)
        .all(conn)
        .await
}

pub async fn find_image<C: ConnectionTrait>(
    conn: &C,
    image_id: i32,
) -> Result<Option<image::Model>, DbErr> {
    image::Entity::find_by_id(image_id).one(conn).await
}
