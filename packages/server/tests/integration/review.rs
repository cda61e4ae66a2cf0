use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use shop::entity::{asset, image, review};

use crate::common::{Caller, PNG_BYTES, TestApp, routes};

struct Fixture {
    app: TestApp,
    product_id: i32,
}

async fn fixture() -> Fixture {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;
    let product_id = app.create_product("101", "제주 감귤").await;
    app.signup("reviewer", None).await;
    Fixture { app, product_id }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn review_with_images_is_stored_unapproved() {
        let Fixture { app, product_id } = fixture().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                &routes::review_for_member(product_id, "reviewer"),
                ("review", &json!({ "content": "Very sweet", "rating": 5 })),
                vec![
                    ("images", "front.png", PNG_BYTES.to_vec()),
                    ("images", "box.jpg", b"\xff\xd8\xff jpeg".to_vec()),
                ],
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let data = &res.body["data"];
        assert_eq!(data["product_id"], product_id);
        assert_eq!(data["rating"], 5);
        assert_eq!(data["content"], "Very sweet");
        assert_eq!(data["is_approved"], false);
        let id = data["id"].as_i64().unwrap() as i32;
        assert_eq!(
            res.location.as_deref(),
            Some(routes::review(product_id, id).as_str())
        );

        // product image plus the two review images
        assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unknown_member_writes_nothing() {
        let Fixture { app, product_id } = fixture().await;
        let assets_before = asset::Entity::find().count(&app.db).await.unwrap();
        let images_before = image::Entity::find().count(&app.db).await.unwrap();

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                &routes::review_for_member(product_id, "nobody"),
                ("review", &json!({ "content": "Hmm", "rating": 3 })),
                vec![("images", "photo.png", b"another png".to_vec())],
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "MEMBER_NOT_FOUND");
        assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(asset::Entity::find().count(&app.db).await.unwrap(), assets_before);
        assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), images_before);
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let Fixture { app, .. } = fixture().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                &routes::review_for_member(9999, "reviewer"),
                ("review", &json!({ "content": "Hmm", "rating": 3 })),
                vec![],
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let Fixture { app, product_id } = fixture().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                &routes::review_for_member(product_id, "reviewer"),
                ("review", &json!({ "content": "Too good", "rating": 6 })),
                vec![],
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Rating must be 1-5");
        assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_review_part_is_rejected() {
        let Fixture { app, product_id } = fixture().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                &routes::review_for_member(product_id, "reviewer"),
                ("other", &json!({})),
                vec![],
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn reviews_are_listed_per_product() {
        let Fixture { app, product_id } = fixture().await;
        app.create_review(product_id, "reviewer", 4).await;
        app.create_review(product_id, "reviewer", 2).await;

        let res = app.get(&routes::reviews(product_id), Caller::Anonymous).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["reviews"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["data"]["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn review_detail_is_returned() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let res = app.get(&routes::review(product_id, id), Caller::Anonymous).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["id"], id);
        assert_eq!(res.body["data"]["rating"], 4);
    }

    #[tokio::test]
    async fn review_under_other_product_is_not_found() {
        let Fixture { app, product_id } = fixture().await;
        let other = app.create_product("101", "한라봉").await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let res = app.get(&routes::review(other, id), Caller::Anonymous).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "REVIEW_NOT_FOUND");
    }

    #[tokio::test]
    async fn unknown_review_is_not_found() {
        let Fixture { app, product_id } = fixture().await;

        let res = app.get(&routes::review(product_id, 321), Caller::Anonymous).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "REVIEW_NOT_FOUND");
    }
}

mod modify {
    use super::*;

    #[tokio::test]
    async fn content_and_rating_are_updated() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let res = app
            .put(
                &routes::review(product_id, id),
                &json!({ "content": "Even better the next day", "rating": 5 }),
                Caller::Member("reviewer"),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["content"], "Even better the next day");
        assert_eq!(res.body["data"]["rating"], 5);
    }

    #[tokio::test]
    async fn update_with_unknown_asset_is_rejected() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let res = app
            .put(
                &routes::review(product_id, id),
                &json!({ "content": "Changed", "rating": 3, "asset_id": 9999 }),
                Caller::Member("reviewer"),
            )
            .await;

        assert_eq!(res.status, 400);
        let unchanged = app.get(&routes::review(product_id, id), Caller::Anonymous).await;
        assert_eq!(unchanged.body["data"]["rating"], 4);
    }

    #[tokio::test]
    async fn deleted_review_is_gone() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let res = app
            .delete(&routes::review(product_id, id), Caller::Member("reviewer"))
            .await;
        assert_eq!(res.status, 204);

        let again = app
            .delete(&routes::review(product_id, id), Caller::Member("reviewer"))
            .await;
        assert_eq!(again.status, 404);
        assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
    }
}

mod ownership {
    use super::*;

    #[tokio::test]
    async fn edits_without_identity_are_unauthorized() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let put = app
            .put(
                &routes::review(product_id, id),
                &json!({ "content": "defaced", "rating": 1 }),
                Caller::Anonymous,
            )
            .await;
        assert_eq!(put.status, 401);
        assert_eq!(put.code(), "AUTH_ID_MISSING");

        let delete = app.delete(&routes::review(product_id, id), Caller::Anonymous).await;
        assert_eq!(delete.status, 401);

        let unchanged = app.get(&routes::review(product_id, id), Caller::Anonymous).await;
        assert_eq!(unchanged.body["data"]["content"], "Fresh and sweet");
        assert_eq!(unchanged.body["data"]["rating"], 4);
    }

    #[tokio::test]
    async fn other_member_cannot_edit_or_delete() {
        let Fixture { app, product_id } = fixture().await;
        app.signup("intruder", None).await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let put = app
            .put(
                &routes::review(product_id, id),
                &json!({ "content": "defaced", "rating": 1 }),
                Caller::Member("intruder"),
            )
            .await;
        assert_eq!(put.status, 403);
        assert_eq!(put.code(), "PERMISSION_DENIED");

        let delete = app
            .delete(&routes::review(product_id, id), Caller::Member("intruder"))
            .await;
        assert_eq!(delete.status, 403);

        assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 1);
        let unchanged = app.get(&routes::review(product_id, id), Caller::Anonymous).await;
        assert_eq!(unchanged.body["data"]["rating"], 4);
    }

    #[tokio::test]
    async fn unregistered_caller_cannot_edit() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let res = app
            .put(
                &routes::review(product_id, id),
                &json!({ "content": "defaced", "rating": 1 }),
                Caller::Member("not-a-member"),
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn admin_can_edit_and_delete_any_review() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 4).await;

        let put = app
            .put(
                &routes::review(product_id, id),
                &json!({ "content": "Edited by staff", "rating": 3 }),
                Caller::Admin,
            )
            .await;
        assert_eq!(put.status, 200, "{}", put.text);
        assert_eq!(put.body["data"]["content"], "Edited by staff");

        let delete = app.delete(&routes::review(product_id, id), Caller::Admin).await;
        assert_eq!(delete.status, 204);
        assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
    }
}

mod approve {
    use super::*;

    #[tokio::test]
    async fn approval_toggles() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 5).await;

        let first = app
            .post_empty(&routes::approve_review(id), Caller::Admin)
            .await;
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(first.body["review_id"], id);
        assert_eq!(first.body["is_approved"], true);

        let second = app
            .post_empty(&routes::approve_review(id), Caller::Admin)
            .await;
        assert_eq!(second.body["is_approved"], false);
    }

    #[tokio::test]
    async fn approval_requires_admin_role() {
        let Fixture { app, product_id } = fixture().await;
        let id = app.create_review(product_id, "reviewer", 5).await;

        let res = app
            .post_empty(&routes::approve_review(id), Caller::Member("reviewer"))
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.code(), "PERMISSION_DENIED");
    }
}
