use sea_orm::{EntityTrait, PaginatorTrait};

use shop::entity::{image, product};

use crate::common::{Caller, PNG_BYTES, TestApp, product_body, routes};

async fn app_with_category() -> TestApp {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;
    app
}

mod admin_create {
    use super::*;

    #[tokio::test]
    async fn product_is_created_with_its_image() {
        let app = app_with_category().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                routes::ADMIN_PRODUCTS,
                ("product", &product_body("101", "자몽 1kg")),
                vec![("image", "grapefruit.png", PNG_BYTES.to_vec())],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();
        assert_eq!(
            res.location.as_deref(),
            Some(routes::admin_product(id).as_str())
        );
        assert_eq!(res.body["name"], "자몽 1kg");
        assert!(res.body["deleted_at"].is_null());
        let images = res.body["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0]["name"], "grapefruit.png");
        assert_eq!(images[0]["content_type"], "image/png");
        assert_eq!(images[0]["sequence"], 1);
    }

    #[tokio::test]
    async fn stored_image_can_be_downloaded() {
        let app = app_with_category().await;
        let id = app.create_product("101", "레몬").await;

        let detail = app.get(&routes::product(id), Caller::Anonymous).await;
        let image_id = detail.body["images"][0]["id"].as_i64().unwrap();

        let res = app
            .client
            .get(format!("http://{}{}", app.addr, routes::image(image_id)))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "image/png");
        let etag = res.headers()["etag"].to_str().unwrap().to_string();
        assert_eq!(res.bytes().await.unwrap().as_ref(), PNG_BYTES);

        let cached = app
            .client
            .get(format!("http://{}{}", app.addr, routes::image(image_id)))
            .header("If-None-Match", etag)
            .send()
            .await
            .unwrap();
        assert_eq!(cached.status(), 304);
    }

    #[tokio::test]
    async fn missing_image_is_rejected() {
        let app = app_with_category().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                routes::ADMIN_PRODUCTS,
                ("product", &product_body("101", "사과")),
                vec![],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert_eq!(product::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected() {
        let app = app_with_category().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                routes::ADMIN_PRODUCTS,
                ("product", &product_body("101", "사과")),
                vec![("image", "notes.txt", b"plain text".to_vec())],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let app = app_with_category().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                routes::ADMIN_PRODUCTS,
                ("product", &product_body("999", "사과")),
                vec![("image", "apple.png", PNG_BYTES.to_vec())],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "CATEGORY_NOT_FOUND");
        assert_eq!(product::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_requires_admin_role() {
        let app = app_with_category().await;

        let res = app
            .send_multipart(
                reqwest::Method::POST,
                routes::ADMIN_PRODUCTS,
                ("product", &product_body("101", "사과")),
                vec![("image", "apple.png", PNG_BYTES.to_vec())],
                Caller::Member("someone"),
            )
            .await;

        assert_eq!(res.status, 403);
    }
}

mod admin_update {
    use super::*;

    #[tokio::test]
    async fn update_without_image_keeps_asset() {
        let app = app_with_category().await;
        let id = app.create_product("101", "바나나").await;
        let before = app.get(&routes::product(id), Caller::Anonymous).await;

        let mut body = product_body("101", "유기농 바나나");
        body["price"] = serde_json::json!(4900);
        let res = app
            .send_multipart(
                reqwest::Method::PUT,
                &routes::admin_product(id),
                ("product", &body),
                vec![],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "유기농 바나나");
        assert_eq!(res.body["price"], 4900);
        assert_eq!(res.body["asset_id"], before.body["asset_id"]);
        assert_eq!(res.body["images"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_with_image_replaces_asset() {
        let app = app_with_category().await;
        let id = app.create_product("101", "키위").await;
        let before = app.get(&routes::product(id), Caller::Anonymous).await;

        let res = app
            .send_multipart(
                reqwest::Method::PUT,
                &routes::admin_product(id),
                ("product", &product_body("101", "키위")),
                vec![("image", "kiwi.jpg", b"\xff\xd8\xff fake jpeg".to_vec())],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_ne!(res.body["asset_id"], before.body["asset_id"]);
        assert_eq!(res.body["images"][0]["name"], "kiwi.jpg");
        assert_eq!(res.body["images"][0]["content_type"], "image/jpeg");
    }

    #[tokio::test]
    async fn update_unknown_product_is_not_found() {
        let app = app_with_category().await;

        let res = app
            .send_multipart(
                reqwest::Method::PUT,
                &routes::admin_product(404),
                ("product", &product_body("101", "없음")),
                vec![],
                Caller::Admin,
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "PRODUCT_NOT_FOUND");
    }
}

mod soft_delete {
    use super::*;

    #[tokio::test]
    async fn deleted_product_stays_readable_but_leaves_listings() {
        let app = app_with_category().await;
        let id = app.create_product("101", "망고").await;

        let res = app.delete(&routes::admin_product(id), Caller::Admin).await;
        assert_eq!(res.status, 204);

        assert_eq!(product::Entity::find().count(&app.db).await.unwrap(), 1);

        let detail = app.get(&routes::product(id), Caller::Anonymous).await;
        assert_eq!(detail.status, 200);
        assert!(detail.body["deleted_at"].is_string());

        let list = app.get(routes::PRODUCTS, Caller::Anonymous).await;
        assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
        assert_eq!(list.body["pagination"]["total"], 0);

        let by_category = app
            .get(&routes::category_products("101"), Caller::Anonymous)
            .await;
        assert_eq!(by_category.body["data"].as_array().unwrap().len(), 0);

        let search = app
            .get(
                &format!("{}?keyword=망고", routes::PRODUCT_SEARCH),
                Caller::Anonymous,
            )
            .await;
        assert_eq!(search.body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn deleting_twice_succeeds() {
        let app = app_with_category().await;
        let id = app.create_product("101", "복숭아").await;

        assert_eq!(
            app.delete(&routes::admin_product(id), Caller::Admin)
                .await
                .status,
            204
        );
        assert_eq!(
            app.delete(&routes::admin_product(id), Caller::Admin)
                .await
                .status,
            204
        );
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::product(12345), Caller::Anonymous).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn pages_split_at_page_size() {
        let app = app_with_category().await;
        for i in 0..10 {
            app.create_product("101", &format!("상품 {i}")).await;
        }

        let first = app
            .get(&format!("{}?page=0&size=10", routes::PRODUCTS), Caller::Anonymous)
            .await;
        assert_eq!(first.status, 200);
        assert_eq!(first.body["data"].as_array().unwrap().len(), 10);
        assert_eq!(first.body["pagination"]["total"], 10);
        assert_eq!(first.body["pagination"]["total_pages"], 1);

        let second = app
            .get(&format!("{}?page=1&size=10", routes::PRODUCTS), Caller::Anonymous)
            .await;
        assert_eq!(second.status, 200);
        assert_eq!(second.body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn out_of_range_page_is_rejected() {
        let app = app_with_category().await;
        app.create_product("101", "석류").await;

        let res = app
            .get(
                &format!("{}?page=18446744073709551615", routes::PRODUCTS),
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let still_up = app.get(routes::PRODUCTS, Caller::Anonymous).await;
        assert_eq!(still_up.status, 200);
    }

    #[tokio::test]
    async fn category_listing_matches_exact_code() {
        let app = app_with_category().await;
        app.create_category("102", "채소").await;
        app.create_product("101", "오렌지").await;
        app.create_product("102", "당근").await;

        let res = app
            .get(&routes::category_products("102"), Caller::Anonymous)
            .await;

        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["name"], "당근");
    }

    #[tokio::test]
    async fn listing_unknown_category_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&routes::category_products("000"), Caller::Anonymous)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "CATEGORY_NOT_FOUND");
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn name_search_is_case_insensitive_and_ranked() {
        let app = app_with_category().await;
        app.create_product("101", "Green Apple Juice").await;
        app.create_product("101", "apple").await;
        app.create_product("101", "Pineapple").await;
        app.create_product("101", "Banana").await;

        let res = app
            .get(
                &format!("{}?keyword=APPLE", routes::PRODUCT_SEARCH),
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let names: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["apple", "Pineapple", "Green Apple Juice"]);
    }

    #[tokio::test]
    async fn renamed_product_is_found_by_new_name() {
        let app = app_with_category().await;
        let id = app.create_product("101", "청포도").await;

        let res = app
            .send_multipart(
                reqwest::Method::PUT,
                &routes::admin_product(id),
                ("product", &product_body("101", "샤인머스캣")),
                vec![],
                Caller::Admin,
            )
            .await;
        assert_eq!(res.status, 200);

        let old = app
            .get(
                &format!("{}?keyword=청포도", routes::PRODUCT_SEARCH),
                Caller::Anonymous,
            )
            .await;
        assert_eq!(old.body["data"].as_array().unwrap().len(), 0);

        let new = app
            .get(
                &format!("{}?keyword=머스캣", routes::PRODUCT_SEARCH),
                Caller::Anonymous,
            )
            .await;
        assert_eq!(new.body["data"][0]["id"], id);
    }

    #[tokio::test]
    async fn blank_keyword_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get(
                &format!("{}?keyword=%20", routes::PRODUCT_SEARCH),
                Caller::Anonymous,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}
