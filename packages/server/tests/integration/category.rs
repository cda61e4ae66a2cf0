use sea_orm::EntityTrait;
use serde_json::json;

use shop::entity::category;

use crate::common::{Caller, PRODUCT_CATEGORIZATION, TestApp, routes};

#[tokio::test]
async fn default_categorizations_are_seeded() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ADMIN_CATEGORIZATIONS, Caller::Admin).await;

    assert_eq!(res.status, 200);
    let codes: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&PRODUCT_CATEGORIZATION));
}

#[tokio::test]
async fn categories_are_listed_with_their_categorization() {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;

    let res = app.get(routes::CATEGORIES, Caller::Anonymous).await;

    assert_eq!(res.status, 200);
    let categories = res.body.as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["category_code"], "101");
    assert_eq!(categories[0]["category_name"], "과일");
    assert_eq!(categories[0]["categorization_code"], PRODUCT_CATEGORIZATION);
    assert_eq!(categories[0]["categorization_name"], "상품");
}

#[tokio::test]
async fn create_under_unknown_categorization_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::ADMIN_CATEGORIES,
            &json!({
                "category_code": "901",
                "categorization_code": "999",
                "name": "미분류",
                "sequence": 1,
            }),
            Caller::Admin,
        )
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn duplicate_category_code_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;

    let res = app
        .post(
            routes::ADMIN_CATEGORIES,
            &json!({
                "category_code": "101",
                "categorization_code": PRODUCT_CATEGORIZATION,
                "name": "중복",
                "sequence": 2,
            }),
            Caller::Admin,
        )
        .await;

    assert_eq!(res.status, 409);
}

#[tokio::test]
async fn update_with_same_categorization_keeps_it() {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;

    let res = app
        .put(
            &routes::admin_category("101"),
            &json!({
                "categorization_code": PRODUCT_CATEGORIZATION,
                "name": "제철 과일",
                "sequence": 3,
            }),
            Caller::Admin,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["categorization_code"], PRODUCT_CATEGORIZATION);
    assert_eq!(res.body["category_name"], "제철 과일");
    assert_eq!(res.body["sequence"], 3);
}

#[tokio::test]
async fn update_with_unknown_categorization_leaves_record_unchanged() {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;
    let before = category::Entity::find_by_id("101".to_string())
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();

    let res = app
        .put(
            &routes::admin_category("101"),
            &json!({
                "categorization_code": "999",
                "name": "바뀐 이름",
                "sequence": 9,
            }),
            Caller::Admin,
        )
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "CATEGORY_NOT_FOUND");
    let after = category::Entity::find_by_id("101".to_string())
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_of_unknown_category_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .put(
            &routes::admin_category("555"),
            &json!({
                "categorization_code": PRODUCT_CATEGORIZATION,
                "name": "없음",
                "sequence": 1,
            }),
            Caller::Admin,
        )
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn category_in_use_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    app.create_category("101", "과일").await;
    app.create_category("102", "채소").await;
    app.create_product("101", "포도").await;

    let in_use = app.delete(&routes::admin_category("101"), Caller::Admin).await;
    assert_eq!(in_use.status, 409);

    let unused = app.delete(&routes::admin_category("102"), Caller::Admin).await;
    assert_eq!(unused.status, 204);

    let res = app.get(&routes::admin_category("102"), Caller::Admin).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn category_admin_requires_admin_role() {
    let app = TestApp::spawn().await;

    let res = app
        .get(routes::ADMIN_CATEGORIES, Caller::Member("shopper"))
        .await;

    assert_eq!(res.status, 403);
}
