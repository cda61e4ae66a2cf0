use std::net::SocketAddr;
use std::sync::Arc;

use ::common::storage::FilesystemBlobStore;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tempfile::TempDir;

use shop::config::{
    AppConfig, CorsConfig, DatabaseConfig, GgPassConfig, PointConfig, SearchConfig, ServerConfig,
};
use shop::search::ProductIndex;
use shop::state::AppState;

pub const ADMIN_ROLES: &str = r#"["ROLE_ADMIN"]"#;
pub const USER_ROLES: &str = r#"["ROLE_USER"]"#;
pub const ADMIN_UUID: &str = "admin-0000";

/// Categorization seeded at startup that test categories hang off.
pub const PRODUCT_CATEGORIZATION: &str = "100";

/// A 1x1 transparent PNG.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];

pub mod routes {
    pub const SIGNUP: &str = "/shop/v1/members/signup";
    pub const DIBS: &str = "/shop/v1/dibs";
    pub const PRODUCTS: &str = "/shop/v1/products";
    pub const PRODUCT_SEARCH: &str = "/shop/v1/products/search";
    pub const CATEGORIES: &str = "/shop/v1/categories";
    pub const ADMIN_PRODUCTS: &str = "/admin/v1/products";
    pub const ADMIN_CATEGORIES: &str = "/admin/v1/categories";
    pub const ADMIN_CATEGORIZATIONS: &str = "/admin/v1/categorizations";

    pub fn member(id: i32) -> String {
        format!("/shop/v1/members/{id}")
    }

    pub fn ggpass(id: i32) -> String {
        format!("/shop/v1/members/{id}/ggpass")
    }

    pub fn ggpass_subscribe(id: i32) -> String {
        format!("/shop/v1/members/{id}/ggpass/subscribe")
    }

    pub fn ggpass_withdraw(id: i32) -> String {
        format!("/shop/v1/members/{id}/ggpass/withdraw")
    }

    pub fn points(id: i32) -> String {
        format!("/shop/v1/members/{id}/points")
    }

    pub fn admin_points(id: i32) -> String {
        format!("/admin/v1/members/{id}/points")
    }

    pub fn member_inquiries(id: i32) -> String {
        format!("/shop/v1/members/{id}/product-inquiries")
    }

    pub fn product(id: i32) -> String {
        format!("/shop/v1/products/{id}")
    }

    pub fn admin_product(id: i32) -> String {
        format!("/admin/v1/products/{id}")
    }

    pub fn category_products(code: &str) -> String {
        format!("/shop/v1/categories/{code}/products")
    }

    pub fn admin_category(code: &str) -> String {
        format!("/admin/v1/categories/{code}")
    }

    pub fn image(id: i64) -> String {
        format!("/shop/v1/images/{id}")
    }

    pub fn inquiries(product_id: i32) -> String {
        format!("/shop/v1/products/{product_id}/inquiries")
    }

    pub fn inquiry_reply(product_id: i32, inquiry_id: i32) -> String {
        format!("/admin/v1/products/{product_id}/inquiries/{inquiry_id}/reply")
    }

    pub fn admin_inquiry(product_id: i32, inquiry_id: i32) -> String {
        format!("/admin/v1/products/{product_id}/inquiries/{inquiry_id}")
    }

    pub fn reviews(product_id: i32) -> String {
        format!("/products/{product_id}/review")
    }

    pub fn review_for_member(product_id: i32, member_uuid: &str) -> String {
        format!("/products/{product_id}/review/{member_uuid}")
    }

    pub fn review(product_id: i32, review_id: i32) -> String {
        format!("/products/{product_id}/review/{review_id}")
    }

    pub fn approve_review(review_id: i32) -> String {
        format!("/admin/v1/reviews/{review_id}/approve")
    }
}

/// Caller identity sent in the gateway headers.
#[derive(Clone, Copy)]
pub enum Caller<'a> {
    Anonymous,
    Member(&'a str),
    Admin,
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _upload_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub location: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // A single connection keeps every query on the same in-memory database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        shop::database::sync_schema(&db)
            .await
            .expect("Failed to create schema");
        shop::seed::seed_categorizations(&db)
            .await
            .expect("Failed to seed categorizations");

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let storage = ::common::StorageConfig {
            upload_dir: upload_dir.path().join("images"),
            max_image_size: 1024 * 1024,
        };
        let blob_store = FilesystemBlobStore::from_config(&storage)
            .await
            .expect("Failed to create image store");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            storage,
            search: SearchConfig::default(),
            point: PointConfig::default(),
            ggpass: GgPassConfig::default(),
        };

        let state = AppState {
            db: db.clone(),
            config,
            blob_store: Arc::new(blob_store),
            product_index: Arc::new(ProductIndex::new()),
        };

        let app = shop::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _upload_dir: upload_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn with_caller(
        &self,
        builder: reqwest::RequestBuilder,
        caller: Caller<'_>,
    ) -> reqwest::RequestBuilder {
        match caller {
            Caller::Anonymous => builder,
            Caller::Member(uuid) => builder
                .header("AUTH-ID", uuid)
                .header("WWW-Authentication", USER_ROLES),
            Caller::Admin => builder
                .header("AUTH-ID", ADMIN_UUID)
                .header("WWW-Authentication", ADMIN_ROLES),
        }
    }

    pub async fn get(&self, path: &str, caller: Caller<'_>) -> TestResponse {
        let res = self
            .with_caller(self.client.get(self.url(path)), caller)
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value, caller: Caller<'_>) -> TestResponse {
        let res = self
            .with_caller(self.client.post(self.url(path)), caller)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str, caller: Caller<'_>) -> TestResponse {
        let res = self
            .with_caller(self.client.post(self.url(path)), caller)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value, caller: Caller<'_>) -> TestResponse {
        let res = self
            .with_caller(self.client.put(self.url(path)), caller)
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");
        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str, caller: Caller<'_>) -> TestResponse {
        let res = self
            .with_caller(self.client.delete(self.url(path)), caller)
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    /// Send a multipart form made of one JSON part plus image parts.
    pub async fn send_multipart(
        &self,
        method: reqwest::Method,
        path: &str,
        json_part: (&str, &Value),
        images: Vec<(&str, &str, Vec<u8>)>,
        caller: Caller<'_>,
    ) -> TestResponse {
        let (name, value) = json_part;
        let mut form = Form::new().part(
            name.to_string(),
            Part::text(value.to_string())
                .mime_str("application/json")
                .expect("Failed to set MIME type"),
        );
        for (field, file_name, bytes) in images {
            form = form.part(
                field.to_string(),
                Part::bytes(bytes).file_name(file_name.to_string()),
            );
        }

        let res = self
            .with_caller(self.client.request(method, self.url(path)), caller)
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");
        TestResponse::from_response(res).await
    }

    /// Sign up a member and return its id.
    pub async fn signup(&self, uuid: &str, referrer_uuid: Option<&str>) -> i32 {
        let res = self
            .post(
                routes::SIGNUP,
                &json!({ "uuid": uuid, "referrer_uuid": referrer_uuid }),
                Caller::Anonymous,
            )
            .await;
        assert_eq!(res.status, 201, "signup failed: {}", res.text);
        res.body["signup_member_id"]
            .as_i64()
            .expect("signup response should contain signup_member_id") as i32
    }

    /// Create a category under the seeded product categorization.
    pub async fn create_category(&self, code: &str, name: &str) {
        let res = self
            .post(
                routes::ADMIN_CATEGORIES,
                &json!({
                    "category_code": code,
                    "categorization_code": PRODUCT_CATEGORIZATION,
                    "name": name,
                    "sequence": 1,
                }),
                Caller::Admin,
            )
            .await;
        assert_eq!(res.status, 201, "create_category failed: {}", res.text);
    }

    /// Register a product with one image and return its id.
    pub async fn create_product(&self, category_code: &str, name: &str) -> i32 {
        let res = self
            .send_multipart(
                reqwest::Method::POST,
                routes::ADMIN_PRODUCTS,
                ("product", &product_body(category_code, name)),
                vec![("image", "main.png", PNG_BYTES.to_vec())],
                Caller::Admin,
            )
            .await;
        assert_eq!(res.status, 201, "create_product failed: {}", res.text);
        res.id()
    }

    /// Write a review without images and return its id.
    pub async fn create_review(&self, product_id: i32, member_uuid: &str, rating: i32) -> i32 {
        let res = self
            .send_multipart(
                reqwest::Method::POST,
                &routes::review_for_member(product_id, member_uuid),
                ("review", &json!({ "content": "Fresh and sweet", "rating": rating })),
                vec![],
                Caller::Anonymous,
            )
            .await;
        assert_eq!(res.status, 201, "create_review failed: {}", res.text);
        res.body["data"]["id"]
            .as_i64()
            .expect("review response should contain data.id") as i32
    }

    /// Post an inquiry as `member_uuid` and return its inquiry id.
    pub async fn create_inquiry(&self, product_id: i32, member_uuid: &str, title: &str) -> i32 {
        let res = self
            .post(
                &routes::inquiries(product_id),
                &json!({ "title": title, "content": "When does it ship?" }),
                Caller::Member(member_uuid),
            )
            .await;
        assert_eq!(res.status, 201, "create_inquiry failed: {}", res.text);
        res.body["inquiry_id"]
            .as_i64()
            .expect("inquiry response should contain inquiry_id") as i32
    }
}

/// A valid product payload.
pub fn product_body(category_code: &str, name: &str) -> Value {
    json!({
        "category_code": category_code,
        "name": name,
        "content": "Seasonal fruit",
        "total_stock": 100,
        "price": 12900,
        "description": "Picked this week",
        "unit": "1 box",
        "delivery_type": "dawn",
        "origin": "Jeju",
        "package_type": "chilled",
        "expiration_date": null,
        "allergy_info": null,
        "capacity": "1kg",
    })
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            location,
            text,
            body,
        }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }

    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}
