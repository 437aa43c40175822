//! Handler tests for the Products domain
//!
//! Drive the product router end to end with the in-memory repository and
//! real bearer tokens:
//! - status codes and bodies for every endpoint
//! - field error maps
//! - pagination envelope and links
//! - authentication failures

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const SECRET: &str = "handler-test-secret-with-32-plus-chars";

struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    fn new() -> Self {
        Self::with_repository(InMemoryProductRepository::new())
    }

    fn with_repository(repository: InMemoryProductRepository) -> Self {
        let auth = JwtAuth::new(&JwtConfig::new(SECRET).unwrap());
        let token = auth.issue_access_token("tester").unwrap();
        let router = handlers::router(ProductService::new(repository), auth);
        Self { router, token }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "testserver")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create(&self, name: &str, price: Value) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/products/",
                Some(json!({
                    "name": name,
                    "description": "Test product description",
                    "price": price
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

fn not_found() -> Value {
    json!({"detail": "Not found."})
}

#[tokio::test]
async fn test_create_returns_201_and_round_trips() {
    let app = TestApp::new();

    let created = app.create("Test product", json!(650)).await;
    assert_eq!(created["name"], "Test product");
    assert_eq!(created["description"], "Test product description");
    assert_eq!(created["price"], "650.00");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let uri = format!("/products/{}", created["id"]);
    let (status, first) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["name"], "Test product");

    let (_, second) = app.send("GET", &uri, None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_create_missing_price() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/products/",
            Some(json!({"name": "Test product", "description": "Test product description"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"price": ["This field is required."]}));
}

#[tokio::test]
async fn test_create_price_with_too_many_digits() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/products/",
            Some(json!({"name": "Lamp", "price": "99999999999999999999999999999999"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"price": ["Ensure that there are no more than 10 digits in total."]})
    );
}

#[tokio::test]
async fn test_create_short_name() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/products/",
            Some(json!({"name": "ab", "description": "Test product description", "price": 650})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"name": ["Field 'name' must have at least 3 characters"]})
    );
}

#[tokio::test]
async fn test_create_collects_every_rule_failure() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/products/",
            Some(json!({"name": "ab", "description": "short", "price": 500})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": ["Field 'name' must have at least 3 characters"],
            "description": ["Field 'description' must have at least 10 characters"],
            "price": ["Field 'price' must be higher than 500"]
        })
    );

    let (_, list) = app.send("GET", "/products/", None).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_create_rejects_non_object_body() {
    let app = TestApp::new();

    let (status, body) = app.send("POST", "/products/", Some(json!([1, 2]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]})
    );
}

#[tokio::test]
async fn test_patch_short_name_leaves_record_unchanged() {
    let app = TestApp::new();
    let created = app.create("Test product", json!(650)).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, body) = app.send("PATCH", &uri, Some(json!({"name": "ab"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"name": ["Field 'name' must have at least 3 characters"]})
    );

    let (_, current) = app.send("GET", &uri, None).await;
    assert_eq!(current, created);
}

#[tokio::test]
async fn test_patch_updates_only_supplied_fields() {
    let app = TestApp::new();
    let created = app.create("Test product", json!(650)).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, updated) = app.send("PATCH", &uri, Some(json!({"price": "799.99"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], "799.99");
    assert_eq!(updated["name"], "Test product");
    assert_eq!(updated["description"], "Test product description");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_put_requires_name_and_price() {
    let app = TestApp::new();
    let created = app.create("Test product", json!(650)).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, body) = app
        .send("PUT", &uri, Some(json!({"description": "A new description"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"name": ["This field is required."], "price": ["This field is required."]})
    );

    let (status, body) = app
        .send("PUT", &uri, Some(json!({"name": "Renamed product", "price": 900})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed product");
    assert_eq!(body["price"], "900.00");
    assert_eq!(body["description"], "Test product description");
}

#[tokio::test]
async fn test_missing_id_is_404_for_every_item_method() {
    let app = TestApp::new();
    let payload = json!({"name": "Test product", "price": 650});

    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(payload.clone())),
        ("PUT", Some(payload.clone())),
        ("DELETE", None),
    ] {
        let (status, response) = app.send(method, "/products/1", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(response, not_found(), "{method}");
    }
}

#[tokio::test]
async fn test_non_integer_id_is_404() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/products/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again() {
    let app = TestApp::new();
    let created = app.create("Test product", json!(650)).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, body) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_two_products() {
    let app = TestApp::new();
    app.create("Test product 1", json!(650)).await;
    app.create("Test product 2", json!(750)).await;

    let (status, body) = app.send("GET", "/products/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], Value::Null);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["name"], "Test product 1");
}

#[tokio::test]
async fn test_list_filters_by_price_range_and_name() {
    let app = TestApp::new();
    app.create("Chair", json!(550)).await;
    app.create("Table", json!(700)).await;
    app.create("Lamp", json!(900)).await;
    app.create("Lamp", json!(1200)).await;

    let (_, body) = app
        .send("GET", "/products/?min_price=700&max_price=900", None)
        .await;
    let names: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Table", "Lamp"]);

    let (_, body) = app.send("GET", "/products/?name=Lamp", None).await;
    assert_eq!(body["count"], 2);

    let (_, body) = app
        .send("GET", "/products/?name=Lamp&max_price=1000", None)
        .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["price"], "900.00");

    let (_, body) = app.send("GET", "/products/?name=lamp", None).await;
    assert_eq!(body["count"], 0);

    let (_, body) = app.send("GET", "/products/?name=", None).await;
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn test_list_bad_price_bound() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/products/?min_price=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"min_price": ["A valid number is required."]}));
}

#[tokio::test]
async fn test_pagination_pages_and_links() {
    let app = TestApp::new();
    for i in 0..7 {
        app.create(&format!("Product {i}"), json!(600 + i)).await;
    }

    let (_, first) = app.send("GET", "/products/", None).await;
    assert_eq!(first["count"], 7);
    assert_eq!(first["results"].as_array().unwrap().len(), 5);
    assert_eq!(first["next"], "http://testserver/products/?page=2");
    assert_eq!(first["previous"], Value::Null);

    let (_, second) = app.send("GET", "/products/?page=2", None).await;
    assert_eq!(second["results"].as_array().unwrap().len(), 2);
    assert_eq!(second["next"], Value::Null);
    assert_eq!(second["previous"], "http://testserver/products/");

    let (_, last) = app.send("GET", "/products/?page=last", None).await;
    assert_eq!(last["results"], second["results"]);

    let (_, sized) = app.send("GET", "/products/?page_size=3&page=2", None).await;
    assert_eq!(sized["results"].as_array().unwrap().len(), 3);
    assert_eq!(
        sized["next"],
        "http://testserver/products/?page=3&page_size=3"
    );
    assert_eq!(sized["previous"], "http://testserver/products/?page_size=3");
}

#[tokio::test]
async fn test_page_size_is_capped() {
    let app = TestApp::new();
    for i in 0..17 {
        app.create(&format!("Product {i}"), json!(600 + i)).await;
    }

    let (_, body) = app.send("GET", "/products/?page_size=100", None).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_invalid_page() {
    let app = TestApp::new();
    app.create("Test product", json!(650)).await;

    for uri in ["/products/?page=2", "/products/?page=0", "/products/?page=abc"] {
        let (status, body) = app.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"detail": "Invalid page."}), "{uri}");
    }
}

#[tokio::test]
async fn test_empty_page_parameter_means_first_page() {
    let app = TestApp::new();
    app.create("Test product", json!(650)).await;

    let (status, body) = app.send("GET", "/products/?page=", None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 1);
    assert_eq!(body["previous"], Value::Null);
}

#[tokio::test]
async fn test_repeated_query_key_uses_last_value() {
    let app = TestApp::new();
    app.create("Chair", json!(550)).await;
    app.create("Lamp", json!(900)).await;
    app.create("Lamp", json!(1200)).await;

    let (status, body) = app
        .send("GET", "/products/?name=Chair&name=Lamp", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 2);

    let (status, body) = app
        .send("GET", "/products/?min_price=abc&min_price=1000", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["price"], "1200.00");
}

#[tokio::test]
async fn test_empty_first_page_is_allowed() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/products/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"count": 0, "next": null, "previous": null, "results": []})
    );
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/products/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        "Bearer realm=\"api\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({"detail": "Authentication credentials were not provided."})
    );
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let other = JwtAuth::new(&JwtConfig::new("some-other-secret-that-is-32-chars-long").unwrap());
    let token = other.issue_access_token("intruder").unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/products/")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_shared_repository_sees_writes() {
    let repository = InMemoryProductRepository::new();
    let app = TestApp::with_repository(repository.clone());
    let created = app.create("Test product", json!("650.50")).await;

    let id = created["id"].as_i64().unwrap();
    let stored = repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.price.to_string(), "650.50");
}
