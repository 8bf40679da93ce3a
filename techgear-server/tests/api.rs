//! End-to-end tests against the full router over an in-memory database

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use techgear_server::db::migrations;
use techgear_server::{build_router, create_memory_pool};

async fn app() -> Router {
    let pool = create_memory_pool().await.unwrap();
    migrations::run(&pool).await.unwrap();
    build_router(pool)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn seed_product(app: &Router, name: &str, price: f64) -> i64 {
    let (status, body) = post_json(
        app,
        "/products",
        json!({"name": name, "description": "test", "price": price, "stock": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["lastInsertRowid"].as_i64().unwrap()
}

async fn seed_customer(app: &Router) -> i64 {
    let (status, body) = post_json(
        app,
        "/customers",
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Loop Rd",
            "password": "hunter2"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["lastInsertRowid"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_database_ok() {
    let app = app().await;

    let (status, bytes) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes)["database"], "ok");
}

#[tokio::test]
async fn created_product_is_readable_by_id() {
    let app = app().await;
    let (status, _) = post_json(&app, "/manufacturers", json!({"name": "Google"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, created) = post_json(
        &app,
        "/products",
        json!({
            "manufacturer_id": 1,
            "name": "Pixel 9",
            "description": "AMOLED",
            "price": 699,
            "stock": 5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["changes"], 1);
    let id = created["lastInsertRowid"].as_i64().unwrap();

    let (status, bytes) = get(&app, &format!("/products/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let product = json_body(&bytes);
    assert_eq!(product["name"], "Pixel 9");
    assert_eq!(product["stock_quantity"], 5);
    assert_eq!(product["manufacturer"], "Google");
    assert_eq!(product["categories"], json!([]));
}

#[tokio::test]
async fn search_without_name_is_plain_text_404() {
    let app = app().await;

    let (status, bytes) = get(&app, "/products/search").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(bytes, b"Please enter a valid search query.");

    let (status, bytes) = get(&app, "/products/search?name=").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(bytes, b"Please enter a valid search query.");
}

#[tokio::test]
async fn search_matches_exact_name() {
    let app = app().await;
    seed_product(&app, "Galaxy Buds", 149.0).await;

    let (status, bytes) = get(&app, "/products/search?name=Galaxy%20Buds").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes)["price"], 149.0);

    let (status, _) = get(&app, "/products/search?name=Galaxy").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_product_is_404() {
    let app = app().await;

    let (status, bytes) = get(&app, "/products/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&bytes)["error"], "not_found");
}

#[tokio::test]
async fn delete_removes_product_from_listing() {
    let app = app().await;
    let keep = seed_product(&app, "Keep", 10.0).await;
    let drop = seed_product(&app, "Drop", 20.0).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/products?id={}", drop))
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes)["changes"], 1);

    let (_, bytes) = get(&app, "/products").await;
    let ids: Vec<i64> = json_body(&bytes)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn delete_without_id_is_plain_text_404() {
    let app = app().await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/products")
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(bytes, b"Invalid id or no id found.");
}

#[tokio::test]
async fn update_product_replaces_fields() {
    let app = app().await;
    let id = seed_product(&app, "Old", 10.0).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!(
            "/products/{}?name=New&description=Fresh&price=12.5&stock=9",
            id
        ))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, bytes) = get(&app, &format!("/products/{}", id)).await;
    let product = json_body(&bytes);
    assert_eq!(product["name"], "New");
    assert_eq!(product["price"], 12.5);
    assert_eq!(product["stock_quantity"], 9);
}

#[tokio::test]
async fn category_listing_and_stats() {
    let app = app().await;
    let (_, category) = post_json(&app, "/categories", json!({"name": "Phones"})).await;
    let category_id = category["lastInsertRowid"].as_i64().unwrap();
    let a = seed_product(&app, "A", 100.0).await;
    let b = seed_product(&app, "B", 300.0).await;

    for product in [a, b] {
        let (status, _) = post_json(
            &app,
            &format!("/products/{}/categories", product),
            json!({"category_id": category_id}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, bytes) = get(&app, &format!("/products/category/{}", category_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes).as_array().unwrap().len(), 2);

    let (status, bytes) = get(&app, &format!("/products/stats/{}", category_id)).await;
    assert_eq!(status, StatusCode::OK);
    let stats = json_body(&bytes);
    assert_eq!(stats["total_products"], 2);
    assert_eq!(stats["average_price"], 200.0);
    assert_eq!(stats["category"], "Phones");
}

#[tokio::test]
async fn out_of_range_rating_is_rejected() {
    let app = app().await;
    let product = seed_product(&app, "Pixel 9", 699.0).await;
    let customer = seed_customer(&app).await;

    let (status, body) = post_json(
        &app,
        "/reviews",
        json!({"product_id": product, "customer_id": customer, "rating": 7, "comment": "wow"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "constraint_violation");

    let (_, bytes) = get(&app, "/reviews").await;
    assert_eq!(json_body(&bytes), json!([]));
}

#[tokio::test]
async fn review_stats_average_ratings() {
    let app = app().await;
    let product = seed_product(&app, "Pixel 9", 699.0).await;
    let customer = seed_customer(&app).await;

    for rating in [4, 5] {
        let (status, _) = post_json(
            &app,
            "/reviews",
            json!({"product_id": product, "customer_id": customer, "rating": rating, "comment": null}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, bytes) = get(&app, &format!("/reviews/stats/{}", product)).await;
    assert_eq!(status, StatusCode::OK);
    let stats = json_body(&bytes);
    assert_eq!(stats["total_reviews"], 2);
    assert_eq!(stats["average_rating"], 4.5);
}

#[tokio::test]
async fn customer_contact_update() {
    let app = app().await;
    let id = seed_customer(&app).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!(
            "/customers/{}?email=ada@new.example&phone=555-0199&address=2%20Loop%20Rd",
            id
        ))
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_body(&bytes)["changes"], 1);

    let (status, bytes) = get(&app, &format!("/customers/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let customer = json_body(&bytes);
    assert_eq!(customer["email"], "ada@new.example");
    assert_eq!(customer["address"], "2 Loop Rd");
    assert!(customer.get("password").is_none());
    assert!(customer.get("password_hash").is_none());
}

#[tokio::test]
async fn update_unknown_customer_is_404() {
    let app = app().await;

    let request = Request::builder()
        .method("PUT")
        .uri("/customers/42?email=x@example.com")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_lines_capture_price_at_purchase() {
    let app = app().await;
    let product = seed_product(&app, "Pixel 9", 699.0).await;
    let customer = seed_customer(&app).await;

    let (status, order) = post_json(&app, "/orders", json!({"customer_id": customer})).await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = order["lastInsertRowid"].as_i64().unwrap();

    let (status, _) = post_json(
        &app,
        &format!("/orders/{}/products", order_id),
        json!({"product_id": product, "quantity": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(
        &app,
        &format!("/orders/{}/products", order_id),
        json!({"product_id": 999, "quantity": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, bytes) = get(&app, &format!("/customers/{}/orders", customer)).await;
    assert_eq!(status, StatusCode::OK);
    let lines = json_body(&bytes);
    assert_eq!(lines.as_array().unwrap().len(), 1);
    assert_eq!(lines[0]["product"], "Pixel 9");
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["unit_price"], 699.0);

    let (_, bytes) = get(&app, &format!("/customers/{}", customer)).await;
    assert_eq!(json_body(&bytes)["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ordered_product_cannot_be_deleted() {
    let app = app().await;
    let product = seed_product(&app, "Pixel 9", 699.0).await;
    let customer = seed_customer(&app).await;
    let (_, order) = post_json(&app, "/orders", json!({"customer_id": customer})).await;
    let order_id = order["lastInsertRowid"].as_i64().unwrap();
    post_json(
        &app,
        &format!("/orders/{}/products", order_id),
        json!({"product_id": product, "quantity": 1}),
    )
    .await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/products?id={}", product))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_customer_email_conflicts() {
    let app = app().await;
    seed_customer(&app).await;

    let (status, body) = post_json(
        &app,
        "/customers",
        json!({"name": "Other", "email": "ada@example.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "constraint_violation");
}

#[tokio::test]
async fn duplicate_category_link_conflicts() {
    let app = app().await;
    let (_, category) = post_json(&app, "/categories", json!({"name": "Phones"})).await;
    let category_id = category["lastInsertRowid"].as_i64().unwrap();
    let product = seed_product(&app, "Pixel 9", 100.0).await;
    let uri = format!("/products/{}/categories", product);

    let (status, _) = post_json(&app, &uri, json!({"category_id": category_id})).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = post_json(&app, &uri, json!({"category_id": category_id})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "constraint_violation");

    let (_, bytes) = get(&app, &format!("/products/stats/{}", category_id)).await;
    assert_eq!(json_body(&bytes)["total_products"], 1);

    let (_, bytes) = get(&app, &format!("/products/category/{}", category_id)).await;
    assert_eq!(json_body(&bytes).as_array().unwrap().len(), 1);

    let (_, bytes) = get(&app, &format!("/products/{}", product)).await;
    assert_eq!(json_body(&bytes)["categories"], json!(["Phones"]));
}

#[tokio::test]
async fn negative_stock_update_is_400() {
    let app = app().await;
    let id = seed_product(&app, "Pixel 9", 699.0).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/products/{}?name=Pixel%209&price=699&stock=-4", id))
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&bytes)["error"], "constraint_violation");

    let (_, bytes) = get(&app, &format!("/products/{}", id)).await;
    assert_eq!(json_body(&bytes)["stock_quantity"], 3);
}

#[tokio::test]
async fn negative_stock_create_is_400() {
    let app = app().await;

    let (status, body) = post_json(
        &app,
        "/products",
        json!({"name": "Pixel 9", "price": 699, "stock": -1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "constraint_violation");
}

#[tokio::test]
async fn unknown_customer_is_404() {
    let app = app().await;

    let (status, bytes) = get(&app, "/customers/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&bytes)["error"], "not_found");
}

#[tokio::test]
async fn update_unknown_product_is_404() {
    let app = app().await;

    let request = Request::builder()
        .method("PUT")
        .uri("/products/999?name=Ghost&price=1&stock=1")
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&bytes)["error"], "not_found");
}
