use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, sample_products, Product, ProductPage};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn empty(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_products_empty() {
    let resp = app().oneshot(get("/api/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: ProductPage = body_json(resp).await;
    assert!(page.products.is_empty());
    assert!(!page.pagination.has_more);
    assert_eq!(page.pagination.page, 1);
}

#[tokio::test]
async fn list_products_pages_through_results() {
    let app = app_with(5, sample_products());

    let resp = app.clone().oneshot(get("/api/products?page=1")).await.unwrap();
    let first: ProductPage = body_json(resp).await;
    assert_eq!(first.products.len(), 5);
    assert!(first.pagination.has_more);

    let resp = app.oneshot(get("/api/products?page=3")).await.unwrap();
    let last: ProductPage = body_json(resp).await;
    assert_eq!(last.products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11, 12]);
    assert!(!last.pagination.has_more);
    assert_eq!(last.pagination.page, 3);
}

#[tokio::test]
async fn list_products_filters_by_query_and_stock() {
    let resp = app_with(10, sample_products())
        .oneshot(get("/api/products?query=CHAIR&inStock=true"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: ProductPage = body_json(resp).await;
    let names: Vec<&str> = page.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Oak Chair", "Armchair"]);
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/products",
            r#"{"name":"Desk","price":199.99,"inStock":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Product = body_json(resp).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Desk");
    assert!(product.in_stock);
    assert!(!product.saved);
}

#[tokio::test]
async fn create_product_blank_name_returns_error_body() {
    let resp = app()
        .oneshot(json_request("POST", "/api/products", r#"{"name":"  ","price":5}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "error": "Name required" }));
}

#[tokio::test]
async fn create_product_non_positive_price_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/api/products", r#"{"name":"Free","price":0}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "Price must be positive");
}

#[tokio::test]
async fn create_product_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/products", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- toggle saved ---

#[tokio::test]
async fn toggle_saved_not_found() {
    let resp = app()
        .oneshot(empty("PATCH", "/api/products/99/saved"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn toggle_saved_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty("PATCH", "/api/products/not-a-number/saved"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_product_not_found() {
    let resp = app()
        .oneshot(empty("DELETE", "/api/products/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn product_lifecycle() {
    use tower::Service;

    let mut app = app_with(2, Vec::new()).into_service();

    // create three products
    let mut ids = Vec::new();
    for (name, stock) in [("Oak Chair", true), ("Pine Chair", false), ("Lamp", true)] {
        let body = serde_json::json!({ "name": name, "price": 10.0, "inStock": stock }).to_string();
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/api/products", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Product = body_json(resp).await;
        ids.push(created.id);
    }
    assert_eq!(ids, vec![1, 2, 3]);

    // toggle saved twice flips back
    for expected in [true, false] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(empty("PATCH", "/api/products/2/saved"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let toggled: Product = body_json(resp).await;
        assert_eq!(toggled.saved, expected);
    }

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty("DELETE", "/api/products/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list — two left, fits one page of two
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/products"))
        .await
        .unwrap();
    let page: ProductPage = body_json(resp).await;
    assert_eq!(page.products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
    assert!(!page.pagination.has_more);

    // ids are never reused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/products", r#"{"name":"Rug","price":1.5}"#))
        .await
        .unwrap();
    let created: Product = body_json(resp).await;
    assert_eq!(created.id, 4);
}
