use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
    pub saved: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub in_stock: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub query: Option<String>,
    pub in_stock: Option<bool>,
    pub page: Option<usize>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub has_more: bool,
    pub page: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// `{ "error": .. }` response with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Product not found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

struct Store {
    products: Vec<Product>,
    next_id: u64,
}

#[derive(Clone)]
pub struct AppState {
    db: Arc<RwLock<Store>>,
    page_size: usize,
}

pub fn app() -> Router {
    app_with(DEFAULT_PAGE_SIZE, Vec::new())
}

/// Router over `products`, paged `page_size` at a time. New ids continue
/// after the largest seeded id.
pub fn app_with(page_size: usize, products: Vec<Product>) -> Router {
    let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let state = AppState {
        db: Arc::new(RwLock::new(Store { products, next_id })),
        page_size: page_size.max(1),
    };
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/{id}", delete(delete_product))
        .route("/api/products/{id}/saved", patch(toggle_saved))
        .with_state(state)
}

/// A small furniture catalog for local demos.
pub fn sample_products() -> Vec<Product> {
    [
        ("Oak Chair", 89.0, true),
        ("Pine Chair", 59.5, false),
        ("Standing Desk", 449.0, true),
        ("Desk Lamp", 34.99, true),
        ("Bookshelf", 129.0, false),
        ("Armchair", 310.0, true),
        ("Side Table", 75.25, true),
        ("Office Chair", 199.0, false),
        ("Coat Rack", 45.0, true),
        ("Floor Lamp", 88.0, false),
        ("Bar Stool", 64.0, true),
        ("Writing Desk", 260.0, true),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, price, in_stock))| Product {
        id: i as u64 + 1,
        name: name.to_string(),
        price,
        in_stock,
        saved: false,
    })
    .collect()
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ProductPage> {
    let store = state.db.read().await;
    let needle = params.query.as_deref().map(str::to_lowercase);
    let matching: Vec<&Product> = store
        .products
        .iter()
        .filter(|p| needle.as_deref().map_or(true, |n| p.name.to_lowercase().contains(n)))
        .filter(|p| params.in_stock.map_or(true, |wanted| p.in_stock == wanted))
        .collect();

    let page = params.page.unwrap_or(1).max(1);
    let start = (page - 1).saturating_mul(state.page_size);
    let products: Vec<Product> = matching
        .iter()
        .skip(start)
        .take(state.page_size)
        .map(|p| (*p).clone())
        .collect();
    let has_more = start.saturating_add(state.page_size) < matching.len();

    Json(ProductPage {
        products,
        pagination: Pagination { has_more, page },
    })
}

async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name required"));
    }
    if !(input.price > 0.0) {
        return Err(ApiError::bad_request("Price must be positive"));
    }
    let mut store = state.db.write().await;
    let product = Product {
        id: store.next_id,
        name: name.to_string(),
        price: input.price,
        in_stock: input.in_stock,
        saved: false,
    };
    store.next_id += 1;
    store.products.push(product.clone());
    info!(id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn toggle_saved(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    let mut store = state.db.write().await;
    let product = store
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(ApiError::not_found)?;
    product.saved = !product.saved;
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    let before = store.products.len();
    store.products.retain(|p| p.id != id);
    if store.products.len() == before {
        return Err(ApiError::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
