//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `ProductClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, NewProduct, PaginatedResponse, Product, ProductQuery};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

const CREATE_FALLBACK: &str = "Failed to create product";
const TOGGLE_FALLBACK: &str = "Failed to toggle saved";
const DELETE_FALLBACK: &str = "Failed to delete product";

/// Synchronous, stateless client for the product catalog API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl Default for ProductClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /products` with only the defined parameters in the query string.
    pub fn build_fetch_products(&self, query: &ProductQuery) -> ApiResult<HttpRequest> {
        let encoded =
            serde_urlencoded::to_string(query).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let url = if encoded.is_empty() {
            format!("{}/products", self.base_url)
        } else {
            format!("{}/products?{encoded}", self.base_url)
        };
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create_product(&self, input: &NewProduct) -> ApiResult<HttpRequest> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("Name required".to_string()));
        }
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/products", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_toggle_saved(&self, product_id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            url: format!("{}/products/{product_id}/saved", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_delete_product(&self, product_id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/products/{product_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_fetch_products(&self, response: HttpResponse) -> ApiResult<PaginatedResponse> {
        if !response.is_success() {
            return Err(ApiError::Network {
                status: Some(response.status),
                message: format!("Failed to fetch products: {}", response.status),
            });
        }
        decode(&response)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> ApiResult<Product> {
        check_status(&response, CREATE_FALLBACK)?;
        decode(&response)
    }

    pub fn parse_toggle_saved(&self, response: HttpResponse) -> ApiResult<Product> {
        check_status(&response, TOGGLE_FALLBACK)?;
        decode(&response)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> ApiResult<()> {
        check_status(&response, DELETE_FALLBACK)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a non-2xx response to an `ApiError`, preferring the server's
/// `{ "error": .. }` message over `fallback`.
fn check_status(response: &HttpResponse, fallback: &str) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .map(|body| body.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    Err(match response.status {
        404 => ApiError::NotFound(message),
        400..=499 => ApiError::Validation(message),
        status => ApiError::Server { status, message },
    })
}
