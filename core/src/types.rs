//! Domain DTOs for the product catalog API.
//!
//! # Design
//! These types mirror the server's JSON schema (camelCase field names) but
//! are defined independently of the mock-server crate. Integration tests
//! catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single product as returned by the API.
///
/// The server owns products; the client only ever holds a possibly stale copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
    #[serde(default)]
    pub saved: bool,
}

/// Request payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub in_stock: bool,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, in_stock: bool) -> Self {
        Self {
            name: name.into(),
            price,
            in_stock,
        }
    }
}

/// Pagination block attached to every list response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub has_more: bool,
    pub page: u32,
}

/// One page of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Parameters for listing products. Fields left as `None` are not encoded
/// into the query string at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Error body convention used by the server for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
