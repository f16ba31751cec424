//! Sans-IO client core for the product catalog service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the catalog view
//! state in a controller that consumes those responses.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - Each REST operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `CatalogController` turns user triggers into `PendingRequest`s and
//!   applies completed responses, discarding fetch results that a newer
//!   fetch has superseded.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{ProductClient, DEFAULT_BASE_URL};
pub use controller::{
    CatalogController, CatalogState, Completion, FilterState, LoadStatus, PendingRequest, Ticket,
};
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{ErrorBody, NewProduct, PaginatedResponse, Pagination, Product, ProductQuery};
