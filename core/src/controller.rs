//! Catalog view state and the transitions that drive it.
//!
//! # Design
//! `CatalogController` is sans-IO like `ProductClient`: every trigger returns
//! a `PendingRequest` (a `Ticket` plus the `HttpRequest` to execute) and the
//! host hands the outcome back through `complete`. Nothing here blocks or
//! spawns, so overlapping fetches are modelled by holding several tickets and
//! completing them in any order.
//!
//! Every fetch, whether a reload or a load-more, takes the next sequence
//! number. Only the result whose sequence equals the latest issued one is
//! applied; anything older is dropped without touching state. Mutations
//! (create, toggle, delete) are applied whenever they complete.

use tracing::{debug, warn};

use crate::client::ProductClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{NewProduct, Product, ProductQuery};

/// Where the catalog is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// User-controlled filter values plus the pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub in_stock_only: bool,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            in_stock_only: false,
            page: 1,
        }
    }
}

impl FilterState {
    /// An empty search and an unchecked in-stock box both mean "no filter",
    /// so neither is sent.
    pub fn to_query(&self, page: u32) -> ProductQuery {
        ProductQuery {
            query: (!self.search_query.is_empty()).then(|| self.search_query.clone()),
            in_stock: self.in_stock_only.then_some(true),
            page: Some(page),
        }
    }
}

/// Everything the view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub has_more: bool,
    pub status: LoadStatus,
    pub error: Option<String>,
    pub filter: FilterState,
}

/// Identifies an in-flight request and what to do with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticket {
    Reload { seq: u64 },
    LoadMore { seq: u64, page: u32 },
    Create,
    ToggleSaved { product_id: u64 },
    Delete { product_id: u64 },
}

/// A request the host must execute, tagged with its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// What `complete` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    /// A newer fetch was issued after this one; the response was ignored.
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogController {
    client: ProductClient,
    state: CatalogState,
    latest_fetch: u64,
}

impl CatalogController {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            state: CatalogState::default(),
            latest_fetch: 0,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }

    pub fn is_loading(&self) -> bool {
        self.state.status == LoadStatus::Loading
    }

    pub fn can_load_more(&self) -> bool {
        self.state.has_more && !self.is_loading()
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    pub fn mount(&mut self) -> Option<PendingRequest> {
        self.reload()
    }

    /// Returns `None` when the query is unchanged.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> Option<PendingRequest> {
        let query = query.into();
        if query == self.state.filter.search_query {
            return None;
        }
        self.state.filter.search_query = query;
        self.reload()
    }

    /// Returns `None` when the flag is unchanged.
    pub fn set_in_stock_only(&mut self, in_stock_only: bool) -> Option<PendingRequest> {
        if in_stock_only == self.state.filter.in_stock_only {
            return None;
        }
        self.state.filter.in_stock_only = in_stock_only;
        self.reload()
    }

    /// Set the search text and stock filter together with a single fetch.
    /// Returns `None` when neither changed.
    pub fn set_filters(
        &mut self,
        query: impl Into<String>,
        in_stock_only: bool,
    ) -> Option<PendingRequest> {
        let query = query.into();
        let filter = &self.state.filter;
        if query == filter.search_query && in_stock_only == filter.in_stock_only {
            return None;
        }
        self.state.filter.search_query = query;
        self.state.filter.in_stock_only = in_stock_only;
        self.reload()
    }

    /// Returns `None` unless more pages exist and nothing is loading.
    pub fn load_more(&mut self) -> Option<PendingRequest> {
        if !self.can_load_more() {
            return None;
        }
        let page = self.state.filter.page + 1;
        let seq = self.next_fetch();
        let built = self.client.build_fetch_products(&self.state.filter.to_query(page));
        self.issue_fetch(Ticket::LoadMore { seq, page }, built)
    }

    pub fn add_product(&mut self, name: &str, price: f64, in_stock: bool) -> Option<PendingRequest> {
        match self.client.build_create_product(&NewProduct::new(name, price, in_stock)) {
            Ok(request) => Some(PendingRequest {
                ticket: Ticket::Create,
                request,
            }),
            Err(err) => {
                self.record_error(&err);
                None
            }
        }
    }

    pub fn toggle_saved(&mut self, product_id: u64) -> PendingRequest {
        PendingRequest {
            ticket: Ticket::ToggleSaved { product_id },
            request: self.client.build_toggle_saved(product_id),
        }
    }

    pub fn delete_product(&mut self, product_id: u64) -> PendingRequest {
        PendingRequest {
            ticket: Ticket::Delete { product_id },
            request: self.client.build_delete_product(product_id),
        }
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Apply the outcome of a request previously returned by a trigger.
    ///
    /// `outcome` is `Err` only for transport failures; HTTP error statuses
    /// arrive as `Ok(response)` and are interpreted by the client.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Completion {
        match ticket {
            Ticket::Reload { seq } => {
                if self.is_stale(seq) {
                    return Completion::Stale;
                }
                match outcome.and_then(|r| self.client.parse_fetch_products(r)) {
                    Ok(page) => {
                        debug!(seq, count = page.products.len(), "applying reload");
                        self.state.products = page.products;
                        self.state.has_more = page.pagination.has_more;
                        self.state.status = LoadStatus::Loaded;
                        Completion::Applied
                    }
                    Err(err) => self.fail_fetch(&err),
                }
            }
            Ticket::LoadMore { seq, page } => {
                if self.is_stale(seq) {
                    return Completion::Stale;
                }
                match outcome.and_then(|r| self.client.parse_fetch_products(r)) {
                    Ok(next) => {
                        debug!(seq, page, count = next.products.len(), "appending page");
                        self.state.products.extend(next.products);
                        self.state.has_more = next.pagination.has_more;
                        self.state.filter.page = page;
                        self.state.status = LoadStatus::Loaded;
                        Completion::Applied
                    }
                    Err(err) => self.fail_fetch(&err),
                }
            }
            Ticket::Create => match outcome.and_then(|r| self.client.parse_create_product(r)) {
                Ok(product) => {
                    debug!(id = product.id, "product created");
                    self.state.products.push(product);
                    Completion::Applied
                }
                Err(err) => self.record_error(&err),
            },
            Ticket::ToggleSaved { product_id } => {
                match outcome.and_then(|r| self.client.parse_toggle_saved(r)) {
                    Ok(updated) => {
                        if let Some(slot) = self.state.products.iter_mut().find(|p| p.id == product_id) {
                            *slot = updated;
                        }
                        Completion::Applied
                    }
                    Err(err) => self.record_error(&err),
                }
            }
            Ticket::Delete { product_id } => {
                match outcome.and_then(|r| self.client.parse_delete_product(r)) {
                    Ok(()) => {
                        self.state.products.retain(|p| p.id != product_id);
                        Completion::Applied
                    }
                    Err(err) => self.record_error(&err),
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Pages accumulated under the previous filter are dropped here, so a
    /// failed reload can never leave them behind for load-more to extend.
    fn reload(&mut self) -> Option<PendingRequest> {
        self.state.filter.page = 1;
        self.state.products.clear();
        self.state.has_more = false;
        self.state.error = None;
        let seq = self.next_fetch();
        let built = self.client.build_fetch_products(&self.state.filter.to_query(1));
        self.issue_fetch(Ticket::Reload { seq }, built)
    }

    fn next_fetch(&mut self) -> u64 {
        self.latest_fetch += 1;
        self.latest_fetch
    }

    fn issue_fetch(
        &mut self,
        ticket: Ticket,
        built: Result<HttpRequest, ApiError>,
    ) -> Option<PendingRequest> {
        match built {
            Ok(request) => {
                debug!(?ticket, url = %request.url, "issuing fetch");
                self.state.status = LoadStatus::Loading;
                Some(PendingRequest { ticket, request })
            }
            Err(err) => {
                self.fail_fetch(&err);
                None
            }
        }
    }

    fn is_stale(&self, seq: u64) -> bool {
        let stale = seq != self.latest_fetch;
        if stale {
            debug!(seq, latest = self.latest_fetch, "discarding stale fetch result");
        }
        stale
    }

    fn fail_fetch(&mut self, err: &ApiError) -> Completion {
        self.state.status = LoadStatus::Errored;
        self.record_error(err)
    }

    fn record_error(&mut self, err: &ApiError) -> Completion {
        warn!(error = %err, "catalog action failed");
        self.state.error = Some(err.to_string());
        Completion::Failed
    }
}
