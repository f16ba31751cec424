//! Seam between the sans-IO core and whatever performs the HTTP round-trip.
//!
//! Hosts that execute requests synchronously implement `Transport` and let
//! `CatalogController::run` do build → execute → complete in one call. Hosts
//! that need overlapping requests keep using tickets directly.

use crate::controller::{CatalogController, Completion, PendingRequest};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one `HttpRequest`.
///
/// Non-2xx statuses must come back as `Ok(response)`; `Err` is reserved for
/// transport failures (connection refused, timeout, unreadable body).
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl CatalogController {
    /// Execute `pending` on `transport` and apply the result.
    pub fn run<T: Transport + ?Sized>(
        &mut self,
        pending: PendingRequest,
        transport: &mut T,
    ) -> Completion {
        let outcome = transport.execute(&pending.request);
        self.complete(pending.ticket, outcome)
    }

    /// Like `run`, for triggers that may decline to issue a request.
    pub fn run_opt<T: Transport + ?Sized>(
        &mut self,
        pending: Option<PendingRequest>,
        transport: &mut T,
    ) -> Option<Completion> {
        pending.map(|p| self.run(p, transport))
    }
}
