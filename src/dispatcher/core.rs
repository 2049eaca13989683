//! Dispatcher core module - resolves a proxy event to a handler and shapes
//! the response.

use super::event::{ProxyRequest, ProxyResponse, CORS_HEADERS};
use crate::router::{RequestRouter, RouteMatch};
use serde_json::{json, Value};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Response header storage
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Response produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// Headers set by the handler; CORS headers are added on the way out
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with no extra headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status, HeaderVec::new(), body)
    }

    /// `{"statusCode": status, "data": data}`
    #[must_use]
    pub fn data(status: u16, data: Value) -> Self {
        Self::json(status, json!({ "statusCode": status, "data": data }))
    }

    /// `{"statusCode": status, "message": message}`
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "statusCode": status, "message": message }))
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Final proxy result: CORS headers first, handler headers override them
    #[must_use]
    pub fn into_proxy_response(self) -> ProxyResponse {
        let mut headers: BTreeMap<String, String> = CORS_HEADERS
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        for (name, value) in self.headers {
            headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
            headers.insert(name.to_string(), value);
        }
        ProxyResponse {
            status_code: self.status,
            headers,
            body: self.body.to_string(),
        }
    }
}

/// A callable servicing one operation
pub type Handler =
    Arc<dyn Fn(&ProxyRequest, &RouteMatch) -> anyhow::Result<HandlerResponse> + Send + Sync>;

/// Routes proxy events to registered handlers
///
/// The router is shared read-only; handlers are keyed by the route's
/// handler name (the `operationId`).
#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<RequestRouter>,
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    /// Create a dispatcher with no handlers registered
    #[must_use]
    pub fn new(router: Arc<RequestRouter>) -> Self {
        Self {
            router,
            handlers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn router(&self) -> &RequestRouter {
        &self.router
    }

    /// Register the handler for `name`, replacing any previous one.
    pub fn register_handler<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&ProxyRequest, &RouteMatch) -> anyhow::Result<HandlerResponse>
            + Send
            + Sync
            + 'static,
    {
        if self.handlers.insert(name.to_string(), Arc::new(handler)).is_some() {
            warn!(handler_name = %name, "Replaced existing handler");
        } else {
            debug!(
                handler_name = %name,
                total_handlers = self.handlers.len(),
                "Handler registered"
            );
        }
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Resolve and run the handler for a request
    ///
    /// Never fails: an unmatched route is a 404, a handler error or panic is
    /// a 500.
    #[must_use]
    pub fn handle(&self, req: &ProxyRequest) -> HandlerResponse {
        debug!(event = ?req, "Received event");
        let path = req.path.strip_prefix('/').unwrap_or(&req.path);

        let Some(route_match) = self.router.match_route(&req.http_method, &req.path) else {
            return HandlerResponse::error(
                404,
                &format!("Route not found: {} {}", req.http_method, path),
            );
        };

        let handler_name = route_match.handler_name();
        let Some(handler) = self.handlers.get(handler_name) else {
            warn!(handler_name = %handler_name, "Route matched but no handler registered");
            return HandlerResponse::error(404, &format!("Handler not registered: {handler_name}"));
        };

        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| handler(req, &route_match)));
        let duration_us = started.elapsed().as_micros();

        match outcome {
            Ok(Ok(response)) => {
                info!(
                    handler_name = %handler_name,
                    status = response.status,
                    duration_us,
                    "Handler completed"
                );
                response
            }
            Ok(Err(err)) => {
                error!(handler_name = %handler_name, error = %format!("{err:#}"), "Handler failed");
                HandlerResponse::error(500, "Internal server error")
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(handler_name = %handler_name, panic = %message, "Handler panicked");
                HandlerResponse::error(500, "Internal server error")
            }
        }
    }

    /// Resolve, run and shape the API Gateway proxy result
    #[must_use]
    pub fn dispatch(&self, req: &ProxyRequest) -> ProxyResponse {
        self.handle(req).into_proxy_response()
    }
}
