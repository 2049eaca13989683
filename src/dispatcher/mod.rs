//! # Dispatcher Module
//!
//! Runs the consolidated Lambda handler: an API Gateway proxy event is
//! matched against the [`RequestRouter`](crate::router::RequestRouter), the
//! handler registered under the route's `operationId` is called with the
//! request and its path parameters, and the result is shaped into a proxy
//! response carrying the CORS header set.
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | handler returned | handler's | handler's |
//! | no route | 404 | `{"statusCode":404,"message":"Route not found: GET colors/1/x"}` |
//! | no handler for route | 404 | `{"statusCode":404,"message":"Handler not registered: ..."}` |
//! | handler error or panic | 500 | `{"statusCode":500,"message":"Internal server error"}` |
//!
//! ```rust
//! use oapi_lambda_router::dispatcher::{Dispatcher, HandlerResponse, ProxyRequest};
//! use oapi_lambda_router::router::{RequestRouter, Route};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = RequestRouter::build(vec![Route::new("GET", "colors/:id", "getColor")?])?;
//! let mut dispatcher = Dispatcher::new(Arc::new(router));
//! dispatcher.register_handler("getColor", |_req, m| {
//!     Ok(HandlerResponse::data(200, json!({ "id": m.get_path_param("id") })))
//! });
//!
//! let resp = dispatcher.dispatch(&ProxyRequest::new("GET", "/colors/42"));
//! assert_eq!(resp.status_code, 200);
//! # Ok(())
//! # }
//! ```

mod core;
mod event;
mod stub;

pub use self::core::{Dispatcher, Handler, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS};
pub use event::{ProxyRequest, ProxyResponse, CORS_HEADERS};
pub use stub::stub_handler;
