//! # Router Module
//!
//! Path matching and route resolution for Lambda-style request dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Holding an ordered table of routes (method, path pattern, handler name)
//! - Rejecting duplicate registrations when the table is built
//! - Matching an incoming method and path to the first route that fits
//! - Extracting named path parameters from the matched route
//!
//! ## Matching rules
//!
//! Patterns use the `:name` placeholder convention (`colors/:id`). A request
//! path has a single leading slash stripped and is split on `/`. A route
//! matches when the method agrees, the segment counts agree, every literal
//! segment is equal and every parameter faces a non-empty segment.
//!
//! Routes are tried in registration order and the first match wins. A
//! parameter route registered before a literal route of the same shape
//! shadows it:
//!
//! ```rust
//! use oapi_lambda_router::router::{RequestRouter, Route};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = RequestRouter::build(vec![
//!     Route::new("GET", "/a/:x", "param_first")?,
//!     Route::new("GET", "/a/b", "literal_second")?,
//! ])?;
//!
//! let m = router.match_route("GET", "/a/b").unwrap();
//! assert_eq!(m.handler_name(), "param_first");
//! assert_eq!(m.get_path_param("x"), Some("b"));
//! # Ok(())
//! # }
//! ```
//!
//! Captured values are raw request text; percent-decoding is left to the
//! handler.

mod core;
mod error;
mod route;
#[cfg(test)]
mod tests;

pub use self::core::{ParamVec, RequestRouter, RouteMatch, MAX_INLINE_PARAMS};
pub use error::RouterError;
pub use route::{parse_method, PathPattern, Route, Segment, SUPPORTED_METHODS};
