//! # oapi-lambda-router
//!
//! **oapi-lambda-router** turns an [OpenAPI 3](https://spec.openapis.org/oas/v3.0.3) document into
//! a first-match route table and packages generated TypeScript servers as a single AWS Lambda
//! handler.
//!
//! ## Overview
//!
//! The heart of the crate is a deliberately small path router:
//!
//! - routes are tried in **registration order** and the first one whose method and
//!   shape accept the request wins;
//! - patterns use `:name` placeholders (`colors/:colorId`), one per path segment;
//! - a single leading `/` is ignored on both patterns and request paths;
//! - captured values are returned verbatim (no percent-decoding);
//! - registering the same method and shape twice is rejected when the router is built.
//!
//! Around it sit the pieces needed to use it from an OpenAPI spec:
//!
//! - **[`router`]** - patterns, routes and the first-match [`RequestRouter`]
//! - **[`spec`]** - load a YAML/JSON spec into an ordered route table
//! - **[`dispatcher`]** - turn API Gateway proxy events into handler calls, 404s and 500s
//! - **[`generator`]** - drive the external OpenAPI generator and write the Lambda package
//! - **[`config`]** - generator settings from YAML and the environment
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `oapi-lambda-gen` command line
//!
//! ## Quick Start
//!
//! ```rust
//! use oapi_lambda_router::{RequestRouter, Route};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = RequestRouter::build(vec![
//!     Route::new("GET", "/colors", "getColors")?,
//!     Route::new("GET", "/colors/:colorId", "getColorById")?,
//! ])?;
//!
//! let m = router.match_route("GET", "/colors/42").ok_or("no match")?;
//! assert_eq!(m.handler_name(), "getColorById");
//! assert_eq!(m.get_path_param("colorId"), Some("42"));
//! assert!(router.match_route("DELETE", "/colors/42").is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Command Line
//!
//! ```bash
//! oapi-lambda-gen routes --spec colors-api.yaml
//! oapi-lambda-gen generate server colors-api.yaml
//! ```
//!
//! ## Logging
//!
//! Logs go to stderr and are configured with `OLR_LOG_LEVEL`, `OLR_LOG_FORMAT`
//! (`pretty` or `json`), `OLR_LOG_FILTER` and `OLR_LOG_LOCATION`; see [`logging`].

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod generator;
pub mod logging;
pub mod router;
pub mod spec;

pub use router::{RequestRouter, Route, RouteMatch, RouterError};
pub use spec::{load_spec, LoadedSpec, RouteSpec};
