//! OpenAPI loading: turns a specification document into an ordered list of
//! operations and, from that, a [`RequestRouter`](crate::router::RequestRouter).
mod build;
mod load;
mod types;

pub use build::{
    build_routes, default_status_for, fallback_operation_id, to_router_pattern, PATH_ITEM_VERBS,
};
pub use load::{load_spec, load_spec_from_str, parse_document, SpecFormat};
pub use types::{LoadedSpec, RouteSpec};
