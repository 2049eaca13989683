//! Router core module - request lookup.
//!
//! The table is an ordered `Vec` scanned front to back. The first route whose
//! method, segment count and literal segments agree with the request wins;
//! nothing is re-ordered by specificity.

use super::error::RouterError;
use super::route::{parse_method, Route, Segment};
use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured path parameters in left-to-right pattern order.
///
/// Names are shared with the route table; values are the raw request text.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Path parameters (e.g. `colors/:id` + `/colors/42` → `[("id", "42")]`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Handler reference of the matched route
    #[inline]
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.route.handler_name
    }

    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics if a pattern repeats a parameter name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to a HashMap
    /// Note: This allocates - use get_path_param() on the request path instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// First-match request router
///
/// Built once from an ordered route list and immutable afterwards, so a
/// shared `Arc<RequestRouter>` can serve concurrent lookups without locking.
#[derive(Debug, Clone, Default)]
pub struct RequestRouter {
    routes: Vec<Arc<Route>>,
}

impl RequestRouter {
    /// Build a router from routes in registration order
    ///
    /// Registration order is the tie-break for overlapping patterns, so pass
    /// routes in the order they appear in the source document.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DuplicateRoute`] when two routes share a method
    /// and a structurally identical pattern. Overlapping but distinct
    /// patterns (`a/:x` vs `a/b`) are accepted and logged.
    pub fn build(routes: Vec<Route>) -> Result<Self, RouterError> {
        let mut table: Vec<Arc<Route>> = Vec::with_capacity(routes.len());

        for route in routes {
            for existing in table.iter().filter(|r| r.method == route.method) {
                if existing.pattern.same_shape(&route.pattern) {
                    return Err(RouterError::DuplicateRoute {
                        method: route.method.to_string(),
                        pattern: route.pattern.to_string(),
                        first: existing.handler_name.to_string(),
                        second: route.handler_name.to_string(),
                    });
                }
                if existing.pattern.overlaps(&route.pattern) {
                    warn!(
                        method = %route.method,
                        winner = %existing.pattern,
                        winner_handler = %existing.handler_name,
                        shadowed = %route.pattern,
                        shadowed_handler = %route.handler_name,
                        "Overlapping routes; the earlier registration wins where both match"
                    );
                }
            }
            table.push(Arc::new(route));
        }

        let routes_summary: Vec<String> = table.iter().take(10).map(|r| r.to_string()).collect();
        info!(
            routes_count = table.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self { routes: table })
    }

    /// Registered routes in registration order
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match a request given the method as a string
    ///
    /// The method is compared case-insensitively. A method outside the
    /// supported set simply matches nothing.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - the first registered route that matches
    /// * `None` - no route matches (the caller answers 404)
    #[must_use]
    pub fn match_route(&self, method: &str, path: &str) -> Option<RouteMatch> {
        match parse_method(method) {
            Some(method) => self.route(&method, path),
            None => {
                debug!(method = %method, path = %path, "Unsupported method; no route matched");
                None
            }
        }
    }

    /// Match a request to a route
    ///
    /// `path` must not carry a query string. A single leading slash is
    /// stripped; everything else, including trailing slashes and
    /// percent-escapes, is matched as-is.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let request: SmallVec<[&str; MAX_INLINE_PARAMS]> = trimmed.split('/').collect();

        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            let segments = route.pattern.segments();
            if segments.len() != request.len() {
                continue;
            }
            if !segments
                .iter()
                .zip(request.iter())
                .all(|(seg, req)| seg.accepts(req))
            {
                continue;
            }

            let path_params: ParamVec = segments
                .iter()
                .zip(request.iter())
                .filter_map(|(seg, req)| match seg {
                    Segment::Param(name) => Some((Arc::clone(name), (*req).to_string())),
                    Segment::Literal(_) => None,
                })
                .collect();

            debug!(
                method = %method,
                path = %path,
                handler_name = %route.handler_name,
                route_pattern = %route.pattern,
                path_params = ?path_params,
                "Route matched"
            );

            return Some(RouteMatch {
                route: Arc::clone(route),
                path_params,
            });
        }

        debug!(method = %method, path = %path, "No route matched");
        None
    }
}

impl TryFrom<Vec<Route>> for RequestRouter {
    type Error = RouterError;

    fn try_from(routes: Vec<Route>) -> Result<Self, Self::Error> {
        Self::build(routes)
    }
}
