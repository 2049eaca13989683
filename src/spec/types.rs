use crate::router::{RequestRouter, Route, RouterError};
use http::Method;

/// One operation lifted out of an OpenAPI document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub method: Method,
    /// Path key as written in the document (e.g. `/colors/{id}`)
    pub path: String,
    /// Router pattern (e.g. `colors/:id`)
    pub pattern: String,
    /// `operationId`, or a name derived from method and path
    pub operation_id: String,
    /// Status code answered on success (201 for POST, 200 otherwise)
    pub status_code: u16,
}

impl RouteSpec {
    /// Router entry for this operation
    ///
    /// # Errors
    ///
    /// Propagates pattern errors from [`Route::new`].
    pub fn to_route(&self) -> Result<Route, RouterError> {
        Route::new(self.method.as_str(), &self.pattern, self.operation_id.as_str())
    }
}

/// Routes plus the document metadata the generator needs
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// Operations in document order
    pub routes: Vec<RouteSpec>,
}

impl LoadedSpec {
    /// Build the request router for these routes, preserving document order.
    ///
    /// # Errors
    ///
    /// Fails when two operations collapse onto the same method and pattern
    /// shape (e.g. `/a/{x}` and `/a/{y}`).
    pub fn router(&self) -> Result<RequestRouter, RouterError> {
        let routes = self
            .routes
            .iter()
            .map(RouteSpec::to_route)
            .collect::<Result<Vec<_>, _>>()?;
        RequestRouter::build(routes)
    }

    /// Look up an operation by its id
    #[must_use]
    pub fn operation(&self, operation_id: &str) -> Option<&RouteSpec> {
        self.routes.iter().find(|r| r.operation_id == operation_id)
    }
}
