use super::core::{Dispatcher, HandlerResponse};
use super::event::ProxyRequest;
use crate::router::{RouteMatch, RouterError};
use crate::spec::LoadedSpec;
use anyhow::Context;
use http::Method;
use serde_json::{json, Value};
use std::sync::Arc;

/// Placeholder behaviour for an operation nobody has implemented yet.
///
/// GET answers an empty list. Other verbs parse a non-empty JSON body first (a
/// malformed body fails the handler) and answer an empty object. The
/// envelope is `{"statusCode": status, "data": ...}`.
pub fn stub_handler(
    method: Method,
    status: u16,
) -> impl Fn(&ProxyRequest, &RouteMatch) -> anyhow::Result<HandlerResponse> + Send + Sync + 'static
{
    move |req: &ProxyRequest, _route: &RouteMatch| {
        if method == Method::GET {
            return Ok(HandlerResponse::data(status, json!([])));
        }
        if let Some(body) = req.decoded_body()?.filter(|b| !b.is_empty()) {
            let _parsed: Value =
                serde_json::from_str(&body).context("request body is not valid JSON")?;
        }
        Ok(HandlerResponse::data(status, json!({})))
    }
}

impl Dispatcher {
    /// Router plus a stub handler for every operation in the spec
    ///
    /// # Errors
    ///
    /// Fails when the spec's routes do not form a valid route table.
    pub fn with_stub_handlers(spec: &LoadedSpec) -> Result<Self, RouterError> {
        let router = Arc::new(spec.router()?);
        let mut dispatcher = Dispatcher::new(router);
        for route in &spec.routes {
            dispatcher.register_handler(
                &route.operation_id,
                stub_handler(route.method.clone(), route.status_code),
            );
        }
        Ok(dispatcher)
    }
}
