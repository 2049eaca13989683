use super::types::RouteSpec;
use crate::router::parse_method;
use anyhow::bail;
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Verbs recognised inside an OpenAPI path item
pub const PATH_ITEM_VERBS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

static PATH_PARAM: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{([^}]+)\}").expect("valid path parameter regex")
});

/// Convert an OpenAPI path key into a router pattern.
///
/// `{param}` placeholders become `:param` and one leading slash is dropped:
/// `/users/{id}/colors` → `users/:id/colors`.
#[must_use]
pub fn to_router_pattern(path: &str) -> String {
    let converted = PATH_PARAM.replace_all(path, ":$1");
    converted
        .strip_prefix('/')
        .unwrap_or(&*converted)
        .to_string()
}

/// Name used for an operation that has no `operationId`.
///
/// The lowercase method followed by the path with `/` turned into `_` and
/// braces removed: `get` + `/colors/{id}` → `get_colors_id`.
#[must_use]
pub fn fallback_operation_id(method: &str, path: &str) -> String {
    let flattened: String = path
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c == '/' { '_' } else { c })
        .collect();
    format!("{}{}", method.to_ascii_lowercase(), flattened)
}

/// Success status for generated handlers
#[must_use]
pub fn default_status_for(method: &Method) -> u16 {
    if *method == Method::POST {
        201
    } else {
        200
    }
}

/// Walk `paths` in document order and produce one [`RouteSpec`] per operation.
///
/// `options` operations are skipped; pre-flight requests are answered by
/// the CORS headers every response carries. Non-verb keys (`summary`,
/// `parameters`, `x-*`) are ignored.
///
/// # Errors
///
/// Fails when `paths` is not an object, or when two operations share an
/// `operationId` (explicit or derived).
pub fn build_routes(spec: &Value) -> anyhow::Result<Vec<RouteSpec>> {
    let paths = match spec.get("paths") {
        Some(Value::Object(paths)) => paths,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(_) => bail!("`paths` must be an object"),
    };

    let mut routes = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (key, operation) in item {
            let verb = key.to_ascii_lowercase();
            if !PATH_ITEM_VERBS.contains(&verb.as_str()) || verb == "options" {
                continue;
            }
            // TRACE is a valid OpenAPI verb but not routable here
            let Some(method) = parse_method(&verb) else {
                tracing::warn!(path = %path, method = %verb, "Skipping unsupported method");
                continue;
            };

            let operation_id = operation
                .get("operationId")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| fallback_operation_id(&verb, path));

            if !seen_ids.insert(operation_id.clone()) {
                bail!(
                    "duplicate operationId '{}' at {} {}",
                    operation_id,
                    method,
                    path
                );
            }

            routes.push(RouteSpec {
                status_code: default_status_for(&method),
                method,
                path: path.clone(),
                pattern: to_router_pattern(path),
                operation_id,
            });
        }
    }

    Ok(routes)
}
