use super::build::{build_routes, PATH_ITEM_VERBS};
use super::types::LoadedSpec;
use anyhow::{bail, Context};
use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::info;

/// Serialization of an OpenAPI document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// `.yaml` / `.yml` are YAML, anything else is treated as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SpecFormat::Yaml
            }
            _ => SpecFormat::Json,
        }
    }
}

fn strip_unknown_verbs(val: &mut Value) {
    if let Some(Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let Value::Object(obj) = item {
                // retain keeps insertion order; remove would swap entries
                obj.retain(|k, _| {
                    let lk = k.to_ascii_lowercase();
                    match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if PATH_ITEM_VERBS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    }
                });
            }
        }
    }
}

/// Convert YAML into JSON without losing mapping order.
///
/// YAML allows non-string keys such as unquoted response codes (`200:`);
/// they are rendered to their string form.
fn yaml_to_json(value: serde_yaml::Value) -> anyhow::Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                match n.as_f64().and_then(Number::from_f64) {
                    Some(num) => Value::Number(num),
                    None => bail!("unsupported non-finite YAML number: {}", n),
                }
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<anyhow::Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut obj = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML mapping key: {:?}", other),
                };
                obj.insert(key, yaml_to_json(v)?);
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// Parse a document into an order-preserving JSON value.
///
/// # Errors
///
/// Returns the underlying YAML/JSON syntax error, or an error for YAML
/// values JSON cannot hold (`.nan`, `.inf`, non-scalar keys).
pub fn parse_document(content: &str, format: SpecFormat) -> anyhow::Result<Value> {
    match format {
        SpecFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).context("failed to parse YAML")?;
            yaml_to_json(yaml)
        }
        SpecFormat::Json => serde_json::from_str(content).context("failed to parse JSON"),
    }
}

/// Load routes and metadata from document text.
///
/// # Errors
///
/// Fails on syntax errors, on documents that are not OpenAPI 3, and on
/// duplicate operation ids.
pub fn load_spec_from_str(content: &str, format: SpecFormat) -> anyhow::Result<LoadedSpec> {
    let mut value = parse_document(content, format)?;
    strip_unknown_verbs(&mut value);

    let spec: oas3::OpenApiV3Spec = serde_json::from_value(value.clone())
        .context("document is not a valid OpenAPI 3 specification")?;

    let routes = build_routes(&value)?;
    Ok(LoadedSpec {
        title: spec.info.title,
        version: spec.info.version,
        routes,
    })
}

/// Load an OpenAPI specification file (YAML or JSON)
///
/// # Errors
///
/// Fails when the file cannot be read or parsed; see [`load_spec_from_str`].
pub fn load_spec(path: impl AsRef<Path>) -> anyhow::Result<LoadedSpec> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let loaded = load_spec_from_str(&content, SpecFormat::from_path(path))
        .with_context(|| format!("failed to load spec {}", path.display()))?;

    info!(
        spec = %path.display(),
        title = %loaded.title,
        operations = loaded.routes.len(),
        "Specification loaded"
    );
    Ok(loaded)
}
