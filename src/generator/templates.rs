use anyhow::bail;
use askama::Template;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::spec::{LoadedSpec, RouteSpec};

/// Template data for the Lambda package manifest
///
/// Every field is an encoded JSON string literal, quotes included.
#[derive(Template)]
#[template(path = "package.json", escape = "none")]
pub struct PackageJsonTemplate {
    /// `<spec stem>-lambda-handler`
    pub name: String,
    pub version: String,
    pub description: String,
}

/// TypeScript compiler configuration
#[derive(Template)]
#[template(path = "tsconfig.json", escape = "none")]
pub struct TsconfigTemplate;

/// One entry of the generated route table
#[derive(Debug, Clone)]
pub struct HandlerRoute {
    pub method: String,
    /// Router pattern as a string literal (`"colors/:id"`)
    pub pattern_literal: String,
    /// `METHOD /pattern`, safe inside a line comment
    pub route_comment: String,
    /// Operation id, safe inside a line comment
    pub operation_comment: String,
    /// TypeScript function name (`handleGetColor`)
    pub handler_fn: String,
    pub status_code: u16,
    pub is_get: bool,
}

impl From<&RouteSpec> for HandlerRoute {
    fn from(route: &RouteSpec) -> Self {
        Self {
            method: route.method.to_string(),
            pattern_literal: string_literal(&route.pattern),
            route_comment: comment_text(&format!("{} /{}", route.method, route.pattern)),
            operation_comment: comment_text(&route.operation_id),
            handler_fn: handler_fn_name(&route.operation_id),
            status_code: route.status_code,
            is_get: route.method == http::Method::GET,
        }
    }
}

/// Consolidated Lambda handler (`index.ts`)
#[derive(Template)]
#[template(path = "index.ts", escape = "none")]
pub struct LambdaHandlerTemplate {
    /// `<title> <version>`, safe inside a line comment
    pub header_comment: String,
    /// Routes in registration order
    pub routes: Vec<HandlerRoute>,
}

impl LambdaHandlerTemplate {
    /// # Errors
    ///
    /// Fails when two operation ids map to the same TypeScript function
    /// name (`get-color` and `get_color`).
    pub fn from_spec(spec: &LoadedSpec) -> anyhow::Result<Self> {
        let routes: Vec<HandlerRoute> = spec.routes.iter().map(HandlerRoute::from).collect();

        let mut seen: HashMap<&str, &str> = HashMap::with_capacity(routes.len());
        for (route, meta) in routes.iter().zip(&spec.routes) {
            if let Some(first) = seen.insert(&route.handler_fn, &meta.operation_id) {
                bail!(
                    "operationIds '{}' and '{}' both map to handler function {}",
                    first,
                    meta.operation_id,
                    route.handler_fn
                );
            }
        }

        Ok(Self {
            header_comment: comment_text(&format!("{} {}", spec.title, spec.version)),
            routes,
        })
    }
}

/// Encode `s` as a double-quoted JSON string literal, valid in TypeScript too.
fn string_literal(s: &str) -> String {
    Value::from(s).to_string()
}

/// Collapse all whitespace runs (line breaks included) into single spaces
/// so `s` cannot end a `//` comment.
fn comment_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `handle` + operation id with its first letter upper-cased.
///
/// Characters that cannot appear in a TypeScript identifier become `_`.
#[must_use]
pub fn handler_fn_name(operation_id: &str) -> String {
    let mut chars = operation_id.chars();
    let mut name = String::from("handle");
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
    }
    name.extend(chars);
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name of the spec without its extension (`colors-api.yaml` → `colors-api`)
#[must_use]
pub fn spec_stem(spec_path: &Path) -> String {
    spec_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "openapi".to_string())
}

/// `colors-api_v2` → `Colors Api V2`
#[must_use]
pub fn title_case_project(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn ensure_trailing_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}

/// Render `package.json` for the Lambda package
///
/// # Errors
///
/// Returns the template rendering error.
pub fn render_package_json(spec_path: &Path, version: &str) -> anyhow::Result<String> {
    let stem = spec_stem(spec_path);
    let tpl = PackageJsonTemplate {
        name: string_literal(&format!("{stem}-lambda-handler")),
        version: string_literal(version),
        description: string_literal(&format!(
            "Generated Lambda handler for {} API",
            title_case_project(&stem)
        )),
    };
    Ok(ensure_trailing_newline(tpl.render()?))
}

/// # Errors
///
/// Returns the template rendering error.
pub fn render_tsconfig() -> anyhow::Result<String> {
    Ok(ensure_trailing_newline(TsconfigTemplate.render()?))
}

/// # Errors
///
/// Fails when operation ids collide as TypeScript function names, or on a
/// template rendering error.
pub fn render_lambda_handler(spec: &LoadedSpec) -> anyhow::Result<String> {
    Ok(ensure_trailing_newline(
        LambdaHandlerTemplate::from_spec(spec)?.render()?,
    ))
}

/// Write `package.json`, `tsconfig.json` and `index.ts` into `dir`
///
/// # Errors
///
/// Fails on rendering or I/O errors.
pub fn write_lambda_package(
    spec_path: &Path,
    spec: &LoadedSpec,
    version: &str,
    dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let files = [
        ("package.json", render_package_json(spec_path, version)?),
        ("tsconfig.json", render_tsconfig()?),
        ("index.ts", render_lambda_handler(spec)?),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents)?;
        println!("✅ Generated {}", path.display());
        written.push(path);
    }
    Ok(written)
}
