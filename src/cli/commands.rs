use crate::config::GeneratorConfig;
use crate::dispatcher::{Dispatcher, ProxyRequest};
use crate::generator::{generate_project, GenerateOptions, GenerationKind};
use crate::spec::load_spec;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Command-line interface for oapi-lambda-router
///
/// Generates clients and Lambda-packaged servers from OpenAPI specs and
/// exercises the route table those servers use.
#[derive(Parser, Debug)]
#[command(name = "oapi-lambda-gen", version)]
#[command(about = "OpenAPI client/server generator front-end with a first-match Lambda router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a client or server from an OpenAPI spec
    Generate {
        /// What to generate
        #[arg(value_enum)]
        kind: GenerationKind,

        /// Path to the OpenAPI specification file (YAML or JSON)
        spec: PathBuf,

        /// Project root (names the npm package, anchors relative config paths)
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output directory (default: <root>/generated/<kind>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generator configuration file (YAML)
        #[arg(short, long, env = "OLR_CONFIG")]
        config: Option<PathBuf>,

        /// Print the generator command without running it or writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the route table in registration order
    Routes {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
    /// Resolve a method and path against the route table
    Match {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// HTTP method (case-insensitive)
        method: String,

        /// Request path without query string, e.g. /colors/42
        path: String,
    },
    /// Dispatch an API Gateway proxy event through stub handlers
    Invoke {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Event JSON file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        event: PathBuf,
    },
}

/// Execute a parsed command line
///
/// # Errors
///
/// Returns an error if:
/// - The OpenAPI spec cannot be loaded or its route table is invalid
/// - The generator cannot be run or fails
/// - The event cannot be read or parsed
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Generate {
            kind,
            spec,
            root,
            output,
            config,
            dry_run,
        } => {
            let config = GeneratorConfig::load(config.as_deref())?;
            generate_project(&GenerateOptions {
                kind,
                spec,
                root,
                output,
                dry_run,
                config,
            })?;
            Ok(())
        }
        Commands::Routes { spec } => print_routes(&spec, &mut out),
        Commands::Match { spec, method, path } => print_match(&spec, &method, &path, &mut out),
        Commands::Invoke { spec, event } => {
            let raw = read_event(&event)?;
            invoke(&spec, &raw, &mut out)
        }
    }
}

/// Write one line per route: `METHOD /pattern -> operationId (status)`
///
/// # Errors
///
/// Fails when the spec cannot be loaded or does not form a route table.
pub fn print_routes(spec: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let loaded = load_spec(spec)?;
    loaded.router()?;
    writeln!(
        out,
        "[routes] {} {} count={}",
        loaded.title,
        loaded.version,
        loaded.routes.len()
    )?;
    for route in &loaded.routes {
        writeln!(out, "[route] {} ({})", route.to_route()?, route.status_code)?;
    }
    Ok(())
}

/// Write the handler and parameters `method path` resolves to
///
/// # Errors
///
/// Fails when the spec cannot be loaded or does not form a route table.
/// An unmatched request is not an error.
pub fn print_match(spec: &Path, method: &str, path: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let router = load_spec(spec)?.router()?;
    match router.match_route(method, path) {
        Some(m) => {
            writeln!(out, "{} {} -> {}", method.to_ascii_uppercase(), path, m.handler_name())?;
            for (name, value) in &m.path_params {
                writeln!(out, "  {name} = {value}")?;
            }
        }
        None => writeln!(out, "{} {} -> no match", method.to_ascii_uppercase(), path)?,
    }
    Ok(())
}

fn read_event(source: &Path) -> anyhow::Result<String> {
    if source == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read event from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read event {}", source.display()))
    }
}

/// Dispatch `raw_event` through stub handlers and write the proxy result
///
/// # Errors
///
/// Fails when the spec or event cannot be parsed. Handler failures are
/// reported as 500 results, not errors.
pub fn invoke(spec: &Path, raw_event: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let loaded = load_spec(spec)?;
    let dispatcher = Dispatcher::with_stub_handlers(&loaded)?;
    let event: ProxyRequest =
        serde_json::from_str(raw_event).context("event is not an API Gateway proxy event")?;
    let response = dispatcher.dispatch(&event);
    serde_json::to_writer_pretty(&mut *out, &response)?;
    writeln!(out)?;
    Ok(())
}
