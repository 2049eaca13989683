use super::command::{GenerationKind, GeneratorInvocation};
use super::templates::{write_lambda_package, LambdaHandlerTemplate};
use crate::config::GeneratorConfig;
use crate::spec::load_spec;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory below the server output that receives the Lambda package
pub const LAMBDA_DIR: &str = "lambda";

/// Inputs of one `generate` run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub kind: GenerationKind,
    pub spec: PathBuf,
    /// Project root; defaults the output dir and names the npm package
    pub root: PathBuf,
    /// Overrides `<root>/generated/<kind>`
    pub output: Option<PathBuf>,
    /// Log the generator command instead of running it; write nothing
    pub dry_run: bool,
    pub config: GeneratorConfig,
}

/// What a `generate` run did
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub invocation: GeneratorInvocation,
    /// Files written by post-processing (empty for clients and dry runs)
    pub files_written: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Remove everything inside `dir`, keeping `dir` itself
fn empty_dir(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Refuse an output directory whose cleaning would delete the project root
/// or the spec itself.
fn ensure_output_is_disposable(output_dir: &Path, root: &Path, spec: &Path) -> anyhow::Result<()> {
    if !output_dir.exists() {
        return Ok(());
    }
    let out = fs::canonicalize(output_dir)
        .with_context(|| format!("output directory {} is not accessible", output_dir.display()))?;
    if root.starts_with(&out) {
        anyhow::bail!(
            "output directory {} contains the project root {}; refusing to empty it",
            out.display(),
            root.display()
        );
    }
    let spec = fs::canonicalize(spec)?;
    if spec.starts_with(&out) {
        anyhow::bail!(
            "output directory {} contains the spec {}; refusing to empty it",
            out.display(),
            spec.display()
        );
    }
    Ok(())
}

/// Generate a client or server from an OpenAPI spec
///
/// 1. check the spec exists (servers also load it and build the route table
///    so configuration errors surface before anything is written);
/// 2. create and empty the output directory, which must not hold the
///    project root or the spec;
/// 3. run the external generator;
/// 4. for servers, write the Lambda package into `<output>/lambda`.
///
/// # Errors
///
/// Fails on a missing or invalid spec, an invalid route table, operation
/// ids that collide as handler names, an output directory holding the root
/// or the spec, I/O errors and a failing generator.
pub fn generate_project(opts: &GenerateOptions) -> anyhow::Result<GenerationReport> {
    if !opts.spec.exists() {
        anyhow::bail!("Spec file \"{}\" does not exist", opts.spec.display());
    }

    let root = fs::canonicalize(&opts.root)
        .with_context(|| format!("project root {} is not accessible", opts.root.display()))?;
    let output_dir = opts
        .output
        .clone()
        .unwrap_or_else(|| root.join("generated").join(opts.kind.dir_name()));

    let loaded = match opts.kind {
        GenerationKind::Server => {
            let loaded = load_spec(&opts.spec)?;
            loaded.router()?;
            LambdaHandlerTemplate::from_spec(&loaded)?;
            Some(loaded)
        }
        GenerationKind::Client => None,
    };
    ensure_output_is_disposable(&output_dir, &root, &opts.spec)?;

    let invocation = GeneratorInvocation::new(opts.kind, &opts.spec, &output_dir, &root, &opts.config);

    if opts.dry_run {
        println!("ℹ️  Dry run: {invocation}");
        return Ok(GenerationReport {
            output_dir,
            invocation,
            files_written: Vec::new(),
            dry_run: true,
        });
    }

    println!(
        "📄 Generating {} from {} into {}",
        opts.kind,
        opts.spec.display(),
        output_dir.display()
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    empty_dir(&output_dir).with_context(|| format!("failed to clean {}", output_dir.display()))?;

    invocation.run()?;

    let files_written = match &loaded {
        Some(spec) => write_lambda_package(
            &opts.spec,
            spec,
            &opts.config.package_version,
            &output_dir.join(LAMBDA_DIR),
        )?,
        None => Vec::new(),
    };

    info!(
        kind = %opts.kind,
        output = %output_dir.display(),
        files = files_written.len(),
        "Generation complete"
    );
    println!("✅ {} successfully generated in {}", opts.kind, output_dir.display());

    Ok(GenerationReport {
        output_dir,
        invocation,
        files_written,
        dry_run: false,
    })
}
