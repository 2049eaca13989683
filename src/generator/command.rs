use crate::config::GeneratorConfig;
use clap::ValueEnum;
use serde_json::{json, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// What the external generator should produce
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenerationKind {
    /// TypeScript axios client
    Client,
    /// NestJS server stub plus the Lambda handler package
    Server,
}

impl GenerationKind {
    /// Generator name passed with `-g`
    #[must_use]
    pub fn generator_name(self) -> &'static str {
        match self {
            GenerationKind::Client => "typescript-axios",
            GenerationKind::Server => "typescript-nestjs",
        }
    }

    /// Directory name below `<root>/generated`
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            GenerationKind::Client => "client",
            GenerationKind::Server => "server",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// `<root dir name>-client` or `<root dir name>-server`
#[must_use]
pub fn npm_name(root: &Path, kind: GenerationKind) -> String {
    let base = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "openapi".to_string());
    format!("{base}-{}", kind.dir_name())
}

/// Generator `--additional-properties` for `kind`, in a fixed key order.
#[must_use]
pub fn additional_properties(kind: GenerationKind, npm_name: &str, npm_version: &str) -> Value {
    match kind {
        GenerationKind::Client => json!({
            "supportsES6": true,
            "withInterfaces": true,
            "npmName": npm_name,
            "npmVersion": npm_version,
            "apiDocs": "false",
            "modelDocs": "false",
            "apiTests": "false",
            "modelTests": "false",
        }),
        GenerationKind::Server => json!({
            "npmName": npm_name,
            "npmVersion": npm_version,
            "supportsES6": true,
            "framework": "nest",
            "useTypeScript": true,
            "apiDocs": "false",
            "modelDocs": "false",
            "apiTests": "false",
            "modelTests": "false",
        }),
    }
}

/// A fully-resolved call of the external OpenAPI generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl GeneratorInvocation {
    /// Build the invocation for generating `kind` from `spec` into `output`.
    ///
    /// `root` is the project root: it names the npm package and anchors the
    /// relative paths in `config`.
    #[must_use]
    pub fn new(
        kind: GenerationKind,
        spec: &Path,
        output: &Path,
        root: &Path,
        config: &GeneratorConfig,
    ) -> Self {
        let props = additional_properties(kind, &npm_name(root, kind), &config.package_version);

        let mut args = vec![
            "generate".to_string(),
            "-g".to_string(),
            kind.generator_name().to_string(),
            "-i".to_string(),
            spec.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        if config.skip_validate_spec {
            args.push("--skip-validate-spec".to_string());
        }
        args.push("--enable-post-process-file".to_string());
        args.push(format!(
            "--ignore-file-override={}",
            config.ignore_file_in(root).display()
        ));
        args.push(format!("--additional-properties={props}"));

        Self {
            program: config.generator_bin_in(root),
            args,
            envs: vec![(
                "TS_POST_PROCESS_FILE".to_string(),
                config.post_process_command.clone(),
            )],
        }
    }

    /// The invocation as a [`Command`], inheriting stdio
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.envs {
            cmd.env(k, v);
        }
        cmd
    }

    /// Run the generator and wait for it.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be started or exits unsuccessfully.
    pub fn run(&self) -> anyhow::Result<()> {
        info!(command = %self, "Running OpenAPI generator");
        let status = self.to_command().status().map_err(|e| {
            anyhow::anyhow!(
                "failed to start generator {}: {e}",
                self.program.display()
            )
        })?;
        if !status.success() {
            anyhow::bail!("OpenAPI generator failed with {status}");
        }
        Ok(())
    }
}

impl fmt::Display for GeneratorInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.envs {
            write!(f, "{k}={v:?} ")?;
        }
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_npm_name() {
        assert_eq!(npm_name(Path::new("/work/colors"), GenerationKind::Client), "colors-client");
        assert_eq!(npm_name(Path::new("/"), GenerationKind::Server), "openapi-server");
    }

    #[test]
    fn test_additional_properties_key_order() {
        let props = additional_properties(GenerationKind::Server, "x-server", "1.0.0");
        let keys: Vec<_> = props.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "npmName",
                "npmVersion",
                "supportsES6",
                "framework",
                "useTypeScript",
                "apiDocs",
                "modelDocs",
                "apiTests",
                "modelTests"
            ]
        );
    }

    #[test]
    fn test_client_invocation_args() {
        let cfg = GeneratorConfig::default();
        let inv = GeneratorInvocation::new(
            GenerationKind::Client,
            Path::new("api.yaml"),
            Path::new("/work/colors/generated/client"),
            Path::new("/work/colors"),
            &cfg,
        );
        assert_eq!(
            inv.program,
            PathBuf::from("/work/colors/node_modules/.bin/openapi-generator-cli")
        );
        assert_eq!(
            &inv.args[..7],
            &[
                "generate",
                "-g",
                "typescript-axios",
                "-i",
                "api.yaml",
                "-o",
                "/work/colors/generated/client"
            ]
        );
        assert!(inv.args.contains(&"--skip-validate-spec".to_string()));
        assert!(inv
            .args
            .contains(&"--ignore-file-override=/work/colors/.openapi-generator-ignore".to_string()));
        let props = inv
            .args
            .iter()
            .find_map(|a| a.strip_prefix("--additional-properties="))
            .unwrap();
        let props: Value = serde_json::from_str(props).unwrap();
        assert_eq!(props["npmName"], "colors-client");
        assert_eq!(props["withInterfaces"], true);
        assert_eq!(
            inv.envs,
            vec![("TS_POST_PROCESS_FILE".to_string(), "prettier --write".to_string())]
        );
    }

    #[test]
    fn test_validation_flag_follows_config() {
        let cfg = GeneratorConfig {
            skip_validate_spec: false,
            ..GeneratorConfig::default()
        };
        let inv = GeneratorInvocation::new(
            GenerationKind::Server,
            Path::new("api.yaml"),
            Path::new("out"),
            Path::new("/r"),
            &cfg,
        );
        assert!(!inv.args.contains(&"--skip-validate-spec".to_string()));
        assert!(inv.args.contains(&"typescript-nestjs".to_string()));
    }
}
