//! # Generator Configuration
//!
//! Settings for invoking the external OpenAPI generator, read from an
//! optional YAML file and then overridden from the environment.
//!
//! ```yaml
//! generator_bin: node_modules/.bin/openapi-generator-cli
//! ignore_file: .openapi-generator-ignore
//! post_process_command: prettier --write
//! package_version: 1.0.0
//! skip_validate_spec: true
//! ```
//!
//! ## Environment Variables
//!
//! - `OLR_GENERATOR_BIN` - generator executable (wins over the file)
//! - `OLR_POST_PROCESS` - command exported as `TS_POST_PROCESS_FILE`
//!
//! Relative paths are resolved against the project root when the generator
//! command is built, not when the file is loaded.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Default generator location below the project root
pub const DEFAULT_GENERATOR_BIN: &str = "node_modules/.bin/openapi-generator-cli";
/// Default ignore-file location below the project root
pub const DEFAULT_IGNORE_FILE: &str = ".openapi-generator-ignore";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub generator_bin: PathBuf,
    pub ignore_file: PathBuf,
    /// Exported to the generator as `TS_POST_PROCESS_FILE`
    pub post_process_command: String,
    /// `npmVersion` of generated packages
    pub package_version: String,
    /// Pass `--skip-validate-spec`
    pub skip_validate_spec: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator_bin: PathBuf::from(DEFAULT_GENERATOR_BIN),
            ignore_file: PathBuf::from(DEFAULT_IGNORE_FILE),
            post_process_command: "prettier --write".to_string(),
            package_version: "1.0.0".to_string(),
            skip_validate_spec: true,
        }
    }
}

impl GeneratorConfig {
    /// Load from `path` when given (defaults otherwise), then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid YAML.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the YAML error for malformed input.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(bin) = env::var("OLR_GENERATOR_BIN") {
            if !bin.is_empty() {
                self.generator_bin = PathBuf::from(bin);
            }
        }
        if let Ok(cmd) = env::var("OLR_POST_PROCESS") {
            self.post_process_command = cmd;
        }
    }

    /// Generator executable, resolved against `root` when relative
    #[must_use]
    pub fn generator_bin_in(&self, root: &Path) -> PathBuf {
        resolve(root, &self.generator_bin)
    }

    /// Ignore file, resolved against `root` when relative
    #[must_use]
    pub fn ignore_file_in(&self, root: &Path) -> PathBuf {
        resolve(root, &self.ignore_file)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.generator_bin, PathBuf::from(DEFAULT_GENERATOR_BIN));
        assert_eq!(cfg.post_process_command, "prettier --write");
        assert!(cfg.skip_validate_spec);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = GeneratorConfig::from_yaml("package_version: 2.3.4\n").unwrap();
        assert_eq!(cfg.package_version, "2.3.4");
        assert_eq!(cfg.ignore_file, PathBuf::from(DEFAULT_IGNORE_FILE));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(GeneratorConfig::from_yaml("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(GeneratorConfig::from_yaml("skip_validate_spec: [1, 2]\n").is_err());
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let cfg = GeneratorConfig::default();
        let root = Path::new("/work/api");
        assert_eq!(
            cfg.generator_bin_in(root),
            PathBuf::from("/work/api/node_modules/.bin/openapi-generator-cli")
        );
        let mut abs = cfg.clone();
        abs.ignore_file = PathBuf::from("/etc/ignore");
        assert_eq!(abs.ignore_file_in(root), PathBuf::from("/etc/ignore"));
    }
}
