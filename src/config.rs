//! Orchestrator configuration.
//!
//! Describes where the analyzer project lives, where its compiled artifact
//! is expected, where inline source is staged, and how to build it.

use serde::{Deserialize, Serialize};
use std::env::consts::EXE_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["sharpcheck.yaml", ".sharpcheck.yaml"];

/// Name of the analyzer binary target.
pub const ANALYZER_BIN: &str = "sharpcheck-analyzer";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AnalyzerConfig {
    /// Analyzer project root; the build runs here (default: ".").
    #[serde(default)]
    pub project_dir: Option<PathBuf>,
    /// Compiled analyzer, relative to `project_dir` unless absolute.
    #[serde(default)]
    pub artifact: Option<PathBuf>,
    /// Directory for ephemeral input files, relative to `project_dir` unless
    /// absolute.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
    #[serde(default)]
    pub build: Option<BuildConfig>,
}

/// Build toolchain invocation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BuildConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            args: ["build", "--release", "--bin", ANALYZER_BIN]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config {}", path.as_ref().display()))?;
        let config: AnalyzerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Load from an explicit path, or discover one, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }
        match discover() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config file");
                Self::parse_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// A config rooted at `project_dir` with every other field defaulted.
    pub fn for_project<P: Into<PathBuf>>(project_dir: P) -> Self {
        Self {
            project_dir: Some(project_dir.into()),
            ..Self::default()
        }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.project_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Expected location of the compiled analyzer.
    pub fn artifact_path(&self) -> PathBuf {
        let artifact = self.artifact.clone().unwrap_or_else(|| {
            PathBuf::from("target")
                .join("release")
                .join(format!("{}{}", ANALYZER_BIN, EXE_SUFFIX))
        });
        self.resolve(artifact)
    }

    pub fn staging_dir(&self) -> PathBuf {
        let dir = self
            .staging_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".sharpcheck").join("staging"));
        self.resolve(dir)
    }

    pub fn build_command(&self) -> BuildConfig {
        self.build.clone().unwrap_or_default()
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.project_dir().join(path)
        }
    }
}

/// Find a config file in the current directory, then in the platform config
/// directory.
pub fn discover() -> Option<PathBuf> {
    let local = DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists());
    if local.is_some() {
        return local;
    }

    let dirs = directories::ProjectDirs::from("", "", "sharpcheck")?;
    let global = dirs.config_dir().join(DEFAULT_CONFIG_NAMES[0]);
    global.exists().then_some(global)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.project_dir(), PathBuf::from("."));
        assert_eq!(
            config.artifact_path(),
            PathBuf::from(".")
                .join("target")
                .join("release")
                .join(format!("sharpcheck-analyzer{}", EXE_SUFFIX))
        );
        assert_eq!(
            config.staging_dir(),
            PathBuf::from(".").join(".sharpcheck").join("staging")
        );
        let build = config.build_command();
        assert_eq!(build.program, "cargo");
        assert_eq!(build.args, vec!["build", "--release", "--bin", "sharpcheck-analyzer"]);
    }

    #[test]
    fn test_parse_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sharpcheck.yaml");
        fs::write(
            &path,
            r#"
project_dir: /opt/analyzer
artifact: bin/analyzer
staging_dir: /tmp/staging
build:
  program: make
  args: [analyzer]
"#,
        )
        .unwrap();

        let config = AnalyzerConfig::parse_file(&path).unwrap();
        assert_eq!(config.artifact_path(), PathBuf::from("/opt/analyzer/bin/analyzer"));
        assert_eq!(config.staging_dir(), PathBuf::from("/tmp/staging"));
        assert_eq!(config.build_command().program, "make");
        assert_eq!(config.build_command().args, vec!["analyzer"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AnalyzerConfig = serde_yaml::from_str("project_dir: analyzer\n").unwrap();
        assert_eq!(
            config.staging_dir(),
            PathBuf::from("analyzer").join(".sharpcheck").join("staging")
        );
        assert_eq!(config.build_command(), BuildConfig::default());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = AnalyzerConfig::load(Some(Path::new("/no/such/sharpcheck.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
