//! Analyzer orchestration: availability, build, and process-per-request
//! analysis.
//!
//! ```text
//!            status()                 build()
//!   NotBuilt ─────────▶ (artifact?) ◀──────── toolchain child process
//!      │                     │
//!      │ analyze()           │ Built
//!      ▼                     ▼
//!   NotBuilt error     stage ─▶ spawn ─▶ wait ─▶ release ─▶ parse
//! ```
//!
//! Every request maps to one child process. There is no concurrency cap or
//! timeout, and builds are not coordinated with in-flight analyses.

mod error;
mod staging;

pub use error::AnalyzerError;
pub use staging::StagedInput;

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use crate::analysis::DEFAULT_DISPLAY_NAME;
use crate::config::AnalyzerConfig;
use crate::result::AnalysisResult;

/// Whether the analyzer artifact is present. Re-derived on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    NotBuilt,
    Built,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::NotBuilt => write!(f, "not built"),
            Availability::Built => write!(f, "built"),
        }
    }
}

/// Outcome of a build. Failure to build is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub success: bool,
    /// Combined stdout and stderr of the toolchain.
    pub output: String,
}

/// What to analyze: inline source or an existing file, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    input: RequestInput,
    display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RequestInput {
    Source(String),
    File(PathBuf),
}

impl AnalysisRequest {
    /// Build a request from optional parts, rejecting neither-or-both.
    pub fn new(
        source_text: Option<String>,
        file_path: Option<PathBuf>,
        display_name: Option<String>,
    ) -> Result<Self, AnalyzerError> {
        let input = match (source_text, file_path) {
            (Some(source), None) => RequestInput::Source(source),
            (None, Some(path)) => RequestInput::File(path),
            (None, None) => {
                return Err(AnalyzerError::Validation(
                    "either source text or a file path is required".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(AnalyzerError::Validation(
                    "source text and file path are mutually exclusive".to_string(),
                ))
            }
        };
        Ok(Self {
            input,
            display_name,
        })
    }

    pub fn source<S: Into<String>>(source: S) -> Self {
        Self {
            input: RequestInput::Source(source.into()),
            display_name: None,
        }
    }

    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            input: RequestInput::File(path.into()),
            display_name: None,
        }
    }

    pub fn with_display_name<S: Into<String>>(mut self, name: S) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Drives the external analyzer.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: AnalyzerConfig,
}

impl Orchestrator {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Check for the compiled artifact. Never fails.
    pub fn status(&self) -> Availability {
        let artifact = self.config.artifact_path();
        let availability = if artifact.is_file() {
            Availability::Built
        } else {
            Availability::NotBuilt
        };
        tracing::debug!(artifact = %artifact.display(), %availability, "availability");
        availability
    }

    /// Run the build toolchain in the project directory.
    pub fn build(&self) -> BuildOutcome {
        let build = self.config.build_command();
        let project_dir = self.config.project_dir();
        tracing::info!(
            program = %build.program,
            args = ?build.args,
            dir = %project_dir.display(),
            "building analyzer"
        );

        let outcome = match Command::new(&build.program)
            .args(&build.args)
            .current_dir(&project_dir)
            .output()
        {
            Ok(output) => BuildOutcome {
                success: output.status.success(),
                output: combine_output(&output),
            },
            Err(e) => BuildOutcome {
                success: false,
                output: format!("failed to start `{}`: {}", build.program, e),
            },
        };

        tracing::info!(success = outcome.success, "build finished");
        outcome
    }

    /// Analyze one request in a fresh analyzer process.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzerError> {
        let artifact = self.config.artifact_path();
        if self.status() == Availability::NotBuilt {
            return Err(AnalyzerError::NotBuilt { artifact });
        }

        let (staged, display_name) = match &request.input {
            RequestInput::Source(source) => (
                StagedInput::ephemeral(&self.config.staging_dir(), source)?,
                Some(request.display_name().unwrap_or(DEFAULT_DISPLAY_NAME)),
            ),
            RequestInput::File(path) => {
                if !path.is_file() {
                    return Err(AnalyzerError::Validation(format!(
                        "{} is not an existing file",
                        path.display()
                    )));
                }
                (StagedInput::persistent(path.clone()), request.display_name())
            }
        };

        let mut command = Command::new(&artifact);
        command.arg(staged.path());
        if let Some(name) = display_name {
            command.arg("--display-name").arg(name);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(
            artifact = %artifact.display(),
            input = %staged.path().display(),
            "spawning analyzer"
        );
        let output = command.output();
        staged.release();

        let output = output.map_err(|source| AnalyzerError::Spawn {
            artifact: artifact.clone(),
            source,
        })?;
        tracing::debug!(status = ?output.status.code(), "analyzer exited");

        if !output.status.success() {
            return Err(AnalyzerError::ProcessExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let raw_output = String::from_utf8_lossy(&output.stdout).into_owned();
        AnalysisResult::from_json(&raw_output)
            .map_err(|source| AnalyzerError::ResultParse { raw_output, source })
    }
}

fn combine_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}
