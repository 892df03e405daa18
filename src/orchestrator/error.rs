//! Typed orchestrator failures.

use std::path::PathBuf;

use thiserror::Error;

/// Every way an analysis request can fail. None of these is fatal to the
/// hosting process.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("analyzer is not built (expected at {})", .artifact.display())]
    NotBuilt { artifact: PathBuf },

    #[error("failed to start analyzer {}: {source}", .artifact.display())]
    Spawn {
        artifact: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("analyzer exited with {}: {}", exit_label(.code), .stderr.trim())]
    ProcessExit { code: Option<i32>, stderr: String },

    #[error("analyzer output is not a valid result: {source}")]
    ResultParse {
        raw_output: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("failed to stage source in {}: {source}", .dir.display())]
    Staging {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl AnalyzerError {
    /// What the caller can do about it.
    pub fn remediation_hint(&self) -> &'static str {
        match self {
            AnalyzerError::NotBuilt { .. } => "Run `sharpcheck build` first.",
            AnalyzerError::Spawn { .. } => {
                "Check that the analyzer artifact exists and is executable, or rebuild it with `sharpcheck build`."
            }
            AnalyzerError::ProcessExit { .. } => {
                "Check the analyzer's error output above; the input may be unreadable."
            }
            AnalyzerError::ResultParse { .. } => {
                "The analyzer may be out of date. Rebuild it with `sharpcheck build`."
            }
            AnalyzerError::Validation(_) => "Provide either source text or the path of an existing file, not both.",
            AnalyzerError::Staging { .. } => {
                "Check that the staging directory is writable (see `staging_dir` in sharpcheck.yaml)."
            }
        }
    }
}
