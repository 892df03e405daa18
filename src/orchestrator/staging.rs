//! Input staging for the analyzer process.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::AnalyzerError;

/// Path handed to the analyzer for one request.
///
/// Inline source is written to a uniquely named file that is removed when
/// the value is released or dropped; a caller's own file is used as is.
#[derive(Debug)]
pub enum StagedInput {
    Ephemeral(NamedTempFile),
    Persistent(PathBuf),
}

impl StagedInput {
    /// Write `source` to a fresh `sharpcheck-*.cs` file in `dir`.
    pub fn ephemeral(dir: &Path, source: &str) -> Result<Self, AnalyzerError> {
        let staging_err = |source| AnalyzerError::Staging {
            dir: dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(dir).map_err(staging_err)?;
        let mut file = tempfile::Builder::new()
            .prefix("sharpcheck-")
            .suffix(".cs")
            .tempfile_in(dir)
            .map_err(staging_err)?;
        file.write_all(source.as_bytes()).map_err(staging_err)?;
        file.flush().map_err(staging_err)?;

        tracing::debug!(path = %file.path().display(), bytes = source.len(), "staged source");
        Ok(StagedInput::Ephemeral(file))
    }

    pub fn persistent(path: PathBuf) -> Self {
        StagedInput::Persistent(path)
    }

    pub fn path(&self) -> &Path {
        match self {
            StagedInput::Ephemeral(file) => file.path(),
            StagedInput::Persistent(path) => path,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, StagedInput::Ephemeral(_))
    }

    /// Delete an ephemeral file now. Failures are logged, not returned.
    pub fn release(self) {
        if let StagedInput::Ephemeral(file) = self {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove staged source");
            }
        }
    }
}
