//! Analysis pipeline run inside the analyzer process.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::analysis::{CSharpTreeProvider, TreeProvider, DEFAULT_DISPLAY_NAME};
use crate::metrics::Metrics;
use crate::result::AnalysisResult;
use crate::rules::{RuleContext, RuleRegistry};

/// Parse, measure, run rules, aggregate.
pub struct Engine {
    provider: Box<dyn TreeProvider>,
    registry: RuleRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(
            Box::new(CSharpTreeProvider::new()),
            RuleRegistry::with_default_rules(),
        )
    }
}

impl Engine {
    pub fn new(provider: Box<dyn TreeProvider>, registry: RuleRegistry) -> Self {
        Self { provider, registry }
    }

    /// Analyze one unit of source text.
    ///
    /// Broken source is not an error: its syntax problems come back as
    /// diagnostics alongside a best-effort result.
    pub fn analyze_source(
        &self,
        source: &str,
        display_name: Option<&str>,
    ) -> anyhow::Result<AnalysisResult> {
        let display_name = display_name.unwrap_or(DEFAULT_DISPLAY_NAME);
        let unit = self
            .provider
            .parse(source, display_name)
            .with_context(|| format!("Failed to parse {}", display_name))?;

        let metrics = Metrics::compute(&unit.tree);
        let groups = self.registry.run(&RuleContext {
            tree: &unit.tree,
            diagnostics: &unit.diagnostics,
        });
        tracing::debug!(
            language = self.provider.language_id(),
            file = display_name,
            diagnostics = unit.diagnostics.len(),
            suggestions = groups.len(),
            "analysis complete"
        );

        Ok(AnalysisResult::aggregate(unit.diagnostics, metrics, groups))
    }

    /// Analyze a file. Without an explicit display name the file's own path
    /// is used in diagnostic locations.
    pub fn analyze_file(
        &self,
        path: &Path,
        display_name: Option<&str>,
    ) -> anyhow::Result<AnalysisResult> {
        let handled = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.provider.handles_extension(e));
        if !handled {
            tracing::warn!(path = %path.display(), "unexpected file extension, analyzing anyway");
        }
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        // Legacy encodings are decoded lossily; positions stay usable.
        let source = String::from_utf8_lossy(&bytes);
        let fallback = path.display().to_string();
        self.analyze_source(&source, Some(display_name.unwrap_or(&fallback)))
    }

    /// Analyze the analyzer process's positional input: an existing path is
    /// read as a file, anything else is taken as literal source text.
    pub fn analyze_input(
        &self,
        input: &str,
        display_name: Option<&str>,
    ) -> anyhow::Result<AnalysisResult> {
        let path = Path::new(input);
        if path.exists() {
            self.analyze_file(path, display_name)
        } else {
            self.analyze_source(input, display_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_two_ifs_complexity() {
        let result = Engine::default()
            .analyze_source(
                "public class A { public void M(){ if(true){} if(false){} } }",
                None,
            )
            .unwrap();
        assert_eq!(result.metrics.class_count, 1);
        assert_eq!(result.metrics.method_count, 1);
        assert_eq!(result.metrics.cyclomatic_complexity, 3);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_broken_source_still_yields_result() {
        let result = Engine::default()
            .analyze_source("class A { void M( { }", Some("Broken.cs"))
            .unwrap();
        assert!(result.error_count() > 0);
        let loc = result.diagnostics[0].location.as_ref().unwrap();
        assert_eq!(loc.file, "Broken.cs");
        assert!(result.metrics.cyclomatic_complexity >= 1);
    }

    #[test]
    fn test_input_as_path_or_text() {
        let mut file = tempfile::Builder::new().suffix(".cs").tempfile().unwrap();
        write!(file, "class A {{}}\nclass B {{}}\n").unwrap();
        let engine = Engine::default();

        let from_path = engine
            .analyze_input(file.path().to_str().unwrap(), None)
            .unwrap();
        assert_eq!(from_path.metrics.class_count, 2);

        let from_text = engine.analyze_input("class C {}", None).unwrap();
        assert_eq!(from_text.metrics.class_count, 1);
    }

    #[test]
    fn test_non_utf8_file_is_analyzed() {
        let mut file = tempfile::Builder::new().suffix(".cs").tempfile().unwrap();
        // 0xE9 is Latin-1 e-acute and not valid UTF-8 on its own.
        file.write_all(b"// Caf\xE9\nclass Menu { string M() { if (true) {} return \"Caf\xE9\"; } }\n")
            .unwrap();

        let result = Engine::default().analyze_file(file.path(), Some("Latin.cs")).unwrap();
        assert_eq!(result.metrics.class_count, 1);
        assert_eq!(result.metrics.method_count, 1);
        assert_eq!(result.metrics.cyclomatic_complexity, 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Engine::default()
            .analyze_file(Path::new("/definitely/not/here.cs"), None)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
