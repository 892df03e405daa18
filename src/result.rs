//! Analysis result: the wire contract between the analyzer process and its
//! callers.

use serde::{Deserialize, Serialize};

use crate::analysis::Diagnostic;
use crate::metrics::Metrics;
use crate::rules::SuggestionGroups;

/// Everything one analysis produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: Metrics,
    /// Ordered basic, security, performance, linq.
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Merge the outputs of one analysis. Hidden diagnostics are dropped.
    pub fn aggregate(
        diagnostics: Vec<Diagnostic>,
        metrics: Metrics,
        suggestions: SuggestionGroups,
    ) -> Self {
        Self {
            diagnostics: diagnostics.into_iter().filter(|d| !d.is_hidden()).collect(),
            metrics,
            suggestions: suggestions.into_ordered(),
        }
    }

    /// Serialize to the canonical JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse the canonical JSON form.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == crate::analysis::DiagnosticSeverity::Error)
            .count()
    }
}
