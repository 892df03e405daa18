//! Compiler-level diagnostics produced by a tree provider.

use serde::{Deserialize, Serialize};

/// Diagnostic severity. `Hidden` findings never reach an analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
    Hidden,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "Error"),
            DiagnosticSeverity::Warning => write!(f, "Warning"),
            DiagnosticSeverity::Info => write!(f, "Info"),
            DiagnosticSeverity::Hidden => write!(f, "Hidden"),
        }
    }
}

impl std::str::FromStr for DiagnosticSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(DiagnosticSeverity::Error),
            "warning" => Ok(DiagnosticSeverity::Warning),
            "info" => Ok(DiagnosticSeverity::Info),
            "hidden" => Ok(DiagnosticSeverity::Hidden),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Source position of a diagnostic (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub file: String,
}

/// A single compiler finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: String,
    pub severity: DiagnosticSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub category: String,
}

impl Diagnostic {
    pub fn is_hidden(&self) -> bool {
        self.severity == DiagnosticSeverity::Hidden
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(
                f,
                "{}({},{}): {} {}: {}",
                loc.file, loc.line, loc.column, self.severity, self.id, self.message
            ),
            None => write!(f, "{} {}: {}", self.severity, self.id, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!("warning".parse(), Ok(DiagnosticSeverity::Warning));
        assert_eq!("Error".parse(), Ok(DiagnosticSeverity::Error));
        assert!("fatal".parse::<DiagnosticSeverity>().is_err());
    }

    #[test]
    fn test_display_with_location() {
        let d = Diagnostic {
            id: "SC1002".to_string(),
            severity: DiagnosticSeverity::Error,
            message: "';' expected".to_string(),
            location: Some(Location {
                line: 3,
                column: 14,
                file: "Program.cs".to_string(),
            }),
            category: "Syntax".to_string(),
        };
        assert_eq!(d.to_string(), "Program.cs(3,14): Error SC1002: ';' expected");
    }
}
