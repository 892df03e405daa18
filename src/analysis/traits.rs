//! Core traits for tree providers.

use super::{Diagnostic, SyntaxTree};

/// Display name used when the caller supplies none.
pub const DEFAULT_DISPLAY_NAME: &str = "input.cs";

/// Output of a provider: the syntax tree plus compiler diagnostics.
///
/// Both live only for the duration of one analysis.
pub struct ParsedUnit {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses source text of the analyzed language.
///
/// Implementations must return a tree even for syntactically broken input,
/// describing the breakage as diagnostics. An `Err` is reserved for the
/// provider itself failing (e.g. the grammar could not be loaded).
///
/// # Thread Safety
///
/// Note: tree_sitter::Parser is not Sync, so implementations should
/// create parsers as needed.
pub trait TreeProvider: Send + Sync {
    /// Returns the language identifier (e.g., "csharp").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this provider handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a unit. `display_name` is used only in diagnostic locations.
    fn parse(&self, source: &str, display_name: &str) -> anyhow::Result<ParsedUnit>;

    /// Check if this provider handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
