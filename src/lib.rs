//! Sharpcheck - static analysis for C# source units.
//!
//! Given one unit of C# source, sharpcheck reports compiler-level syntax
//! diagnostics, structural metrics (classes, methods, non-blank lines,
//! cyclomatic complexity), and heuristic suggestions grouped by concern:
//! style, security, performance, and LINQ usage.
//!
//! # Architecture
//!
//! Analysis runs in a separate analyzer process (`sharpcheck-analyzer`) so a
//! host can stay isolated from it:
//!
//! - `analysis`: tree provider seam and the tree-sitter C# provider
//! - `metrics`: structural counts and cyclomatic complexity
//! - `rules`: rule registry and built-in textual heuristics
//! - `result`: aggregated result and its JSON wire form
//! - `engine`: parse, measure, run rules, aggregate (inside the analyzer)
//! - `orchestrator`: availability, build, staging, and spawning the analyzer
//! - `config`: orchestrator configuration (YAML)
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a Rule
//!
//! Write a `fn(&RuleContext) -> Vec<String>` and register it with
//! [`RuleRegistry::register`]; existing rules are untouched.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod result;
pub mod rules;

pub use analysis::{
    CSharpTreeProvider, Diagnostic, DiagnosticSeverity, Location, ParsedUnit, SyntaxKind,
    SyntaxNode, SyntaxTree, TreeProvider,
};
pub use config::AnalyzerConfig;
pub use engine::Engine;
pub use metrics::Metrics;
pub use orchestrator::{
    AnalysisRequest, AnalyzerError, Availability, BuildOutcome, Orchestrator,
};
pub use result::AnalysisResult;
pub use rules::{Rule, RuleCategory, RuleContext, RuleRegistry, SuggestionGroups};
