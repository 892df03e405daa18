//! Tree provider seam: parses source text into a generic syntax tree plus
//! compiler diagnostics.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source Text     │────▶│ TreeProvider │────▶│ ParsedUnit    │
//! └─────────────────┘     │ (C#)         │     │ (SyntaxTree,  │
//!                         └──────────────┘     │  Diagnostics) │
//!                                              └───────────────┘
//!                                                      │
//!                                                      ▼
//!                         ┌──────────────┐     ┌───────────────┐
//!                         │ Rule         │◀────│ Metrics       │
//!                         │ Registry     │     │ Calculator    │
//!                         └──────────────┘     └───────────────┘
//! ```
//!
//! Metrics and rules only ever see [`SyntaxTree`] and [`Diagnostic`]; the
//! grammar behind a provider is opaque to them.

mod csharp;
mod diagnostics;
mod syntax;
mod traits;

pub use csharp::{CSharpTreeProvider, MISSING_TOKEN_ID, UNEXPECTED_SYNTAX_ID};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Location};
pub use syntax::{Descendants, Span, SyntaxKind, SyntaxNode, SyntaxTree};
pub use traits::{ParsedUnit, TreeProvider, DEFAULT_DISPLAY_NAME};
