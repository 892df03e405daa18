//! Output formatting for sharpcheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the analyzer's wire document, for programmatic consumption

use colored::*;

use crate::analysis::{Diagnostic, DiagnosticSeverity};
use crate::orchestrator::{AnalyzerError, Availability, BuildOutcome};
use crate::result::AnalysisResult;
use crate::rules::RuleCategory;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format '{}' (expected pretty or json)", s)),
        }
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Write a result as its wire document.
pub fn write_json(result: &AnalysisResult) -> anyhow::Result<()> {
    println!("{}", result.to_json()?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write a result in pretty (human-readable) format.
pub fn write_pretty(target: &str, result: &AnalysisResult) {
    write_header();

    print!("  {}", "Analyzed: ".dimmed());
    println!("{}", target);
    println!();

    let m = &result.metrics;
    println!(
        "  Classes: {}  Methods: {}  Lines: {}  Complexity: {}",
        m.class_count.to_string().bold(),
        m.method_count.to_string().bold(),
        m.line_count.to_string().bold(),
        colored_complexity(m.cyclomatic_complexity)
    );
    println!();

    if !result.diagnostics.is_empty() {
        write_diagnostics(&result.diagnostics);
        println!();
    }

    if !result.suggestions.is_empty() {
        write_suggestions(&result.suggestions);
        println!();
    }

    if result.diagnostics.is_empty() && result.suggestions.is_empty() {
        println!("  {}", "✓ No findings".green());
        println!();
    }
}

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "sharpcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn colored_complexity(c: usize) -> ColoredString {
    match c {
        c if c <= 10 => c.to_string().green(),
        c if c <= 20 => c.to_string().yellow(),
        _ => c.to_string().red(),
    }
}

fn write_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  {} ({}):", "Diagnostics".bold(), diagnostics.len());
    println!();

    for d in diagnostics {
        write_severity_tag(d.severity);
        print!("   ");
        print!("{:<10}", d.id.as_str().dimmed());
        if let Some(loc) = &d.location {
            print!("{}", loc.file.blue());
            print!("{}", format!(":{}:{}", loc.line, loc.column).dimmed());
        }
        println!();
        println!("            {}", d.message);
        println!();
    }
}

fn write_severity_tag(severity: DiagnosticSeverity) {
    match severity {
        DiagnosticSeverity::Error => print!("    {} ", "ERROR".red()),
        DiagnosticSeverity::Warning => print!("    {} ", "WARN ".yellow()),
        DiagnosticSeverity::Info | DiagnosticSeverity::Hidden => {
            print!("    {} ", "INFO ".blue())
        }
    }
}

fn write_suggestions(suggestions: &[String]) {
    println!("  {} ({}):", "Suggestions".bold(), suggestions.len());
    println!();

    for s in suggestions {
        let category = RuleCategory::of_suggestion(s);
        let tag = format!("{:<12}", category.as_str());
        let tag = match category {
            RuleCategory::Basic => tag.normal(),
            RuleCategory::Security => tag.red(),
            RuleCategory::Performance => tag.yellow(),
            RuleCategory::Linq => tag.blue(),
        };
        println!("    {} {}", tag, strip_prefix(s, category));
    }
}

/// Suggestion text without its category prefix; the tag already says it.
fn strip_prefix(suggestion: &str, category: RuleCategory) -> &str {
    category
        .prefix()
        .and_then(|p| suggestion.strip_prefix(p))
        .map(str::trim_start)
        .unwrap_or(suggestion)
}

// =============================================================================
// Orchestrator status
// =============================================================================

pub fn write_status(availability: Availability, artifact: &str) {
    match availability {
        Availability::Built => {
            println!("  {} analyzer is built", "✓".green());
        }
        Availability::NotBuilt => {
            println!("  {} analyzer is not built", "✗".red());
            println!("    {}", "run `sharpcheck build` to build it".dimmed());
        }
    }
    println!("    {}", format!("artifact: {}", artifact).dimmed());
}

pub fn write_build_outcome(outcome: &BuildOutcome) {
    if !outcome.output.trim().is_empty() {
        for line in outcome.output.lines() {
            println!("    {}", line.dimmed());
        }
        println!();
    }
    if outcome.success {
        println!("  {}", "✓ Build succeeded".green());
    } else {
        println!("  {}", "✗ Build failed".red());
    }
}

/// Render an orchestrator failure with its remediation hint on stderr.
pub fn write_error(err: &AnalyzerError) {
    eprintln!("{} {}", "Error:".red().bold(), err);
    match err {
        AnalyzerError::ProcessExit { stderr, .. } if !stderr.trim().is_empty() => {
            eprintln!();
            for line in stderr.lines() {
                eprintln!("    {}", line.dimmed());
            }
        }
        AnalyzerError::ResultParse { raw_output, .. } => {
            eprintln!();
            eprintln!("  {}", "Raw analyzer output:".dimmed());
            for line in raw_output.lines() {
                eprintln!("    {}", line.dimmed());
            }
        }
        _ => {}
    }
    eprintln!("{} {}", "Hint:".yellow(), err.remediation_hint());
}
