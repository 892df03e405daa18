//! Basic/style rules, evaluated per declaration.

use crate::analysis::{SyntaxKind, SyntaxNode};
use crate::metrics::complexity_of;

use super::{Rule, RuleCategory, RuleContext};

/// Methods whose block body spans more lines than this are flagged.
pub const MAX_METHOD_LINES: usize = 50;
/// Classes with more members than this are flagged.
pub const MAX_CLASS_MEMBERS: usize = 20;
/// Methods with higher cyclomatic complexity than this are flagged.
pub const MAX_METHOD_COMPLEXITY: usize = 10;

pub static RULES: &[Rule] = &[
    Rule {
        id: "long-method",
        category: RuleCategory::Basic,
        detect: detect_long_methods,
    },
    Rule {
        id: "missing-doc",
        category: RuleCategory::Basic,
        detect: detect_missing_docs,
    },
    Rule {
        id: "async-naming",
        category: RuleCategory::Basic,
        detect: detect_async_naming,
    },
    Rule {
        id: "large-class",
        category: RuleCategory::Basic,
        detect: detect_large_classes,
    },
    Rule {
        id: "high-complexity",
        category: RuleCategory::Basic,
        detect: detect_high_complexity,
    },
];

fn methods<'a>(ctx: &RuleContext<'a>) -> impl Iterator<Item = &'a SyntaxNode> {
    ctx.tree.nodes_of_kind(SyntaxKind::MethodDeclaration)
}

fn method_name(method: &SyntaxNode) -> &str {
    method.name().unwrap_or("<anonymous>")
}

fn block_body(method: &SyntaxNode) -> Option<&SyntaxNode> {
    method
        .field("body")
        .filter(|b| b.kind == SyntaxKind::Block)
        .or_else(|| method.child_of_kind(SyntaxKind::Block))
}

fn detect_long_methods(ctx: &RuleContext<'_>) -> Vec<String> {
    methods(ctx)
        .filter_map(|m| {
            let lines = block_body(m)?.span.line_count();
            (lines > MAX_METHOD_LINES).then(|| {
                format!(
                    "Method '{}' is {} lines long (more than {}). Consider breaking it into smaller methods.",
                    method_name(m),
                    lines,
                    MAX_METHOD_LINES
                )
            })
        })
        .collect()
}

fn is_doc_comment(comment: &str) -> bool {
    let c = comment.trim_start();
    c.starts_with("///") || c.starts_with("/**")
}

fn detect_missing_docs(ctx: &RuleContext<'_>) -> Vec<String> {
    methods(ctx)
        .filter(|m| m.has_modifier("public"))
        .filter(|m| !m.leading_comments.iter().any(|c| is_doc_comment(c)))
        .map(|m| {
            format!(
                "Public method '{}' is missing XML documentation.",
                method_name(m)
            )
        })
        .collect()
}

fn detect_async_naming(ctx: &RuleContext<'_>) -> Vec<String> {
    methods(ctx)
        .filter(|m| m.has_modifier("async"))
        .filter(|m| !method_name(m).ends_with("Async"))
        .map(|m| {
            format!(
                "Async method '{}' should have the 'Async' suffix.",
                method_name(m)
            )
        })
        .collect()
}

fn detect_large_classes(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::ClassDeclaration)
        .filter_map(|class| {
            let body = class
                .field("body")
                .or_else(|| class.child_of_kind(SyntaxKind::DeclarationList))?;
            let members = body.children.len();
            (members > MAX_CLASS_MEMBERS).then(|| {
                format!(
                    "Class '{}' has {} members (more than {}). Consider splitting it into smaller classes.",
                    class.name().unwrap_or("<anonymous>"),
                    members,
                    MAX_CLASS_MEMBERS
                )
            })
        })
        .collect()
}

fn detect_high_complexity(ctx: &RuleContext<'_>) -> Vec<String> {
    methods(ctx)
        .filter_map(|m| {
            let complexity = complexity_of(m);
            (complexity > MAX_METHOD_COMPLEXITY).then(|| {
                format!(
                    "Method '{}' has high cyclomatic complexity ({}). Consider simplifying it.",
                    method_name(m),
                    complexity
                )
            })
        })
        .collect()
}
