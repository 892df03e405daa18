//! Textual helpers shared by detectors.
//!
//! Detectors match on the verbatim text of subtrees rather than on resolved
//! symbols, so these helpers stay deliberately shallow.

use crate::analysis::{SyntaxKind, SyntaxNode};

/// Callee of an invocation (`items.Where` in `items.Where(p)`).
pub fn callee(invocation: &SyntaxNode) -> Option<&SyntaxNode> {
    invocation
        .field("function")
        .or_else(|| invocation.children.first())
}

/// Argument list of an invocation, parentheses included.
pub fn arguments(invocation: &SyntaxNode) -> Option<&SyntaxNode> {
    invocation
        .field("arguments")
        .or_else(|| invocation.children.last())
}

/// Initializer expression of a variable declarator, if any.
pub fn initializer(declarator: &SyntaxNode) -> Option<&SyntaxNode> {
    if let Some(clause) = declarator
        .children
        .iter()
        .find(|c| c.grammar_kind == "equals_value_clause")
    {
        return clause.children.first();
    }
    declarator
        .children
        .iter()
        .skip(1)
        .filter(|c| c.grammar_kind != "bracketed_argument_list")
        .last()
}

/// String literal or interpolated string.
pub fn is_string_like(node: &SyntaxNode) -> bool {
    matches!(
        node.kind,
        SyntaxKind::StringLiteral | SyntaxKind::InterpolatedString
    )
}

/// Operands of a `+` chain, flattened left to right.
pub fn concat_operands(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    let mut out = Vec::new();
    collect_operands(node, &mut out);
    out
}

fn collect_operands<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxNode>) {
    if node.kind != SyntaxKind::AddExpression {
        out.push(node);
        return;
    }
    for operand in [node.left(), node.right()].into_iter().flatten() {
        collect_operands(operand, out);
    }
}

/// A `+` chain with at least one string literal operand.
pub fn is_string_concatenation(node: &SyntaxNode) -> bool {
    node.kind == SyntaxKind::AddExpression
        && concat_operands(node).into_iter().any(is_string_like)
}

/// Trimmed text ends with any of the suffixes.
pub fn ends_with_any(text: &str, suffixes: &[&str]) -> bool {
    let text = text.trim_end();
    suffixes.iter().any(|s| text.ends_with(s))
}

/// Total occurrences of all needles in `text`.
pub fn count_occurrences(text: &str, needles: &[&str]) -> usize {
    needles.iter().map(|n| text.matches(n).count()).sum()
}

/// Whether a lambda's body just returns its single parameter (`x => x`).
pub fn is_identity_lambda(text: &str) -> bool {
    let Some((param, body)) = text.split_once("=>") else {
        return false;
    };
    let param = param.trim().trim_start_matches('(').trim_end_matches(')').trim();
    let body = body.trim();
    !param.is_empty()
        && param == body
        && param.chars().all(|c| c.is_alphanumeric() || c == '_')
}
