//! Query-optimization heuristics. Each rule reports at most once per unit.

use crate::analysis::{SyntaxKind, SyntaxNode};

use super::text::{arguments, callee, ends_with_any, initializer, is_identity_lambda};
use super::{Rule, RuleCategory, RuleContext};

/// Query expressions longer than this, bound to a variable, are flagged.
pub const MAX_QUERY_LENGTH: usize = 100;

const FIRST_CALLS: &[&str] = &[".First()", ".FirstOrDefault()"];
const SORT_OPERATORS: &[&str] = &[".OrderBy(", ".OrderByDescending("];
const EAGER_THEN_FILTER: &[&str] = &[".ToList().Where(", ".ToArray().Where("];

pub static RULES: &[Rule] = &[
    Rule {
        id: "count-compared-to-zero",
        category: RuleCategory::Linq,
        detect: detect_count_compared_to_zero,
    },
    Rule {
        id: "where-then-count",
        category: RuleCategory::Linq,
        detect: detect_where_then_count,
    },
    Rule {
        id: "where-then-any",
        category: RuleCategory::Linq,
        detect: detect_where_then_any,
    },
    Rule {
        id: "where-then-first",
        category: RuleCategory::Linq,
        detect: detect_where_then_first,
    },
    Rule {
        id: "identity-select",
        category: RuleCategory::Linq,
        detect: detect_identity_select,
    },
    Rule {
        id: "sort-then-first",
        category: RuleCategory::Linq,
        detect: detect_sort_then_first,
    },
    Rule {
        id: "materialize-then-filter",
        category: RuleCategory::Linq,
        detect: detect_materialize_then_filter,
    },
    Rule {
        id: "long-query-expression",
        category: RuleCategory::Linq,
        detect: detect_long_query_expressions,
    },
];

fn first_invocation<'a, F>(ctx: &RuleContext<'a>, pred: F) -> Option<&'a SyntaxNode>
where
    F: Fn(&SyntaxNode) -> bool,
{
    ctx.tree
        .nodes_of_kind(SyntaxKind::InvocationExpression)
        .find(|n| pred(*n))
}

fn report(found: Option<&SyntaxNode>, message: &str) -> Vec<String> {
    found
        .map(|n| format!("LINQ: {} (line {})", message, n.span.start_line))
        .into_iter()
        .collect()
}

fn is_zero_comparison(node: &SyntaxNode) -> bool {
    let comparison = matches!(
        node.kind,
        SyntaxKind::GreaterThanExpression
            | SyntaxKind::NotEqualsExpression
            | SyntaxKind::EqualsExpression
    );
    let (Some(left), Some(right)) = (node.left(), node.right()) else {
        return false;
    };
    comparison
        && left.kind == SyntaxKind::InvocationExpression
        && callee(left).is_some_and(|c| c.text().trim_end().ends_with(".Count"))
        && right.text().trim() == "0"
}

fn detect_count_compared_to_zero(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = ctx.tree.descendants().find(|n| is_zero_comparison(n));
    report(found, "Use Any() instead of comparing Count() with 0")
}

fn where_then(node: &SyntaxNode, suffixes: &[&str]) -> bool {
    node.text().contains(".Where(") && ends_with_any(node.text(), suffixes)
}

fn detect_where_then_count(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = first_invocation(ctx, |n| where_then(n, &[".Count()"]));
    report(found, "Use Count(predicate) instead of Where(predicate).Count()")
}

fn detect_where_then_any(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = first_invocation(ctx, |n| where_then(n, &[".Any()"]));
    report(found, "Use Any(predicate) instead of Where(predicate).Any()")
}

fn detect_where_then_first(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = first_invocation(ctx, |n| where_then(n, FIRST_CALLS));
    report(found, "Use First(predicate) instead of Where(predicate).First()")
}

fn is_identity_select(node: &SyntaxNode) -> bool {
    let selects = callee(node).is_some_and(|c| c.text().trim_end().ends_with(".Select"));
    selects
        && arguments(node).is_some_and(|args| {
            let inner = args.text().trim().trim_start_matches('(').trim_end_matches(')');
            is_identity_lambda(inner)
        })
}

fn detect_identity_select(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = first_invocation(ctx, is_identity_select);
    report(found, "Select(x => x) is redundant and can be removed")
}

fn detect_sort_then_first(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = first_invocation(ctx, |n| {
        SORT_OPERATORS.iter().any(|op| n.text().contains(op)) && ends_with_any(n.text(), FIRST_CALLS)
    });
    report(
        found,
        "Use MinBy()/MaxBy() instead of sorting to take the first element",
    )
}

fn detect_materialize_then_filter(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = first_invocation(ctx, |n| {
        EAGER_THEN_FILTER.iter().any(|p| n.text().contains(p))
    });
    report(found, "Filter with Where() before materializing with ToList()/ToArray()")
}

fn detect_long_query_expressions(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::VariableDeclarator)
        .find(|decl| {
            initializer(decl).is_some_and(|init| {
                init.kind == SyntaxKind::QueryExpression && init.text().len() > MAX_QUERY_LENGTH
            })
        })
        .map(|decl| {
            format!(
                "LINQ: Long query expression assigned to '{}' may be enumerated multiple times. Consider materializing it once.",
                decl.name().unwrap_or("<anonymous>")
            )
        })
        .into_iter()
        .collect()
}
