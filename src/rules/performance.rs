//! Performance heuristics.

use crate::analysis::{SyntaxKind, SyntaxNode};

use super::text::{callee, count_occurrences, ends_with_any, initializer, is_string_like};
use super::{Rule, RuleCategory, RuleContext};

/// Invocations inspected after a `.ToList()` call.
pub const MATERIALIZE_LOOKAHEAD: usize = 3;
/// Query operators tolerated in one invocation chain.
pub const MAX_CHAINED_OPERATORS: usize = 3;

const DEFERRED_OPERATORS: &[&str] = &[".Where(", ".Select(", ".OrderBy("];
const MATERIALIZERS: &[&str] = &[".ToList()", ".ToArray()"];
const CHAINED_OPERATORS: &[&str] = &[".Where(", ".Select(", ".OrderBy(", ".GroupBy("];
const FORMAT_HELPERS: &[&str] = &["string.Format", "String.Format", "string.Concat", "String.Concat"];

pub static RULES: &[Rule] = &[
    Rule {
        id: "string-concat-in-loop",
        category: RuleCategory::Performance,
        detect: detect_concat_in_loop,
    },
    Rule {
        id: "materialize-before-count",
        category: RuleCategory::Performance,
        detect: detect_materialize_before_count,
    },
    Rule {
        id: "deferred-query-variable",
        category: RuleCategory::Performance,
        detect: detect_deferred_queries,
    },
    Rule {
        id: "format-helper",
        category: RuleCategory::Performance,
        detect: detect_format_helpers,
    },
    Rule {
        id: "missing-configure-await",
        category: RuleCategory::Performance,
        detect: detect_missing_configure_await,
    },
    Rule {
        id: "excessive-chaining",
        category: RuleCategory::Performance,
        detect: detect_excessive_chaining,
    },
];

fn looks_like_string(operand: &SyntaxNode) -> bool {
    is_string_like(operand) || operand.text().trim_end().ends_with(".ToString()")
}

/// Stops at the first loop with a match.
fn detect_concat_in_loop(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .descendants()
        .filter(|n| n.kind.is_loop())
        .find_map(|lp| {
            lp.descendants_of_kind(SyntaxKind::AddExpression)
                .find(|add| {
                    [add.left(), add.right()]
                        .into_iter()
                        .flatten()
                        .any(looks_like_string)
                })
                .map(|add| add.span.start_line)
        })
        .map(|line| {
            format!(
                "PERFORMANCE: String concatenation inside a loop at line {}. Use StringBuilder instead.",
                line
            )
        })
        .into_iter()
        .collect()
}

fn detect_materialize_before_count(ctx: &RuleContext<'_>) -> Vec<String> {
    let invocations: Vec<&SyntaxNode> = ctx
        .tree
        .nodes_of_kind(SyntaxKind::InvocationExpression)
        .collect();

    let hit = invocations.iter().enumerate().any(|(i, inv)| {
        inv.text().contains(".ToList()")
            && invocations
                .iter()
                .skip(i + 1)
                .take(MATERIALIZE_LOOKAHEAD)
                .any(|next| next.text().contains(".Count") || next.text().contains(".Any()"))
    });

    if hit {
        vec!["PERFORMANCE: ToList() followed by Count/Any() materializes the whole sequence. Call Any() or Count() on the query directly.".to_string()]
    } else {
        Vec::new()
    }
}

/// One suggestion per variable.
fn detect_deferred_queries(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::VariableDeclarator)
        .filter_map(|decl| {
            let init = initializer(decl)?;
            let text = init.text();
            let deferred = init.kind == SyntaxKind::InvocationExpression
                && DEFERRED_OPERATORS.iter().any(|op| text.contains(op))
                && !ends_with_any(text, MATERIALIZERS);
            deferred.then(|| {
                format!(
                    "PERFORMANCE: Query assigned to '{}' is not materialized and runs again on every enumeration. Consider ToList() or ToArray().",
                    decl.name().unwrap_or("<anonymous>")
                )
            })
        })
        .collect()
}

fn detect_format_helpers(ctx: &RuleContext<'_>) -> Vec<String> {
    let found = ctx
        .tree
        .nodes_of_kind(SyntaxKind::InvocationExpression)
        .filter_map(callee)
        .any(|c| FORMAT_HELPERS.contains(&c.text().trim()));

    if found {
        vec!["PERFORMANCE: Prefer string interpolation ($\"...\") over string.Format/string.Concat.".to_string()]
    } else {
        Vec::new()
    }
}

fn detect_missing_configure_await(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::AwaitExpression)
        .find(|n| !n.text().contains("ConfigureAwait"))
        .map(|n| {
            format!(
                "PERFORMANCE: Await at line {} has no ConfigureAwait(false). Library code should avoid capturing the synchronization context.",
                n.span.start_line
            )
        })
        .into_iter()
        .collect()
}

fn detect_excessive_chaining(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::InvocationExpression)
        .map(|n| count_occurrences(n.text(), CHAINED_OPERATORS))
        .find(|&count| count > MAX_CHAINED_OPERATORS)
        .map(|count| {
            format!(
                "PERFORMANCE: Query chains {} operators. Consider combining predicates or splitting the query.",
                count
            )
        })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run_rule;

    #[test]
    fn test_concat_in_loop_reported_once() {
        let source = r#"
class A
{
    string Join(string[] xs)
    {
        string s = "";
        foreach (var x in xs) { s = s + "," + x; }
        for (int i = 0; i < 3; i++) { s = s + i.ToString(); }
        return s;
    }
}
"#;
        let found = run_rule(detect_concat_in_loop, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("line 7"));
    }

    #[test]
    fn test_concat_with_to_string_in_loop() {
        let source = r#"
class A
{
    string Digits()
    {
        string s = null;
        for (int i = 0; i < 3; i++) { s = s + i.ToString(); }
        return s;
    }
}
"#;
        let found = run_rule(detect_concat_in_loop, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("line 7"));
    }

    #[test]
    fn test_numeric_add_in_loop_ignored() {
        let source = "class A { void M() { int t = 0; while (t < 10) { t = t + 1; } var s = \"a\" + t; } }";
        assert!(run_rule(detect_concat_in_loop, source).is_empty());
    }

    #[test]
    fn test_materialize_before_count() {
        let source = r#"
class A
{
    void M(IEnumerable<int> items)
    {
        var list = items.ToList();
        Log("x");
        if (list.Any()) { }
    }
}
"#;
        assert_eq!(run_rule(detect_materialize_before_count, source).len(), 1);
    }

    #[test]
    fn test_materialize_outside_window() {
        let source = r#"
class A
{
    void M(IEnumerable<int> items)
    {
        var list = items.ToList();
        A(); B(); C();
        if (list.Any()) { }
    }
}
"#;
        assert!(run_rule(detect_materialize_before_count, source).is_empty());
    }

    #[test]
    fn test_deferred_query_per_variable() {
        let source = r#"
class A
{
    void M(List<int> xs)
    {
        var evens = xs.Where(x => x % 2 == 0);
        var names = xs.Select(x => x.ToString());
        var done = xs.Where(x => x > 1).ToList();
    }
}
"#;
        let found = run_rule(detect_deferred_queries, source);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("'evens'"));
        assert!(found[1].contains("'names'"));
    }

    #[test]
    fn test_format_helper_fires_once() {
        let source = r#"class A { void M() { var a = string.Format("{0}", 1); var b = String.Concat("a", "b"); } }"#;
        assert_eq!(run_rule(detect_format_helpers, source).len(), 1);
    }

    #[test]
    fn test_missing_configure_await() {
        let source = r#"
class A
{
    async Task RunAsync()
    {
        await LoadAsync().ConfigureAwait(false);
        await SaveAsync();
        await Task.Delay(1);
    }
}
"#;
        let found = run_rule(detect_missing_configure_await, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("line 7"));
    }

    #[test]
    fn test_excessive_chaining() {
        let source = "class A { void M() { var q = xs.Where(a).Select(b).Where(c).OrderBy(d).ToList(); var r = xs.Where(a).Select(b); } }";
        let found = run_rule(detect_excessive_chaining, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("chains 4 operators"));
    }
}
