//! Security heuristics over the text of subtrees (case-insensitive).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{SyntaxKind, SyntaxNode};

use super::text::{callee, initializer, is_string_concatenation};
use super::{Rule, RuleCategory, RuleContext};

static SQL_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)select|insert|update|delete").expect("valid regex"));

static SECRET_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)password|secret|apikey").expect("valid regex"));

static SECRET_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)password|secret|apikey|connectionstring").expect("valid regex")
});

static UNSAFE_FILE_OP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)File\.Delete|File\.Move|Directory\.Delete|File\.WriteAllText")
        .expect("valid regex")
});

const GENERAL_EXCEPTION_TYPES: &[&str] = &["Exception", "System.Exception"];
const WEAK_RNG_TYPES: &[&str] = &["Random", "System.Random"];

pub static RULES: &[Rule] = &[
    Rule {
        id: "sql-injection",
        category: RuleCategory::Security,
        detect: detect_sql_injection,
    },
    Rule {
        id: "hardcoded-secret",
        category: RuleCategory::Security,
        detect: detect_hardcoded_secrets,
    },
    Rule {
        id: "swallowed-exception",
        category: RuleCategory::Security,
        detect: detect_swallowed_exceptions,
    },
    Rule {
        id: "unsafe-file-operation",
        category: RuleCategory::Security,
        detect: detect_unsafe_file_operations,
    },
    Rule {
        id: "weak-random",
        category: RuleCategory::Security,
        detect: detect_weak_random,
    },
];

/// Reported once per unit.
fn detect_sql_injection(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::AddExpression)
        .find(|n| is_string_concatenation(n) && SQL_KEYWORD.is_match(n.text()))
        .map(|n| {
            format!(
                "SECURITY: Possible SQL injection at line {}: SQL text is built by string concatenation. Use parameterized queries instead.",
                n.span.start_line
            )
        })
        .into_iter()
        .collect()
}

/// Declarators stop at the first match; assignments report every match.
fn detect_hardcoded_secrets(ctx: &RuleContext<'_>) -> Vec<String> {
    let mut out = Vec::new();

    let declarator = ctx
        .tree
        .nodes_of_kind(SyntaxKind::VariableDeclarator)
        .find_map(|d| {
            let name = d.name()?;
            let init = initializer(d)?;
            (SECRET_NAME.is_match(name) && init.kind == SyntaxKind::StringLiteral).then_some(name)
        });
    if let Some(name) = declarator {
        out.push(format!(
            "SECURITY: Possible hardcoded secret in '{}'. Load secrets from configuration or a secret store.",
            name
        ));
    }

    for assignment in ctx.tree.nodes_of_kind(SyntaxKind::AssignmentExpression) {
        let (Some(left), Some(right)) = (assignment.left(), assignment.right()) else {
            continue;
        };
        if right.kind == SyntaxKind::StringLiteral && SECRET_TARGET.is_match(left.text()) {
            out.push(format!(
                "SECURITY: Possible hardcoded secret assigned to '{}'. Load secrets from configuration or a secret store.",
                left.text().trim()
            ));
        }
    }

    out
}

fn catches_general_exception(clause: &SyntaxNode) -> bool {
    clause
        .child_of_kind(SyntaxKind::CatchDeclaration)
        .and_then(|decl| decl.field("type").or_else(|| decl.children.first()))
        .is_some_and(|ty| GENERAL_EXCEPTION_TYPES.contains(&ty.text().trim()))
}

fn detect_swallowed_exceptions(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::CatchClause)
        .filter(|clause| catches_general_exception(clause))
        .filter(|clause| {
            let Some(body) = clause
                .field("body")
                .or_else(|| clause.child_of_kind(SyntaxKind::Block))
            else {
                return true;
            };
            let rethrows = body.descendants_of_kind(SyntaxKind::ThrowStatement).next().is_some();
            let logs = body.text().to_lowercase().contains("log");
            !rethrows && !logs
        })
        .map(|clause| {
            format!(
                "SECURITY: Catch block at line {} swallows a general Exception without logging or rethrowing it.",
                clause.span.start_line
            )
        })
        .collect()
}

/// Reported once per unit.
fn detect_unsafe_file_operations(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::InvocationExpression)
        .filter_map(callee)
        .find(|c| UNSAFE_FILE_OP.is_match(c.text()))
        .map(|c| {
            format!(
                "SECURITY: File system operation '{}' detected. Validate and sanitize paths to prevent path traversal.",
                c.text().trim()
            )
        })
        .into_iter()
        .collect()
}

/// Reported once per construction site.
fn detect_weak_random(ctx: &RuleContext<'_>) -> Vec<String> {
    ctx.tree
        .nodes_of_kind(SyntaxKind::ObjectCreationExpression)
        .filter(|n| {
            n.field("type")
                .or_else(|| n.children.first())
                .is_some_and(|ty| WEAK_RNG_TYPES.contains(&ty.text().trim()))
        })
        .map(|n| {
            format!(
                "SECURITY: System.Random at line {} is not cryptographically secure. Use RandomNumberGenerator for security-sensitive values.",
                n.span.start_line
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run_rule;

    #[test]
    fn test_sql_injection_reported_once() {
        let source = r#"
class Repo
{
    void Remove(string name)
    {
        var q = "DELETE FROM Users WHERE Name='" + name + "'";
        var r = "SELECT * FROM Users WHERE Id=" + id;
    }
}
"#;
        let found = run_rule(detect_sql_injection, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("SECURITY: Possible SQL injection at line 6"));
    }

    #[test]
    fn test_sql_injection_needs_concatenation() {
        let source = r#"class Repo { void M() { var q = "SELECT 1"; var n = a + b; } }"#;
        assert!(run_rule(detect_sql_injection, source).is_empty());
    }

    #[test]
    fn test_hardcoded_secret_declarator_first_match_only() {
        let source = r#"
class Settings
{
    private string dbPassword = "hunter2";
    private string ApiKey = "abc";
    private string user = "admin";
}
"#;
        let found = run_rule(detect_hardcoded_secrets, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("'dbPassword'"));
    }

    #[test]
    fn test_hardcoded_secret_assignments() {
        let source = r#"
class Settings
{
    void Configure(Options o)
    {
        o.ConnectionString = "Server=.;Database=x";
        o.Secret = "s3cr3t";
        o.Timeout = "30";
        o.Password = GetPassword();
    }
}
"#;
        let found = run_rule(detect_hardcoded_secrets, source);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("'o.ConnectionString'"));
        assert!(found[1].contains("'o.Secret'"));
    }

    #[test]
    fn test_swallowed_exception() {
        let source = r#"
class Worker
{
    void Run()
    {
        try { Step(); } catch (Exception ex) { }
        try { Step(); } catch (Exception ex) { _logger.LogError(ex, "failed"); }
        try { Step(); } catch (System.Exception) { throw; }
        try { Step(); } catch (IOException) { }
    }
}
"#;
        let found = run_rule(detect_swallowed_exceptions, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("line 6"));
    }

    #[test]
    fn test_unsafe_file_operation_first_match() {
        let source = r#"
class Cleaner
{
    void Run(string p)
    {
        File.Delete(p);
        Directory.Delete(p, true);
    }
}
"#;
        let found = run_rule(detect_unsafe_file_operations, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("'File.Delete'"));
    }

    #[test]
    fn test_weak_random_every_occurrence() {
        let source = r#"
class Dice
{
    Random r = new Random();
    void Roll() { var s = new System.Random(42); var b = new StringBuilder(); }
}
"#;
        let found = run_rule(detect_weak_random, source);
        assert_eq!(found.len(), 2);
    }
}
