//! Structural metrics and cyclomatic complexity.
//!
//! Cyclomatic complexity is calculated as:
//! - Start at 1
//! - Add 1 for each: if, while, for, foreach, case label, catch, ?:, &&, ||

use serde::{Deserialize, Serialize};

use crate::analysis::{SyntaxKind, SyntaxNode, SyntaxTree};

/// Unit-level metrics, serialized under the `metrics` key of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(rename = "classes")]
    pub class_count: usize,
    #[serde(rename = "methods")]
    pub method_count: usize,
    /// Non-blank lines of the unit's full text.
    #[serde(rename = "lines")]
    pub line_count: usize,
    #[serde(rename = "complexity")]
    pub cyclomatic_complexity: usize,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            class_count: 0,
            method_count: 0,
            line_count: 0,
            cyclomatic_complexity: 1,
        }
    }
}

impl Metrics {
    /// Compute metrics for a whole unit. Never fails.
    pub fn compute(tree: &SyntaxTree) -> Self {
        let mut class_count = 0;
        let mut method_count = 0;
        for node in tree.descendants() {
            match node.kind {
                SyntaxKind::ClassDeclaration => class_count += 1,
                SyntaxKind::MethodDeclaration => method_count += 1,
                _ => {}
            }
        }

        Self {
            class_count,
            method_count,
            line_count: count_non_blank_lines(tree.full_text()),
            cyclomatic_complexity: ControlFlowInfo::collect(tree.root()).cyclomatic_complexity(),
        }
    }
}

/// Decision points found in a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFlowInfo {
    /// Number of if statements.
    pub if_count: usize,
    /// Number of for/foreach/while statements.
    pub loop_count: usize,
    /// Number of case labels.
    pub case_count: usize,
    /// Number of catch clauses.
    pub catch_count: usize,
    /// Number of ternary ?: operators.
    pub ternary_count: usize,
    /// Number of && operators.
    pub and_count: usize,
    /// Number of || operators.
    pub or_count: usize,
}

impl ControlFlowInfo {
    /// Count decision points in `node` and everything below it.
    pub fn collect(node: &SyntaxNode) -> Self {
        let mut info = Self::default();
        for n in node.descendants() {
            match n.kind {
                SyntaxKind::IfStatement => info.if_count += 1,
                SyntaxKind::WhileStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement => info.loop_count += 1,
                SyntaxKind::CaseSwitchLabel => info.case_count += 1,
                SyntaxKind::CatchClause => info.catch_count += 1,
                SyntaxKind::ConditionalExpression => info.ternary_count += 1,
                SyntaxKind::LogicalAndExpression => info.and_count += 1,
                SyntaxKind::LogicalOrExpression => info.or_count += 1,
                _ => {}
            }
        }
        info
    }

    /// CC = 1 + decision_points
    pub fn cyclomatic_complexity(&self) -> usize {
        let decision_points = self.if_count
            + self.loop_count
            + self.case_count
            + self.catch_count
            + self.ternary_count
            + self.and_count
            + self.or_count;

        1 + decision_points
    }
}

/// Cyclomatic complexity of a single subtree, typically a method.
pub fn complexity_of(node: &SyntaxNode) -> usize {
    ControlFlowInfo::collect(node).cyclomatic_complexity()
}

fn count_non_blank_lines(text: &str) -> usize {
    text.lines().filter(|l| !l.trim().is_empty()).count()
}
