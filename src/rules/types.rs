//! Core types for rules and their output.

use crate::analysis::{Diagnostic, SyntaxTree};

/// Rule category. Declaration order is the order suggestions are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleCategory {
    Basic,
    Security,
    Performance,
    Linq,
}

impl RuleCategory {
    /// All categories in reporting order.
    pub const ALL: [RuleCategory; 4] = [
        RuleCategory::Basic,
        RuleCategory::Security,
        RuleCategory::Performance,
        RuleCategory::Linq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Basic => "basic",
            RuleCategory::Security => "security",
            RuleCategory::Performance => "performance",
            RuleCategory::Linq => "linq",
        }
    }

    /// Conventional message prefix; basic suggestions carry none.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            RuleCategory::Basic => None,
            RuleCategory::Security => Some("SECURITY:"),
            RuleCategory::Performance => Some("PERFORMANCE:"),
            RuleCategory::Linq => Some("LINQ:"),
        }
    }

    /// Category a suggestion belongs to, judged by its prefix.
    pub fn of_suggestion(suggestion: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.prefix().is_some_and(|p| suggestion.starts_with(p)))
            .unwrap_or(RuleCategory::Basic)
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub tree: &'a SyntaxTree,
    /// Compiler diagnostics for the unit, Hidden ones included.
    pub diagnostics: &'a [Diagnostic],
}

/// Detector signature. A detector never fails; no match means no output.
pub type DetectFn = fn(&RuleContext<'_>) -> Vec<String>;

/// A registered detector.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub category: RuleCategory,
    pub detect: DetectFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .finish()
    }
}

/// Suggestions collected per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionGroups {
    basic: Vec<String>,
    security: Vec<String>,
    performance: Vec<String>,
    linq: Vec<String>,
}

impl SuggestionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append suggestions to a category, keeping insertion order.
    pub fn extend<I>(&mut self, category: RuleCategory, suggestions: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.group_mut(category).extend(suggestions);
    }

    pub fn get(&self, category: RuleCategory) -> &[String] {
        match category {
            RuleCategory::Basic => &self.basic,
            RuleCategory::Security => &self.security,
            RuleCategory::Performance => &self.performance,
            RuleCategory::Linq => &self.linq,
        }
    }

    pub fn len(&self) -> usize {
        RuleCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate all groups: basic, security, performance, linq.
    /// No deduplication across categories.
    pub fn into_ordered(self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.basic);
        out.extend(self.security);
        out.extend(self.performance);
        out.extend(self.linq);
        out
    }

    fn group_mut(&mut self, category: RuleCategory) -> &mut Vec<String> {
        match category {
            RuleCategory::Basic => &mut self.basic,
            RuleCategory::Security => &mut self.security,
            RuleCategory::Performance => &mut self.performance,
            RuleCategory::Linq => &mut self.linq,
        }
    }
}
