//! Rule registry and built-in detectors.
//!
//! Rules are plain function values grouped by category. The registry runs
//! each one against a [`RuleContext`] and files the output under the rule's
//! category; ordering across categories is fixed by [`SuggestionGroups`].

mod linq;
mod performance;
mod security;
mod style;
mod text;
mod types;

pub use style::{MAX_CLASS_MEMBERS, MAX_METHOD_COMPLEXITY, MAX_METHOD_LINES};
pub use types::{DetectFn, Rule, RuleCategory, RuleContext, SuggestionGroups};

/// Ordered collection of detectors.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule.
    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        for rule in style::RULES
            .iter()
            .chain(security::RULES)
            .chain(performance::RULES)
            .chain(linq::RULES)
        {
            registry.register(*rule);
        }
        registry
    }

    pub fn register(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and group the suggestions by category.
    pub fn run(&self, ctx: &RuleContext<'_>) -> SuggestionGroups {
        let mut groups = SuggestionGroups::new();
        for rule in &self.rules {
            let found = (rule.detect)(ctx);
            if !found.is_empty() {
                tracing::debug!(rule = rule.id, count = found.len(), "rule matched");
            }
            groups.extend(rule.category, found);
        }
        groups
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CSharpTreeProvider, TreeProvider};
    use std::collections::HashSet;

    fn flag_everything(_: &RuleContext<'_>) -> Vec<String> {
        vec!["custom finding".to_string()]
    }

    #[test]
    fn test_default_rule_ids_unique() {
        let registry = RuleRegistry::with_default_rules();
        let ids: HashSet<_> = registry.rules().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), registry.len());
        for category in RuleCategory::ALL {
            assert!(registry.rules().iter().any(|r| r.category == category));
        }
    }

    #[test]
    fn test_custom_rule_is_grouped() {
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());
        registry.register(Rule {
            id: "custom",
            category: RuleCategory::Performance,
            detect: flag_everything,
        });

        let unit = CSharpTreeProvider::new().parse("class A {}", "A.cs").unwrap();
        let ctx = RuleContext {
            tree: &unit.tree,
            diagnostics: &unit.diagnostics,
        };
        let groups = registry.run(&ctx);
        assert_eq!(groups.get(RuleCategory::Performance), ["custom finding"]);
        assert!(groups.get(RuleCategory::Basic).is_empty());
    }

    #[test]
    fn test_clean_source_has_no_suggestions() {
        let source = r#"
/// <summary>Adds numbers.</summary>
public class Calculator
{
    /// <summary>Sum.</summary>
    public int Add(int a, int b)
    {
        return a + b;
    }
}
"#;
        let unit = CSharpTreeProvider::new().parse(source, "Calc.cs").unwrap();
        let ctx = RuleContext {
            tree: &unit.tree,
            diagnostics: &unit.diagnostics,
        };
        let groups = RuleRegistry::with_default_rules().run(&ctx);
        assert!(groups.is_empty(), "{:?}", groups);
    }
}
