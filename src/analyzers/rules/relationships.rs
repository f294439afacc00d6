use super::ExtractedRule;
use serde::Serialize;
use std::collections::BTreeSet;

static LANGUAGE_KEYWORDS: &[&str] = &[
    "and", "const", "def", "elif", "else", "false", "for", "function", "let", "new", "none",
    "not", "null", "return", "self", "this", "true", "undefined", "var", "while",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Sequential,
    Dependency,
    Categorical,
}

impl RelationshipKind {
    pub fn strength(self) -> f64 {
        match self {
            Self::Sequential => 0.7,
            Self::Dependency => 0.6,
            Self::Categorical => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRelationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub strength: f64,
}

/// Pairwise relationships, at most one per pair.
pub fn find_relationships(rules: &[ExtractedRule]) -> Vec<RuleRelationship> {
    let tokens: Vec<BTreeSet<String>> = rules.iter().map(identifier_tokens).collect();

    let mut relationships = Vec::new();
    for (i, a) in rules.iter().enumerate() {
        for (j, b) in rules.iter().enumerate().skip(i + 1) {
            if let Some(kind) = relate(a, b, &tokens[i], &tokens[j]) {
                relationships.push(RuleRelationship {
                    from: a.id.clone(),
                    to: b.id.clone(),
                    kind,
                    strength: kind.strength(),
                });
            }
        }
    }
    relationships
}

fn relate(
    a: &ExtractedRule,
    b: &ExtractedRule,
    a_tokens: &BTreeSet<String>,
    b_tokens: &BTreeSet<String>,
) -> Option<RelationshipKind> {
    if a.source_function == b.source_function && a.source_class == b.source_class {
        Some(RelationshipKind::Sequential)
    } else if !a_tokens.is_disjoint(b_tokens) {
        Some(RelationshipKind::Dependency)
    } else if a.primary_category == b.primary_category {
        Some(RelationshipKind::Categorical)
    } else {
        None
    }
}

fn identifier_tokens(rule: &ExtractedRule) -> BTreeSet<String> {
    format!("{} {}", rule.condition_text, rule.action_text)
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| token.len() >= 3)
        .map(str::to_lowercase)
        .filter(|token| !LANGUAGE_KEYWORDS.contains(&token.as_str()))
        .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::rules::{RuleCategory, RuleType};
    use crate::core::Span;

    fn rule(id: &str, function: &str, condition: &str, category: RuleCategory) -> ExtractedRule {
        ExtractedRule {
            id: id.to_string(),
            rule_type: RuleType::Conditional,
            condition_text: condition.to_string(),
            action_text: String::new(),
            source_function: function.to_string(),
            source_class: None,
            primary_category: category,
            categories: Vec::new(),
            confidence: 0.7,
            complexity: 1,
            location: Span { start: 0, end: 1 },
            business_keywords: Vec::new(),
            domain_context: None,
        }
    }

    #[test]
    fn test_same_function_is_sequential() {
        let rules = vec![
            rule("rule-1", "checkout", "a > 1", RuleCategory::Conditional),
            rule("rule-2", "checkout", "b > 2", RuleCategory::Validation),
        ];
        let found = find_relationships(&rules);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, RelationshipKind::Sequential);
        assert_eq!(found[0].strength, 0.7);
    }

    #[test]
    fn test_shared_identifier_is_dependency() {
        let rules = vec![
            rule("rule-1", "checkout", "order.total > 100", RuleCategory::Conditional),
            rule("rule-2", "refund", "order.total < 0", RuleCategory::Validation),
        ];
        let found = find_relationships(&rules);
        assert_eq!(found[0].kind, RelationshipKind::Dependency);
    }

    #[test]
    fn test_keywords_and_short_tokens_do_not_link() {
        let rules = vec![
            rule("rule-1", "checkout", "x == null", RuleCategory::Conditional),
            rule("rule-2", "refund", "y == null", RuleCategory::Validation),
        ];
        assert!(find_relationships(&rules).is_empty());
    }

    #[test]
    fn test_same_category_is_categorical() {
        let rules = vec![
            rule("rule-1", "checkout", "alpha > 1", RuleCategory::Temporal),
            rule("rule-2", "refund", "beta > 2", RuleCategory::Temporal),
        ];
        let found = find_relationships(&rules);
        assert_eq!(found[0].kind, RelationshipKind::Categorical);
        assert_eq!(found[0].strength, 0.5);
    }
}
