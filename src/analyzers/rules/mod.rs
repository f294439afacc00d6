//! Business rule extraction.
//!
//! Function and method bodies are scanned for conditional, validation,
//! calculation and workflow constructs. A construct only becomes a rule when
//! the snippet, together with its function and class names, mentions a
//! business keyword; incidental branching never reaches the rule set.

mod relationships;
mod statistics;

pub use crate::catalogs::{RuleCategory, RuleType};
pub use relationships::{find_relationships, RelationshipKind, RuleRelationship};
pub use statistics::{
    build_recommendations, build_statistics, ComplexityDistribution, RuleRecommendation,
    RuleRecommendationKind, RuleStatistics,
};

use crate::catalogs::{
    business_keywords, complexity_indicators, construct_patterns, domain_rule_patterns,
    known_states, rule_categories, ConstructPattern,
};
use crate::core::{CodeElement, FileElements, FunctionElement, Span};
use crate::patterns::{TextMatch, TextMatcher};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Categories scoring above this are recorded on the rule
const CATEGORY_RECORD_THRESHOLD: f64 = 0.3;
const DOMAIN_TAG_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: RuleCategory,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainContext {
    pub domain: String,
    pub domain_type: String,
    pub description: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRule {
    pub id: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub condition_text: String,
    pub action_text: String,
    pub source_function: String,
    pub source_class: Option<String>,
    pub primary_category: RuleCategory,
    pub categories: Vec<CategoryScore>,
    pub confidence: f64,
    pub complexity: u32,
    pub location: Span,
    pub business_keywords: Vec<String>,
    pub domain_context: Option<DomainContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAnalysis {
    pub rules: Vec<ExtractedRule>,
    pub relationships: Vec<RuleRelationship>,
    pub statistics: RuleStatistics,
    pub recommendations: Vec<RuleRecommendation>,
}

pub struct BusinessRuleExtractor {
    max_rules_for_relationships: usize,
}

impl Default for BusinessRuleExtractor {
    fn default() -> Self {
        Self::new(crate::config::default_max_rules_for_relationships())
    }
}

impl BusinessRuleExtractor {
    pub fn new(max_rules_for_relationships: usize) -> Self {
        Self {
            max_rules_for_relationships,
        }
    }

    pub fn analyze(&self, file: &FileElements) -> RuleAnalysis {
        let rules = self.extract_rules(file);

        let related = if rules.len() > self.max_rules_for_relationships {
            tracing::warn!(
                file = %file.file_path,
                rules = rules.len(),
                cap = self.max_rules_for_relationships,
                "Rule count exceeds relationship cap, analyzing the first {} rules",
                self.max_rules_for_relationships
            );
            &rules[..self.max_rules_for_relationships]
        } else {
            &rules[..]
        };
        let relationships = find_relationships(related);

        let statistics = build_statistics(&rules);
        let recommendations = build_recommendations(&rules);

        RuleAnalysis {
            rules,
            relationships,
            statistics,
            recommendations,
        }
    }

    /// Every relevant rule in functions and class methods, in source order.
    pub fn extract_rules(&self, file: &FileElements) -> Vec<ExtractedRule> {
        let mut rules = Vec::new();
        for element in &file.elements {
            match element {
                CodeElement::Function(function) => {
                    rules.extend(extract_from_function(function, None));
                }
                CodeElement::Class(class) => {
                    for method in &class.methods {
                        rules.extend(extract_from_function(method, Some(&class.name)));
                    }
                }
                CodeElement::Variable(_) => {}
            }
        }

        for (index, rule) in rules.iter_mut().enumerate() {
            rule.id = format!("rule-{}", index + 1);
        }
        rules
    }
}

fn extract_from_function(function: &FunctionElement, class: Option<&str>) -> Vec<ExtractedRule> {
    let body = function.body_text.as_str();
    if body.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<(RuleType, usize)> = HashSet::new();
    let mut rules: Vec<ExtractedRule> = construct_patterns()
        .iter()
        .flat_map(|construct| {
            construct
                .matcher
                .find_all(body)
                .into_iter()
                .map(move |m| (construct, m))
        })
        .filter(|(construct, m)| names_known_state(construct, m))
        .filter_map(|(construct, m)| build_rule(construct, &m, function, class))
        .filter(|rule| seen.insert((rule.rule_type, rule.location.start)))
        .collect();

    rules.sort_by_key(|rule| (rule.location.start, rule.rule_type));
    rules
}

fn names_known_state(construct: &ConstructPattern, m: &TextMatch<'_>) -> bool {
    match construct.state_group {
        Some(group) => group_text(m, group)
            .map(|state| known_states().contains(&state.to_lowercase().as_str()))
            .unwrap_or(false),
        None => true,
    }
}

fn group_text<'t>(m: &TextMatch<'t>, group: usize) -> Option<&'t str> {
    if group == 0 {
        return Some(m.text);
    }
    m.groups.get(group - 1).copied().filter(|g| !g.is_empty())
}

fn build_rule(
    construct: &ConstructPattern,
    m: &TextMatch<'_>,
    function: &FunctionElement,
    class: Option<&str>,
) -> Option<ExtractedRule> {
    let context = format!("{} {} {}", m.text, function.name, class.unwrap_or(""));
    let keywords = matched_business_keywords(&context);
    if keywords.is_empty() {
        return None;
    }

    let condition_text = group_text(m, construct.condition_group)
        .unwrap_or(m.text)
        .trim()
        .to_string();
    let action_text = construct
        .action_group
        .and_then(|g| group_text(m, g))
        .unwrap_or("")
        .trim()
        .to_string();

    let categories = score_categories(&context);
    let primary_category = categories
        .iter()
        .max_by(|a, b| {
            // Ties go to the earlier category
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.category.cmp(&a.category))
        })
        .filter(|best| best.score > 0.0)
        .map(|best| best.category)
        .unwrap_or_else(|| construct.rule_type.default_category());

    let mut recorded: Vec<CategoryScore> = categories
        .into_iter()
        .filter(|c| c.score > CATEGORY_RECORD_THRESHOLD)
        .collect();
    recorded.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Some(ExtractedRule {
        id: String::new(),
        rule_type: construct.rule_type,
        condition_text,
        action_text,
        source_function: function.name.clone(),
        source_class: class.map(str::to_string),
        primary_category,
        categories: recorded,
        confidence: (0.5 + 0.2 * keywords.len() as f64).min(1.0),
        complexity: rule_complexity(m.text),
        location: Span {
            start: m.start,
            end: m.end,
        },
        business_keywords: keywords,
        domain_context: domain_context(&context),
    })
}

pub fn matched_business_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    business_keywords()
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

/// `1 + Σ(weight × matches)` over the complexity indicators.
pub fn rule_complexity(text: &str) -> u32 {
    1 + complexity_indicators()
        .iter()
        .map(|indicator| indicator.weight * indicator.matcher.count(text) as u32)
        .sum::<u32>()
}

fn score_categories(text: &str) -> Vec<CategoryScore> {
    rule_categories()
        .iter()
        .map(|(category, set)| CategoryScore {
            category: *category,
            score: set.score(text),
        })
        .collect()
}

fn domain_context(text: &str) -> Option<DomainContext> {
    domain_rule_patterns()
        .iter()
        .find(|p| p.matcher.is_match(text))
        .map(|p| DomainContext {
            domain: p.domain.to_string(),
            domain_type: p.domain_type.to_string(),
            description: p.description.to_string(),
            confidence: DOMAIN_TAG_CONFIDENCE,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;

    fn single_function(name: &str, body: &str) -> FileElements {
        FileElements::new(
            "rules.js",
            Language::JavaScript,
            vec![CodeElement::function(name, body)],
        )
    }

    #[test]
    fn test_calculate_total_price_yields_conditional_and_calculation() {
        let file = single_function(
            "calculateTotalPrice",
            "if (amount > 100) { return amount * taxRate; }",
        );
        let rules = BusinessRuleExtractor::default().extract_rules(&file);

        let conditional = rules
            .iter()
            .find(|r| r.rule_type == RuleType::Conditional)
            .expect("conditional rule");
        assert_eq!(conditional.condition_text, "amount > 100");
        assert_eq!(conditional.action_text, "return amount * taxRate;");
        assert!(rules.iter().any(|r| r.rule_type == RuleType::Calculation));

        for rule in &rules {
            assert!(rule.confidence >= 0.5);
            assert!(matches!(
                rule.primary_category,
                RuleCategory::Calculation | RuleCategory::Conditional
            ));
            assert_eq!(rule.source_function, "calculateTotalPrice");
        }
    }

    #[test]
    fn test_irrelevant_conditionals_are_discarded() {
        let file = single_function("render", "if (x > 3) { y = x * 2; }");
        let rules = BusinessRuleExtractor::default().extract_rules(&file);
        assert!(rules.is_empty());
    }

    #[test]
    fn test_method_rules_carry_class() {
        let file = FileElements::new(
            "order.py",
            Language::Python,
            vec![CodeElement::class(
                "OrderService",
                "",
                vec![FunctionElement {
                    name: "validate".into(),
                    body_text: "if order is None:\n    raise ValueError('order required')".into(),
                }],
            )],
        );
        let rules = BusinessRuleExtractor::default().extract_rules(&file);
        assert!(!rules.is_empty());
        assert!(rules
            .iter()
            .all(|r| r.source_class.as_deref() == Some("OrderService")));
        assert!(rules.iter().any(|r| r.rule_type == RuleType::Validation));
    }

    #[test]
    fn test_workflow_requires_known_state() {
        let known = single_function("ship", "if (order.status === 'shipped') { notify(); }");
        let rules = BusinessRuleExtractor::default().extract_rules(&known);
        assert!(rules.iter().any(|r| r.rule_type == RuleType::Workflow));

        let unknown = single_function("ship", "order.status = computeNext(order);");
        let rules = BusinessRuleExtractor::default().extract_rules(&unknown);
        assert!(!rules.iter().any(|r| r.rule_type == RuleType::Workflow));
    }

    #[test]
    fn test_complexity_counts_indicators() {
        assert_eq!(rule_complexity("amount > 0"), 1);
        // two `&&` plus one ternary
        assert_eq!(rule_complexity("a && b && c ? x : y"), 4);
        assert_eq!(rule_complexity("try { pay() } catch (e) {}"), 7);
    }

    #[test]
    fn test_confidence_grows_with_keywords() {
        let file = single_function("check", "if (customer.balance < order.amount) { reject(); }");
        let rules = BusinessRuleExtractor::default().extract_rules(&file);
        let rule = rules
            .iter()
            .find(|r| r.rule_type == RuleType::Conditional)
            .unwrap();
        // customer, balance, order, amount
        assert_eq!(rule.business_keywords.len(), 4);
        assert_eq!(rule.confidence, 1.0);
    }

    #[test]
    fn test_domain_tagging() {
        let file = single_function(
            "applyInterest",
            "if (account.balance > 0) { interest = account.balance * rate; }",
        );
        let rules = BusinessRuleExtractor::default().extract_rules(&file);
        let tagged: Vec<_> = rules.iter().filter_map(|r| r.domain_context.as_ref()).collect();
        assert!(!tagged.is_empty());
        assert!(tagged.iter().all(|d| d.domain == "finance"));
        assert!(tagged.iter().all(|d| d.confidence == 0.8));
    }

    #[test]
    fn test_rule_ids_are_sequential() {
        let file = single_function(
            "calculateTotalPrice",
            "if (amount > 100) { return amount * taxRate; }",
        );
        let rules = BusinessRuleExtractor::default().extract_rules(&file);
        for (i, rule) in rules.iter().enumerate() {
            assert_eq!(rule.id, format!("rule-{}", i + 1));
        }
    }

    #[test]
    fn test_relationship_cap_limits_pairs() {
        let body = (0..6)
            .map(|i| format!("if (amount > {i}) {{ total = total + {i}; }}\n"))
            .collect::<String>();
        let file = single_function("calculateTotal", &body);
        let capped = BusinessRuleExtractor::new(2).analyze(&file);
        assert!(capped.rules.len() > 2);
        assert_eq!(capped.relationships.len(), 1);
    }
}
