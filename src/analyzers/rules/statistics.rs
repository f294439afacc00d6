use super::{ExtractedRule, RuleCategory, RuleType};
use crate::core::Priority;
use serde::Serialize;
use std::collections::BTreeMap;

const HIGH_COMPLEXITY: u32 = 5;
const MEDIUM_COMPLEXITY_FLOOR: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplexityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStatistics {
    pub total_rules: usize,
    pub by_type: BTreeMap<RuleType, usize>,
    pub by_category: BTreeMap<RuleCategory, usize>,
    pub complexity_distribution: ComplexityDistribution,
    pub average_confidence: f64,
    pub business_critical: usize,
    pub domain_specific: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleRecommendationKind {
    ComplexityReduction,
    ValidationCentralization,
    DomainExtraction,
    Documentation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecommendation {
    #[serde(rename = "type")]
    pub kind: RuleRecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub affected_rules: Vec<String>,
}

pub fn build_statistics(rules: &[ExtractedRule]) -> RuleStatistics {
    let mut by_type = BTreeMap::new();
    let mut by_category = BTreeMap::new();
    let mut complexity_distribution = ComplexityDistribution::default();

    for rule in rules {
        *by_type.entry(rule.rule_type).or_insert(0) += 1;
        *by_category.entry(rule.primary_category).or_insert(0) += 1;
        match rule.complexity {
            c if c > HIGH_COMPLEXITY => complexity_distribution.high += 1,
            c if c >= MEDIUM_COMPLEXITY_FLOOR => complexity_distribution.medium += 1,
            _ => complexity_distribution.low += 1,
        }
    }

    let average_confidence = if rules.is_empty() {
        0.0
    } else {
        rules.iter().map(|r| r.confidence).sum::<f64>() / rules.len() as f64
    };

    RuleStatistics {
        total_rules: rules.len(),
        by_type,
        by_category,
        complexity_distribution,
        average_confidence,
        business_critical: rules
            .iter()
            .filter(|r| r.primary_category.is_business_critical())
            .count(),
        domain_specific: rules.iter().filter(|r| r.domain_context.is_some()).count(),
    }
}

fn ids<'a>(rules: impl Iterator<Item = &'a ExtractedRule>) -> Vec<String> {
    rules.map(|r| r.id.clone()).collect()
}

/// Recommendations over the whole rule set, highest priority first.
pub fn build_recommendations(rules: &[ExtractedRule]) -> Vec<RuleRecommendation> {
    let mut recommendations = Vec::new();

    let complex: Vec<String> = ids(rules.iter().filter(|r| r.complexity > HIGH_COMPLEXITY));
    if complex.len() > 5 {
        recommendations.push(RuleRecommendation {
            kind: RuleRecommendationKind::ComplexityReduction,
            priority: Priority::High,
            message: format!(
                "{} rules have complexity above {HIGH_COMPLEXITY}; split them into smaller named predicates",
                complex.len()
            ),
            affected_rules: complex,
        });
    }

    let validations: Vec<String> = ids(rules.iter().filter(|r| r.rule_type == RuleType::Validation));
    if validations.len() > 3 {
        recommendations.push(RuleRecommendation {
            kind: RuleRecommendationKind::ValidationCentralization,
            priority: Priority::Medium,
            message: format!(
                "Centralize the {} validation rules in a dedicated validator",
                validations.len()
            ),
            affected_rules: validations,
        });
    }

    let domain_rules: Vec<String> = ids(rules.iter().filter(|r| r.domain_context.is_some()));
    if domain_rules.len() >= 3 {
        recommendations.push(RuleRecommendation {
            kind: RuleRecommendationKind::DomainExtraction,
            priority: Priority::Medium,
            message: format!(
                "Move the {} domain-specific rules into a domain service",
                domain_rules.len()
            ),
            affected_rules: domain_rules,
        });
    }

    if rules.len() > 10 {
        recommendations.push(RuleRecommendation {
            kind: RuleRecommendationKind::Documentation,
            priority: Priority::Low,
            message: format!("Document the {} extracted business rules", rules.len()),
            affected_rules: Vec::new(),
        });
    }

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::rules::DomainContext;
    use crate::core::Span;

    fn rule(n: usize, rule_type: RuleType, complexity: u32, tagged: bool) -> ExtractedRule {
        ExtractedRule {
            id: format!("rule-{n}"),
            rule_type,
            condition_text: String::new(),
            action_text: String::new(),
            source_function: "f".into(),
            source_class: None,
            primary_category: rule_type.default_category(),
            categories: Vec::new(),
            confidence: 0.5 + 0.1 * (n % 2) as f64,
            complexity,
            location: Span { start: n, end: n + 1 },
            business_keywords: Vec::new(),
            domain_context: tagged.then(|| DomainContext {
                domain: "finance".into(),
                domain_type: "balance".into(),
                description: "Account balance rule".into(),
                confidence: 0.8,
            }),
        }
    }

    #[test]
    fn test_complexity_buckets() {
        let rules = vec![
            rule(1, RuleType::Conditional, 1, false),
            rule(2, RuleType::Conditional, 2, false),
            rule(3, RuleType::Conditional, 3, false),
            rule(4, RuleType::Conditional, 5, false),
            rule(5, RuleType::Conditional, 6, false),
        ];
        let stats = build_statistics(&rules);
        assert_eq!(
            stats.complexity_distribution,
            ComplexityDistribution {
                low: 2,
                medium: 2,
                high: 1
            }
        );
        assert_eq!(stats.by_type[&RuleType::Conditional], 5);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = build_statistics(&[]);
        assert_eq!(stats.total_rules, 0);
        assert_eq!(stats.average_confidence, 0.0);
    }

    #[test]
    fn test_business_critical_and_domain_counts() {
        let rules = vec![
            rule(1, RuleType::Validation, 1, true),
            rule(2, RuleType::Calculation, 1, false),
            rule(3, RuleType::Workflow, 1, true),
        ];
        let stats = build_statistics(&rules);
        assert_eq!(stats.business_critical, 2);
        assert_eq!(stats.domain_specific, 2);
    }

    #[test]
    fn test_recommendations_sorted_by_priority() {
        let mut rules: Vec<ExtractedRule> = (1..=6)
            .map(|n| rule(n, RuleType::Calculation, 8, n <= 3))
            .collect();
        rules.extend((7..=11).map(|n| rule(n, RuleType::Validation, 1, false)));

        let recs = build_recommendations(&rules);
        let kinds: Vec<_> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleRecommendationKind::ComplexityReduction,
                RuleRecommendationKind::ValidationCentralization,
                RuleRecommendationKind::DomainExtraction,
                RuleRecommendationKind::Documentation,
            ]
        );
        assert_eq!(recs[0].affected_rules.len(), 6);
    }

    #[test]
    fn test_small_rule_sets_get_no_recommendations() {
        let rules = vec![rule(1, RuleType::Validation, 9, true)];
        assert!(build_recommendations(&rules).is_empty());
    }
}
