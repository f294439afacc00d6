use super::ConcernResult;
use crate::catalogs::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringPhase {
    pub phase: usize,
    pub severity: Severity,
    pub concerns: Vec<String>,
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringPlan {
    pub phases: Vec<RefactoringPhase>,
    pub total_weeks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernSummary {
    pub total_concerns: usize,
    pub high_severity: usize,
    pub most_scattered: Option<String>,
    pub average_score: f64,
}

/// Phases ordered high, medium, low; empty severities are skipped.
pub fn build_refactoring_plan(concerns: &[ConcernResult]) -> RefactoringPlan {
    let phases: Vec<RefactoringPhase> = [Severity::High, Severity::Medium, Severity::Low]
        .into_iter()
        .filter_map(|severity| {
            let group: Vec<&ConcernResult> =
                concerns.iter().filter(|c| c.severity == severity).collect();
            if group.is_empty() {
                return None;
            }
            let estimated_weeks = group.iter().map(|c| concern_weeks(c)).sum::<u32>();
            Some((severity, group, estimated_weeks))
        })
        .enumerate()
        .map(|(index, (severity, group, estimated_weeks))| RefactoringPhase {
            phase: index + 1,
            severity,
            concerns: group.iter().map(|c| c.name.clone()).collect(),
            estimated_weeks,
        })
        .collect();

    let total_weeks = phases.iter().map(|p| p.estimated_weeks).sum::<u32>();
    RefactoringPlan {
        phases,
        total_weeks,
    }
}

fn concern_weeks(concern: &ConcernResult) -> u32 {
    concern
        .recommendation
        .as_ref()
        .map(|rec| rec.strategy.effort.weeks())
        .unwrap_or(0)
}

pub fn summarize(concerns: &[ConcernResult]) -> ConcernSummary {
    if concerns.is_empty() {
        return ConcernSummary::default();
    }

    // First concern wins ties
    let most_scattered = concerns
        .iter()
        .fold(None::<&ConcernResult>, |best, c| match best {
            Some(b) if b.affected_elements.len() >= c.affected_elements.len() => Some(b),
            _ => Some(c),
        })
        .map(|c| c.name.clone());

    ConcernSummary {
        total_concerns: concerns.len(),
        high_severity: concerns
            .iter()
            .filter(|c| c.severity == Severity::High)
            .count(),
        most_scattered,
        average_score: concerns.iter().map(|c| c.cross_cutting_score).sum::<f64>()
            / concerns.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::concerns::{
        concern_priority, AffectedElement, ConcernDistribution, ConcernRecommendation,
    };
    use crate::catalogs::strategy;
    use std::collections::BTreeMap;

    fn concern(name: &str, severity: Severity, strategy_id: &str, affected: usize) -> ConcernResult {
        let score = 0.75;
        ConcernResult {
            name: name.to_string(),
            category: "test".to_string(),
            severity,
            description: String::new(),
            total_occurrences: 5,
            affected_elements: (0..affected)
                .map(|i| AffectedElement {
                    kind: crate::core::ElementKind::Function,
                    name: format!("f{i}"),
                    match_count: 1,
                    patterns_matched: vec![0],
                    context: String::new(),
                })
                .collect(),
            cross_cutting_score: score,
            distribution: ConcernDistribution {
                by_element_kind: BTreeMap::new(),
                by_pattern: Vec::new(),
            },
            hotspots: Vec::new(),
            recommendation: strategy(strategy_id).map(|s| ConcernRecommendation {
                concern: name.to_string(),
                priority: concern_priority(severity, score),
                score,
                strategy: s.clone(),
            }),
        }
    }

    #[test]
    fn test_plan_orders_phases_and_skips_empty() {
        let concerns = vec![
            concern("Configuration", Severity::Low, "configuration_management", 2),
            concern("Database Access", Severity::High, "repository_pattern", 3),
        ];
        let plan = build_refactoring_plan(&concerns);
        let severities: Vec<Severity> = plan.phases.iter().map(|p| p.severity).collect();
        assert_eq!(severities, vec![Severity::High, Severity::Low]);
        assert_eq!(plan.phases[0].phase, 1);
        assert_eq!(plan.phases[1].phase, 2);
        assert_eq!(plan.phases[0].estimated_weeks, 8);
        assert_eq!(
            plan.total_weeks,
            plan.phases.iter().map(|p| p.estimated_weeks).sum::<u32>()
        );
    }

    #[test]
    fn test_empty_plan() {
        let plan = build_refactoring_plan(&[]);
        assert!(plan.phases.is_empty());
        assert_eq!(plan.total_weeks, 0);
    }

    #[test]
    fn test_summary() {
        let concerns = vec![
            concern("Logging", Severity::Medium, "centralized_logging", 4),
            concern("Authentication", Severity::High, "authentication_service", 4),
            concern("Caching", Severity::Medium, "caching_layer", 2),
        ];
        let summary = summarize(&concerns);
        assert_eq!(summary.total_concerns, 3);
        assert_eq!(summary.high_severity, 1);
        assert_eq!(summary.most_scattered.as_deref(), Some("Logging"));
        assert!((summary.average_score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(summarize(&[]), ConcernSummary::default());
    }
}
