//! Semantic scores and engine-level recommendations.

use crate::analyzers::concerns::concern_priority;
use crate::analyzers::{BusinessLogicClassification, ConcernResult, DomainAnalysisResult};
use crate::core::Priority;
use serde::Serialize;

const CONCERN_PENALTY: f64 = 0.1;

/// Scores on a 0–100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticScores {
    pub business_logic_score: u32,
    pub domain_clarity_score: u32,
    pub separation_of_concerns_score: u32,
    pub overall_semantic_score: u32,
}

fn percent(ratio: f64) -> u32 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u32
}

pub fn compute_scores(
    classification: &BusinessLogicClassification,
    domains: &[DomainAnalysisResult],
    concerns: &[ConcernResult],
) -> SemanticScores {
    let business_logic_score = percent(classification.business_ratio);
    // Domains arrive sorted, the first one is the most confident
    let domain_clarity_score = domains.first().map(|d| percent(d.confidence)).unwrap_or(0);
    let separation_of_concerns_score =
        percent((1.0 - CONCERN_PENALTY * concerns.len() as f64).max(0.0));

    let sum = business_logic_score + domain_clarity_score + separation_of_concerns_score;
    let overall_semantic_score = (f64::from(sum) / 3.0).round() as u32;

    SemanticScores {
        business_logic_score,
        domain_clarity_score,
        separation_of_concerns_score,
        overall_semantic_score,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    MixedResponsibilities,
    DomainAmbiguity,
    ConcernRefactoring,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub affected: Vec<String>,
}

pub fn engine_recommendations(
    classification: &BusinessLogicClassification,
    domains: &[DomainAnalysisResult],
    concerns: &[ConcernResult],
    concern_threshold: f64,
) -> Vec<EngineRecommendation> {
    let mut recommendations = Vec::new();

    if !classification.mixed.is_empty() {
        let names: Vec<String> = classification.mixed.iter().map(|e| e.name.clone()).collect();
        recommendations.push(EngineRecommendation {
            kind: RecommendationKind::MixedResponsibilities,
            priority: Priority::Medium,
            message: format!(
                "{} elements mix business and infrastructure logic; separate the two layers",
                names.len()
            ),
            affected: names,
        });
    }

    if domains.len() > 1 {
        let names: Vec<String> = domains.iter().map(|d| d.domain.clone()).collect();
        recommendations.push(EngineRecommendation {
            kind: RecommendationKind::DomainAmbiguity,
            priority: Priority::Medium,
            message: format!(
                "File spans {} business domains ({}); split it along domain boundaries",
                names.len(),
                names.join(", ")
            ),
            affected: names,
        });
    }

    recommendations.extend(
        concerns
            .iter()
            .filter(|c| c.cross_cutting_score > concern_threshold)
            .map(|c| {
                let approach = c
                    .recommendation
                    .as_ref()
                    .map(|r| r.strategy.name)
                    .unwrap_or("a dedicated module");
                EngineRecommendation {
                    kind: RecommendationKind::ConcernRefactoring,
                    priority: concern_priority(c.severity, c.cross_cutting_score),
                    message: format!(
                        "{} is scattered across {} elements; centralize it with {}",
                        c.name,
                        c.affected_elements.len(),
                        approach
                    ),
                    affected: c.affected_elements.iter().map(|a| a.name.clone()).collect(),
                }
            }),
    );

    recommendations
}
