//! Business domain identification.
//!
//! Every domain profile is scored against the aggregate text of a file:
//! entity and alias mentions give the base score, confirmed relationships
//! add 0.5 each and confirmed business rules add 0.3 each. The sum is divided
//! by the profile's total entity weight and clamped to 1, so the bonuses can
//! lift a domain past what entity mentions alone would give it.

use crate::catalogs::domains::rule_confirmed;
use crate::catalogs::{domain_profiles, DomainProfile};
use crate::core::FileElements;
use crate::patterns::count_occurrences;
use serde::Serialize;
use std::cmp::Ordering;

const ALIAS_WEIGHT: f64 = 0.8;
const OCCURRENCE_SATURATION: f64 = 5.0;
const RELATIONSHIP_BONUS: f64 = 0.5;
const BUSINESS_RULE_BONUS: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMatch {
    pub name: String,
    pub occurrences: f64,
    pub confidence: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipMatch {
    pub from: String,
    pub to: String,
    pub relationship_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMatch {
    pub name: String,
    pub steps_found: Vec<String>,
    pub total_steps: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAnalysisResult {
    pub domain: String,
    pub confidence: f64,
    pub entities_found: Vec<EntityMatch>,
    pub relationships_found: Vec<RelationshipMatch>,
    pub business_rules_found: Vec<String>,
    pub business_processes_found: Vec<ProcessMatch>,
    pub recommendations: Vec<String>,
}

pub struct DomainConceptIdentifier {
    min_score: f64,
    max_results: usize,
}

impl Default for DomainConceptIdentifier {
    fn default() -> Self {
        Self::new(
            crate::config::default_domain_concept_min_score(),
            crate::config::default_max_domain_results(),
        )
    }
}

impl DomainConceptIdentifier {
    pub fn new(min_score: f64, max_results: usize) -> Self {
        Self {
            min_score,
            max_results,
        }
    }

    /// Domains above the minimum score, best first, at most `max_results`.
    pub fn identify(&self, file: &FileElements) -> Vec<DomainAnalysisResult> {
        let text = file.aggregate_text();
        let lower = text.to_lowercase();

        let mut results: Vec<DomainAnalysisResult> = domain_profiles()
            .iter()
            .map(|profile| analyze_domain(profile, &text, &lower))
            .filter(|result| result.confidence > self.min_score)
            .collect();

        // Stable sort keeps catalog order for equal confidences
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(self.max_results);
        results
    }
}

/// Score one profile against the aggregate text.
pub fn analyze_domain(profile: &DomainProfile, text: &str, lower: &str) -> DomainAnalysisResult {
    let entities_found: Vec<EntityMatch> = profile
        .entities
        .iter()
        .filter_map(|entity| {
            let name_hits = count_occurrences(lower, entity.name) as f64;
            let alias_hits: usize = entity
                .aliases
                .iter()
                .map(|alias| count_occurrences(lower, alias))
                .sum();
            let occurrences = name_hits + ALIAS_WEIGHT * alias_hits as f64;
            (occurrences > 0.0).then(|| EntityMatch {
                name: entity.name.to_string(),
                occurrences,
                confidence: (occurrences / OCCURRENCE_SATURATION).min(1.0),
                weight: entity.weight,
            })
        })
        .collect();

    let mut total_score: f64 = entities_found.iter().map(|e| e.weight * e.confidence).sum();

    let relationships_found: Vec<RelationshipMatch> = if entities_found.len() >= 2 {
        profile
            .relationships
            .iter()
            .filter(|rel| {
                let found = |name: &str| entities_found.iter().any(|e| e.name == name);
                found(rel.from) && found(rel.to)
            })
            .filter(|rel| rel.is_confirmed(text))
            .map(|rel| RelationshipMatch {
                from: rel.from.to_string(),
                to: rel.to.to_string(),
                relationship_type: rel.relationship_type.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };
    total_score += RELATIONSHIP_BONUS * relationships_found.len() as f64;

    let business_rules_found: Vec<String> = profile
        .business_rule_ids
        .iter()
        .filter(|id| rule_confirmed(id, text))
        .map(|id| id.to_string())
        .collect();
    total_score += BUSINESS_RULE_BONUS * business_rules_found.len() as f64;

    let business_processes_found: Vec<ProcessMatch> = profile
        .processes
        .iter()
        .filter_map(|process| {
            let steps_found: Vec<String> = process
                .steps
                .iter()
                .filter(|step| lower.contains(*step))
                .map(|step| step.to_string())
                .collect();
            if steps_found.is_empty() {
                return None;
            }
            let total_steps = process.steps.len();
            Some(ProcessMatch {
                name: process.name.to_string(),
                confidence: (steps_found.len() as f64 / total_steps as f64 * 2.0).min(1.0),
                steps_found,
                total_steps,
            })
        })
        .collect();

    let total_weight = profile.total_weight();
    let confidence = if total_weight > 0.0 {
        (total_score / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let recommendations = domain_recommendations(
        profile.name,
        confidence,
        &relationships_found,
        &business_rules_found,
        &business_processes_found,
    );

    DomainAnalysisResult {
        domain: profile.name.to_string(),
        confidence,
        entities_found,
        relationships_found,
        business_rules_found,
        business_processes_found,
        recommendations,
    }
}

fn domain_recommendations(
    domain: &str,
    confidence: f64,
    relationships: &[RelationshipMatch],
    rules: &[String],
    processes: &[ProcessMatch],
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if confidence >= 0.8 {
        recommendations.push(format!(
            "Extract the {domain} concepts into a dedicated bounded context"
        ));
    }
    if relationships.len() >= 2 {
        recommendations.push(format!(
            "Model the {} confirmed {domain} relationships as explicit aggregates",
            relationships.len()
        ));
    }
    if let Some(process) = processes.iter().find(|p| p.steps_found.len() == p.total_steps) {
        recommendations.push(format!(
            "Orchestrate the {} process through a dedicated workflow service",
            process.name
        ));
    }
    if !rules.is_empty() {
        recommendations.push(format!(
            "Centralize the {domain} business rules ({}) in a domain service",
            rules.join(", ")
        ));
    }
    recommendations
}
