//! Cross-cutting concern detection.
//!
//! A concern is reported only when it is both frequent and scattered: enough
//! raw occurrences across the file, enough distinct elements touched, and a
//! cross-cutting score at or above the configured threshold.

mod plan;

pub use plan::{
    build_refactoring_plan, summarize, ConcernSummary, RefactoringPhase, RefactoringPlan,
};

use crate::catalogs::{concern_definitions, strategy, ConcernDefinition, RefactoringStrategy, Severity};
use crate::config::ConcernDetectionConfig;
use crate::core::{CodeElement, ElementKind, FileElements, Priority};
use crate::patterns::{snippet, TextMatcher};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const SNIPPET_RADIUS: usize = 40;
const OCCURRENCE_WEIGHT_CAP: f64 = 0.5;
const OCCURRENCE_DIVISOR: f64 = 20.0;
const SCATTER_PENALTY: f64 = 0.5;
const HOTSPOT_FLOOR: usize = 3;
const HIGH_SCORE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedElement {
    pub kind: ElementKind,
    pub name: String,
    pub match_count: usize,
    pub patterns_matched: Vec<usize>,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotIntensity {
    Low,
    Medium,
    High,
}

impl HotspotIntensity {
    /// `None` when the count does not make a hotspot.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            c if c > 10 => Some(Self::High),
            c if c > 6 => Some(Self::Medium),
            c if c > HOTSPOT_FLOOR => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub kind: ElementKind,
    pub name: String,
    pub match_count: usize,
    pub intensity: HotspotIntensity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternOccurrences {
    pub pattern_index: usize,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernDistribution {
    pub by_element_kind: BTreeMap<ElementKind, usize>,
    pub by_pattern: Vec<PatternOccurrences>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernRecommendation {
    pub concern: String,
    pub priority: Priority,
    pub score: f64,
    pub strategy: RefactoringStrategy,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernResult {
    pub name: String,
    pub category: String,
    pub severity: Severity,
    pub description: String,
    pub total_occurrences: usize,
    pub affected_elements: Vec<AffectedElement>,
    pub cross_cutting_score: f64,
    pub distribution: ConcernDistribution,
    pub hotspots: Vec<Hotspot>,
    pub recommendation: Option<ConcernRecommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernRelationshipKind {
    CoOccurrence,
    CategoryRelated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernRelationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: ConcernRelationshipKind,
    pub strength: f64,
    pub shared_elements: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossCuttingAnalysis {
    pub concerns: Vec<ConcernResult>,
    pub relationships: Vec<ConcernRelationship>,
    pub recommendations: Vec<ConcernRecommendation>,
    pub refactoring_plan: RefactoringPlan,
    pub summary: ConcernSummary,
}

#[derive(Debug, Clone, Default)]
pub struct CrossCuttingConcernDetector {
    config: ConcernDetectionConfig,
}

impl CrossCuttingConcernDetector {
    pub fn new(config: ConcernDetectionConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, file: &FileElements) -> CrossCuttingAnalysis {
        let concerns = self.detect(file);
        let relationships = find_concern_relationships(&concerns);

        let mut recommendations: Vec<ConcernRecommendation> = concerns
            .iter()
            .filter_map(|c| c.recommendation.clone())
            .collect();
        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));

        let refactoring_plan = build_refactoring_plan(&concerns);
        let summary = summarize(&concerns);

        CrossCuttingAnalysis {
            concerns,
            relationships,
            recommendations,
            refactoring_plan,
            summary,
        }
    }

    /// Qualifying concerns in catalog order.
    pub fn detect(&self, file: &FileElements) -> Vec<ConcernResult> {
        let aggregate = file.aggregate_text();
        concern_definitions()
            .iter()
            .filter_map(|definition| self.evaluate(definition, file, &aggregate))
            .collect()
    }

    fn evaluate(
        &self,
        definition: &ConcernDefinition,
        file: &FileElements,
        aggregate: &str,
    ) -> Option<ConcernResult> {
        let by_pattern: Vec<PatternOccurrences> = definition
            .patterns
            .iter()
            .enumerate()
            .map(|(pattern_index, matcher)| PatternOccurrences {
                pattern_index,
                occurrences: matcher.count(aggregate),
            })
            .collect();
        let total_occurrences: usize = by_pattern.iter().map(|p| p.occurrences).sum();

        let affected_elements = affected_elements(definition, &file.elements);
        let affected = affected_elements.len();
        let score = cross_cutting_score(
            affected,
            file.elements.len(),
            total_occurrences,
            self.config.min_affected_elements,
        );

        let qualifies = total_occurrences >= self.config.min_occurrences
            && affected >= self.config.min_affected_elements
            && score >= self.config.threshold;
        if !qualifies {
            return None;
        }

        tracing::debug!(
            concern = definition.name,
            occurrences = total_occurrences,
            affected,
            score,
            "Cross-cutting concern detected"
        );

        let mut by_element_kind = BTreeMap::new();
        for element in &affected_elements {
            *by_element_kind.entry(element.kind).or_insert(0) += 1;
        }

        let mut hotspots: Vec<Hotspot> = affected_elements
            .iter()
            .filter_map(|element| {
                HotspotIntensity::from_count(element.match_count).map(|intensity| Hotspot {
                    kind: element.kind,
                    name: element.name.clone(),
                    match_count: element.match_count,
                    intensity,
                })
            })
            .collect();
        hotspots.sort_by(|a, b| b.match_count.cmp(&a.match_count));

        let recommendation = match strategy(definition.refactoring_strategy_id) {
            Some(found) => Some(ConcernRecommendation {
                concern: definition.name.to_string(),
                priority: concern_priority(definition.severity, score),
                score,
                strategy: found.clone(),
            }),
            None => {
                tracing::warn!(
                    concern = definition.name,
                    strategy = definition.refactoring_strategy_id,
                    "Unknown refactoring strategy"
                );
                None
            }
        };

        Some(ConcernResult {
            name: definition.name.to_string(),
            category: definition.category.to_string(),
            severity: definition.severity,
            description: definition.description.to_string(),
            total_occurrences,
            affected_elements,
            cross_cutting_score: score,
            distribution: ConcernDistribution {
                by_element_kind,
                by_pattern,
            },
            hotspots,
            recommendation,
        })
    }
}

fn element_match_text(element: &CodeElement) -> String {
    match element {
        CodeElement::Variable(v) => v.name.clone(),
        other => other.match_text(),
    }
}

/// One entry per `(kind, name)`, in first-seen order.
fn affected_elements(definition: &ConcernDefinition, elements: &[CodeElement]) -> Vec<AffectedElement> {
    let texts: Vec<String> = elements.iter().map(element_match_text).collect();

    let mut merged: Vec<AffectedElement> = Vec::new();
    for (pattern_index, matcher) in definition.patterns.iter().enumerate() {
        for (element, text) in elements.iter().zip(&texts) {
            let found = matcher.find_all(text);
            let Some(first) = found.first() else {
                continue;
            };

            let existing = merged
                .iter_mut()
                .find(|a| a.kind == element.kind() && a.name == element.name());
            match existing {
                Some(entry) => {
                    entry.match_count += found.len();
                    if !entry.patterns_matched.contains(&pattern_index) {
                        entry.patterns_matched.push(pattern_index);
                    }
                }
                None => merged.push(AffectedElement {
                    kind: element.kind(),
                    name: element.name().to_string(),
                    match_count: found.len(),
                    patterns_matched: vec![pattern_index],
                    context: snippet(text, first.start, first.end, SNIPPET_RADIUS),
                }),
            }
        }
    }

    for entry in &mut merged {
        entry.patterns_matched.sort_unstable();
    }
    merged
}

pub fn cross_cutting_score(
    affected: usize,
    total_elements: usize,
    total_occurrences: usize,
    min_affected_elements: usize,
) -> f64 {
    let spread = if total_elements == 0 {
        0.0
    } else {
        affected as f64 / total_elements as f64
    };
    let volume = (total_occurrences as f64 / OCCURRENCE_DIVISOR).min(OCCURRENCE_WEIGHT_CAP);
    let penalty = if affected < min_affected_elements {
        SCATTER_PENALTY
    } else {
        0.0
    };
    (spread + volume - penalty).clamp(0.0, 1.0)
}

/// Priority from severity, bumped one level for high scores.
pub fn concern_priority(severity: Severity, score: f64) -> Priority {
    let high_score = score >= HIGH_SCORE;
    match (severity, high_score) {
        (Severity::High, true) => Priority::Critical,
        (Severity::High, false) | (Severity::Medium, true) => Priority::High,
        (Severity::Medium, false) | (Severity::Low, true) => Priority::Medium,
        (Severity::Low, false) => Priority::Low,
    }
}

pub fn find_concern_relationships(concerns: &[ConcernResult]) -> Vec<ConcernRelationship> {
    let keys: Vec<BTreeSet<(ElementKind, &str)>> = concerns
        .iter()
        .map(|c| {
            c.affected_elements
                .iter()
                .map(|a| (a.kind, a.name.as_str()))
                .collect()
        })
        .collect();

    let mut relationships = Vec::new();
    for (i, a) in concerns.iter().enumerate() {
        for (j, b) in concerns.iter().enumerate().skip(i + 1) {
            let shared = keys[i].intersection(&keys[j]).count();
            let smaller = keys[i].len().min(keys[j].len());
            let relation = if shared > 0 && smaller > 0 {
                Some((ConcernRelationshipKind::CoOccurrence, shared as f64 / smaller as f64))
            } else if a.category == b.category {
                Some((ConcernRelationshipKind::CategoryRelated, 0.5))
            } else {
                None
            };

            if let Some((kind, strength)) = relation {
                relationships.push(ConcernRelationship {
                    from: a.name.clone(),
                    to: b.name.clone(),
                    kind,
                    strength,
                    shared_elements: shared,
                });
            }
        }
    }
    relationships
}
