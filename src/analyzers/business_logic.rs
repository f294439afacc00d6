//! Business logic versus infrastructure classification.
//!
//! Each function and class is scored against the language's business and
//! infrastructure indicator sets. An element lands in one bucket only when
//! its winning score also clears the configured threshold; everything else
//! is `Mixed`.

use crate::catalogs::{indicators_for, LanguageIndicators};
use crate::core::{CodeElement, ElementKind, FileElements};
use crate::patterns::{score_sets, IndicatorSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Business,
    Infrastructure,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedElement {
    pub kind: ElementKind,
    pub name: String,
    pub business_score: f64,
    pub infrastructure_score: f64,
    pub classification: Classification,
    /// Indicator categories that contributed to either score
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessLogicClassification {
    pub business: Vec<ClassifiedElement>,
    pub infrastructure: Vec<ClassifiedElement>,
    pub mixed: Vec<ClassifiedElement>,
    pub business_ratio: f64,
    pub infrastructure_ratio: f64,
}

impl BusinessLogicClassification {
    pub fn total(&self) -> usize {
        self.business.len() + self.infrastructure.len() + self.mixed.len()
    }
}

pub struct BusinessLogicClassifier {
    threshold: f64,
}

impl Default for BusinessLogicClassifier {
    fn default() -> Self {
        Self::new(crate::config::default_business_logic_threshold())
    }
}

impl BusinessLogicClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn classify(&self, file: &FileElements) -> BusinessLogicClassification {
        let indicators = indicators_for(file.language);

        let mut business = Vec::new();
        let mut infrastructure = Vec::new();
        let mut mixed = Vec::new();

        for element in file.behavioral_elements() {
            let classified = self.classify_element(element, indicators);
            match classified.classification {
                Classification::Business => business.push(classified),
                Classification::Infrastructure => infrastructure.push(classified),
                Classification::Mixed => mixed.push(classified),
            }
        }

        let total = business.len() + infrastructure.len() + mixed.len();
        let ratio = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        BusinessLogicClassification {
            business_ratio: ratio(business.len()),
            infrastructure_ratio: ratio(infrastructure.len()),
            business,
            infrastructure,
            mixed,
        }
    }

    fn classify_element(
        &self,
        element: &CodeElement,
        indicators: &LanguageIndicators,
    ) -> ClassifiedElement {
        let text = if element.name().is_empty() && element.body_text().is_empty() {
            String::new()
        } else {
            element.match_text()
        };

        let business_score = score_sets(&indicators.business, &text);
        let infrastructure_score = score_sets(&indicators.infrastructure, &text);

        ClassifiedElement {
            kind: element.kind(),
            name: element.name().to_string(),
            business_score,
            infrastructure_score,
            classification: self.decide(business_score, infrastructure_score),
            indicators: contributing_categories(&text, indicators),
        }
    }

    fn decide(&self, business: f64, infrastructure: f64) -> Classification {
        if business > infrastructure && business > self.threshold {
            Classification::Business
        } else if infrastructure > business && infrastructure > self.threshold {
            Classification::Infrastructure
        } else {
            Classification::Mixed
        }
    }
}

fn contributing_categories(text: &str, indicators: &LanguageIndicators) -> Vec<String> {
    let hits = |sets: &[IndicatorSet]| -> Vec<String> {
        sets.iter()
            .filter(|set| set.raw_score(text) > 0.0)
            .map(|set| set.category.to_string())
            .collect()
    };
    let mut categories = hits(&indicators.business);
    categories.extend(hits(&indicators.infrastructure));
    categories
}
