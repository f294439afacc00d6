mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration for the semantic analysis engine.
///
/// Every field is optional in `.semmap.toml`:
///
/// ```toml
/// business_logic_threshold = 0.7
/// domain_concept_min_score = 0.6
/// cross_cutting_concern_threshold = 0.8
///
/// [concerns]
/// threshold = 0.7
/// min_occurrences = 3
/// min_affected_elements = 2
///
/// [rules]
/// max_rules_for_relationships = 250
///
/// [domains]
/// max_results = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// Minimum score for an element to be classified business or infrastructure
    #[serde(default = "default_business_logic_threshold")]
    pub business_logic_threshold: f64,

    /// Domains at or below this confidence are dropped
    #[serde(default = "default_domain_concept_min_score")]
    pub domain_concept_min_score: f64,

    /// Engine-level cut-off for surfacing concern recommendations.
    /// Independent of `concerns.threshold`.
    #[serde(default = "default_cross_cutting_concern_threshold")]
    pub cross_cutting_concern_threshold: f64,

    #[serde(default)]
    pub concerns: ConcernDetectionConfig,

    #[serde(default)]
    pub rules: RuleExtractionConfig,

    #[serde(default)]
    pub domains: DomainIdentificationConfig,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            business_logic_threshold: default_business_logic_threshold(),
            domain_concept_min_score: default_domain_concept_min_score(),
            cross_cutting_concern_threshold: default_cross_cutting_concern_threshold(),
            concerns: ConcernDetectionConfig::default(),
            rules: RuleExtractionConfig::default(),
            domains: DomainIdentificationConfig::default(),
        }
    }
}

/// Gates a concern must pass to count as cross-cutting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcernDetectionConfig {
    #[serde(default = "default_concern_threshold")]
    pub threshold: f64,

    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,

    #[serde(default = "default_min_affected_elements")]
    pub min_affected_elements: usize,
}

impl Default for ConcernDetectionConfig {
    fn default() -> Self {
        Self {
            threshold: default_concern_threshold(),
            min_occurrences: default_min_occurrences(),
            min_affected_elements: default_min_affected_elements(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExtractionConfig {
    /// Rules beyond this count are left out of the pairwise relationship scan
    #[serde(default = "default_max_rules_for_relationships")]
    pub max_rules_for_relationships: usize,
}

impl Default for RuleExtractionConfig {
    fn default() -> Self {
        Self {
            max_rules_for_relationships: default_max_rules_for_relationships(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainIdentificationConfig {
    #[serde(default = "default_max_domain_results")]
    pub max_results: usize,
}

impl Default for DomainIdentificationConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_domain_results(),
        }
    }
}

pub fn default_business_logic_threshold() -> f64 {
    0.7
}
pub fn default_domain_concept_min_score() -> f64 {
    0.6
}
pub fn default_cross_cutting_concern_threshold() -> f64 {
    0.8
}
pub fn default_concern_threshold() -> f64 {
    0.7
}
pub fn default_min_occurrences() -> usize {
    3
}
pub fn default_min_affected_elements() -> usize {
    2
}
pub fn default_max_rules_for_relationships() -> usize {
    250
}
pub fn default_max_domain_results() -> usize {
    5
}

impl SemanticConfig {
    /// Check every threshold and count, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("business_logic_threshold", self.business_logic_threshold),
            ("domain_concept_min_score", self.domain_concept_min_score),
            (
                "cross_cutting_concern_threshold",
                self.cross_cutting_concern_threshold,
            ),
            ("concerns.threshold", self.concerns.threshold),
        ];
        let count_fields = [
            ("concerns.min_occurrences", self.concerns.min_occurrences),
            (
                "concerns.min_affected_elements",
                self.concerns.min_affected_elements,
            ),
            (
                "rules.max_rules_for_relationships",
                self.rules.max_rules_for_relationships,
            ),
            ("domains.max_results", self.domains.max_results),
        ];

        let problems: Vec<String> = unit_fields
            .iter()
            .filter(|(_, value)| !(0.0..=1.0).contains(value))
            .map(|(field, value)| format!("{field} must be within [0, 1], got {value}"))
            .chain(
                count_fields
                    .iter()
                    .filter(|(_, value)| *value == 0)
                    .map(|(field, _)| format!("{field} must be at least 1")),
            )
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::configuration(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SemanticConfig::default();
        assert_eq!(config.business_logic_threshold, 0.7);
        assert_eq!(config.domain_concept_min_score, 0.6);
        assert_eq!(config.cross_cutting_concern_threshold, 0.8);
        assert_eq!(config.concerns.threshold, 0.7);
        assert_eq!(config.concerns.min_occurrences, 3);
        assert_eq!(config.concerns.min_affected_elements, 2);
        assert_eq!(config.domains.max_results, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let config = SemanticConfig {
            business_logic_threshold: 1.5,
            concerns: ConcernDetectionConfig {
                min_occurrences: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("business_logic_threshold"));
        assert!(err.contains("concerns.min_occurrences"));
    }
}
