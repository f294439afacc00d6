//! Static domain knowledge used by the analyzers.
//!
//! Every table is built once per process behind a `Lazy` and shared
//! read-only across threads. Nothing in here is mutated after load.

pub mod concerns;
pub mod domains;
pub mod indicators;
pub mod rules;
pub mod strategies;

use serde::{Deserialize, Serialize};

pub use concerns::{concern_definitions, ConcernDefinition};
pub use domains::{
    business_rule_patterns, domain_profiles, DomainProfile, EntityDefinition, ProcessDefinition,
    RelationshipDefinition,
};
pub use indicators::{indicators_for, LanguageIndicators};
pub use rules::{
    business_keywords, complexity_indicators, construct_patterns, domain_rule_patterns,
    known_states, rule_categories, ComplexityIndicator, ConstructPattern, DomainRulePattern,
    RuleCategory, RuleType,
};
pub use strategies::{strategy, RefactoringStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Estimated refactoring effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    pub fn weeks(self) -> u32 {
        match self {
            Self::Low => 2,
            Self::Medium => 4,
            Self::High => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_weeks() {
        assert_eq!(Effort::Low.weeks(), 2);
        assert_eq!(Effort::Medium.weeks(), 4);
        assert_eq!(Effort::High.weeks(), 8);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
