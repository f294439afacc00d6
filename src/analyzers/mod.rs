//! The four semantic analyzers.
//!
//! Each analyzer is a pure function of a [`FileElements`](crate::core::FileElements)
//! value and the static catalogs. They share no state and may run in any order.

pub mod business_logic;
pub mod concerns;
pub mod domain;
pub mod rules;

pub use business_logic::{
    BusinessLogicClassification, BusinessLogicClassifier, Classification, ClassifiedElement,
};
pub use concerns::{ConcernResult, CrossCuttingAnalysis, CrossCuttingConcernDetector};
pub use domain::{DomainAnalysisResult, DomainConceptIdentifier};
pub use rules::{BusinessRuleExtractor, ExtractedRule, RuleAnalysis};
