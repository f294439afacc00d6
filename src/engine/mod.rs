//! Per-file semantic analysis.
//!
//! [`SemanticAnalysisEngine::analyze`] drives one parse result through the
//! analysis state machine and always returns a [`FileAnalysis`]. Failures at
//! any stage surface as the failure variant; no partial results are produced.

mod scoring;

pub use scoring::{
    compute_scores, engine_recommendations, EngineRecommendation, RecommendationKind,
    SemanticScores,
};

use crate::analyzers::{
    BusinessLogicClassification, BusinessLogicClassifier, BusinessRuleExtractor,
    CrossCuttingAnalysis, CrossCuttingConcernDetector, DomainAnalysisResult,
    DomainConceptIdentifier, RuleAnalysis,
};
use crate::config::SemanticConfig;
use crate::core::{FileElements, Result};
use crate::extraction::{ElementExtractor, NormalizedAstExtractor, ParseResult, ParsedFile};
use crate::observability::{set_current_file, set_phase_persistent, AnalysisPhase};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug_span;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticAnalysisResult {
    pub success: bool,
    pub file_path: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
    pub business_logic: BusinessLogicClassification,
    pub domains: Vec<DomainAnalysisResult>,
    pub business_rules: RuleAnalysis,
    pub cross_cutting_concerns: CrossCuttingAnalysis,
    pub semantic_scores: SemanticScores,
    pub recommendations: Vec<EngineRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFailure {
    pub success: bool,
    pub error: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FileAnalysis {
    Success(Box<SemanticAnalysisResult>),
    Failure(AnalysisFailure),
}

impl FileAnalysis {
    pub fn failure(file_path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failure(AnalysisFailure {
            success: false,
            error: error.into(),
            file_path: file_path.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn file_path(&self) -> &str {
        match self {
            Self::Success(result) => &result.file_path,
            Self::Failure(failure) => &failure.file_path,
        }
    }

    pub fn as_success(&self) -> Option<&SemanticAnalysisResult> {
        match self {
            Self::Success(result) => Some(result.as_ref()),
            Self::Failure(_) => None,
        }
    }
}

pub struct SemanticAnalysisEngine {
    config: SemanticConfig,
    extractor: Box<dyn ElementExtractor>,
    classifier: BusinessLogicClassifier,
    domain_identifier: DomainConceptIdentifier,
    rule_extractor: BusinessRuleExtractor,
    concern_detector: CrossCuttingConcernDetector,
}

impl Default for SemanticAnalysisEngine {
    fn default() -> Self {
        Self::new(SemanticConfig::default())
    }
}

impl SemanticAnalysisEngine {
    pub fn new(config: SemanticConfig) -> Self {
        Self {
            classifier: BusinessLogicClassifier::new(config.business_logic_threshold),
            domain_identifier: DomainConceptIdentifier::new(
                config.domain_concept_min_score,
                config.domains.max_results,
            ),
            rule_extractor: BusinessRuleExtractor::new(config.rules.max_rules_for_relationships),
            concern_detector: CrossCuttingConcernDetector::new(config.concerns.clone()),
            extractor: Box::new(NormalizedAstExtractor),
            config,
        }
    }

    /// Replace the default normalized-AST extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn ElementExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &SemanticConfig {
        &self.config
    }

    pub fn analyze(&self, input: &ParseResult) -> FileAnalysis {
        let _file_guard = set_current_file(input.file_path());
        let span = debug_span!("semantic_analysis", file = %input.file_path());
        let _enter = span.enter();
        set_phase_persistent(AnalysisPhase::Received);

        let outcome = match input {
            ParseResult::Failed { error, file_path } => {
                tracing::debug!(error = %error, "Parser reported failure, skipping analysis");
                Err(FileAnalysis::failure(file_path.clone(), error.clone()))
            }
            ParseResult::Parsed(parsed) => self.run(parsed).map_err(|e| {
                tracing::warn!(
                    file = %parsed.file_path,
                    error = %e,
                    "Semantic analysis failed"
                );
                FileAnalysis::failure(parsed.file_path.clone(), e.user_message())
            }),
        };

        match outcome {
            Ok(result) => {
                set_phase_persistent(AnalysisPhase::Done);
                FileAnalysis::Success(Box::new(result))
            }
            Err(failure) => {
                set_phase_persistent(AnalysisPhase::Failed);
                failure
            }
        }
    }

    fn run(&self, parsed: &ParsedFile) -> Result<SemanticAnalysisResult> {
        set_phase_persistent(AnalysisPhase::ExtractingElements);
        let elements = {
            let _span = debug_span!("extracting_elements").entered();
            self.extractor.extract(parsed)?
        };
        Ok(self.analyze_with_language(&elements, parsed.language.clone()))
    }

    /// Run the analyzers over elements that were extracted elsewhere.
    pub fn analyze_elements(&self, elements: &FileElements) -> SemanticAnalysisResult {
        let _file_guard = set_current_file(&elements.file_path);
        let language = elements.language.to_string().to_lowercase();
        self.analyze_with_language(elements, language)
    }

    fn analyze_with_language(
        &self,
        elements: &FileElements,
        language: String,
    ) -> SemanticAnalysisResult {
        set_phase_persistent(AnalysisPhase::Classifying);
        let business_logic = {
            let _span = debug_span!("classifying").entered();
            self.classifier.classify(elements)
        };

        set_phase_persistent(AnalysisPhase::IdentifyingDomains);
        let domains = {
            let _span = debug_span!("identifying_domains").entered();
            self.domain_identifier.identify(elements)
        };

        set_phase_persistent(AnalysisPhase::ExtractingRules);
        let business_rules = {
            let _span = debug_span!("extracting_rules").entered();
            self.rule_extractor.analyze(elements)
        };

        set_phase_persistent(AnalysisPhase::DetectingConcerns);
        let cross_cutting_concerns = {
            let _span = debug_span!("detecting_concerns").entered();
            self.concern_detector.analyze(elements)
        };

        set_phase_persistent(AnalysisPhase::Scoring);
        let semantic_scores = compute_scores(
            &business_logic,
            &domains,
            &cross_cutting_concerns.concerns,
        );
        let recommendations = engine_recommendations(
            &business_logic,
            &domains,
            &cross_cutting_concerns.concerns,
            self.config.cross_cutting_concern_threshold,
        );

        tracing::debug!(
            file = %elements.file_path,
            elements = elements.elements.len(),
            domains = domains.len(),
            rules = business_rules.rules.len(),
            concerns = cross_cutting_concerns.concerns.len(),
            overall = semantic_scores.overall_semantic_score,
            "Semantic analysis complete"
        );

        SemanticAnalysisResult {
            success: true,
            file_path: elements.file_path.clone(),
            language,
            timestamp: Utc::now(),
            business_logic,
            domains,
            business_rules,
            cross_cutting_concerns,
            semantic_scores,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodeElement, Error, Language};
    use crate::observability::{current_phase, get_current_context};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_parse_failure_is_forwarded_verbatim() {
        let engine = SemanticAnalysisEngine::default();
        let result = engine.analyze(&ParseResult::failed("f.js", "x"));
        assert!(!result.is_success());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "x", "filePath": "f.js"})
        );
    }

    #[test]
    fn test_extraction_error_becomes_failure() {
        let engine = SemanticAnalysisEngine::default();
        let input = ParseResult::parsed("bad.py", "python", json!("not an object"));
        match engine.analyze(&input) {
            FileAnalysis::Failure(failure) => {
                assert_eq!(failure.file_path, "bad.py");
                assert_eq!(failure.error, "expected AST object, found string");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_keyword_free_file_scores_zero() {
        let engine = SemanticAnalysisEngine::default();
        let input = ParseResult::parsed(
            "util.js",
            "javascript",
            json!({"functions": [{"name": "foo", "body": "bar(baz)"}]}),
        );
        let result = engine.analyze(&input);
        let success = result.as_success().expect("success");
        assert_eq!(success.semantic_scores.business_logic_score, 0);
        assert_eq!(success.semantic_scores.domain_clarity_score, 0);
        assert!(success.cross_cutting_concerns.concerns.is_empty());
        assert_eq!(success.language, "javascript");
    }

    #[test]
    fn test_context_is_restored_after_analysis() {
        let engine = SemanticAnalysisEngine::default();
        let before = get_current_context();
        engine.analyze(&ParseResult::failed("f.js", "x"));
        assert_eq!(get_current_context(), before);
    }

    struct RecordingExtractor {
        phases: Arc<Mutex<Vec<AnalysisPhase>>>,
    }

    impl ElementExtractor for RecordingExtractor {
        fn extract(&self, parsed: &ParsedFile) -> Result<FileElements> {
            if let Ok(mut phases) = self.phases.lock() {
                phases.push(current_phase());
            }
            Err(Error::input(&parsed.file_path, "extractor refused"))
        }
    }

    #[test]
    fn test_custom_extractor_runs_in_extraction_phase() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let engine = SemanticAnalysisEngine::default().with_extractor(Box::new(RecordingExtractor {
            phases: Arc::clone(&phases),
        }));
        let result = engine.analyze(&ParseResult::parsed("a.js", "javascript", json!({})));
        match result {
            FileAnalysis::Failure(failure) => assert_eq!(failure.error, "extractor refused"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(*phases.lock().unwrap(), vec![AnalysisPhase::ExtractingElements]);
    }

    #[test]
    fn test_analyze_elements_directly() {
        let engine = SemanticAnalysisEngine::default();
        let file = FileElements::new(
            "pricing.ts",
            Language::TypeScript,
            vec![CodeElement::function(
                "calculateTotalPrice",
                "if (amount > 100) { return amount * taxRate; }",
            )],
        );
        let result = engine.analyze_elements(&file);
        assert!(result.success);
        assert_eq!(result.language, "typescript");
        assert!(!result.business_rules.rules.is_empty());
    }

    #[test]
    fn test_context_is_restored_after_direct_analysis() {
        let engine = SemanticAnalysisEngine::default();
        let file = FileElements::new(
            "orders.js",
            Language::JavaScript,
            vec![CodeElement::function("placeOrder", "logger.info(order.id)")],
        );

        let before = get_current_context();
        engine.analyze_elements(&file);
        assert_eq!(get_current_context(), before);
        assert_eq!(before.phase, None);
    }
}
