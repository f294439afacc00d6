//! Heuristic semantic analysis of source files.
//!
//! Given a language-agnostic extraction of a file's functions, classes and
//! variables, `semmap` separates business logic from infrastructure,
//! identifies business domains, extracts business rules and detects
//! cross-cutting concerns, then folds everything into a scored result with
//! refactoring recommendations.
//!
//! ```
//! use semmap::{ParseResult, SemanticAnalysisEngine};
//! use serde_json::json;
//!
//! let engine = SemanticAnalysisEngine::default();
//! let input = ParseResult::parsed(
//!     "pricing.js",
//!     "javascript",
//!     json!({"functions": [{"name": "calculateTotalPrice",
//!                           "body": "if (amount > 100) { return amount * taxRate; }"}]}),
//! );
//! let result = engine.analyze(&input);
//! assert!(result.is_success());
//! ```

pub mod analyzers;
pub mod batch;
pub mod catalogs;
pub mod config;
pub mod core;
pub mod engine;
pub mod extraction;
pub mod observability;
pub mod patterns;

pub use crate::core::{
    CodeElement, ElementKind, Error, FileElements, FunctionElement, Language, Priority, Result,
};

pub use crate::analyzers::{
    BusinessLogicClassifier, BusinessRuleExtractor, Classification, CrossCuttingConcernDetector,
    DomainConceptIdentifier,
};

pub use crate::batch::{analyze_batch, BatchReport, BatchSummary};
pub use crate::config::{load_config, load_config_from_path, SemanticConfig};
pub use crate::engine::{
    AnalysisFailure, FileAnalysis, SemanticAnalysisEngine, SemanticAnalysisResult, SemanticScores,
};
pub use crate::extraction::{ElementExtractor, NormalizedAstExtractor, ParseResult, ParsedFile};
pub use crate::patterns::{IndicatorSet, RegexMatcher, TextMatcher};
