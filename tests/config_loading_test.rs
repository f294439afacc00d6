use indoc::indoc;
use semmap::config::{load_config_from_path, parse_and_validate_config, CONFIG_FILE_NAME};
use semmap::{Error, FileAnalysis, ParseResult, SemanticAnalysisEngine, SemanticConfig};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_config_from_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        indoc! {"
            business_logic_threshold = 0.5
            domain_concept_min_score = 0.4
            cross_cutting_concern_threshold = 0.9

            [concerns]
            threshold = 0.6
            min_occurrences = 2
            min_affected_elements = 2

            [rules]
            max_rules_for_relationships = 100

            [domains]
            max_results = 3
        "},
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.business_logic_threshold, 0.5);
    assert_eq!(config.domain_concept_min_score, 0.4);
    assert_eq!(config.concerns.min_occurrences, 2);
    assert_eq!(config.rules.max_rules_for_relationships, 100);
    assert_eq!(config.domains.max_results, 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config_from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_invalid_toml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[concerns\nthreshold = 0.5").unwrap();

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}

#[test]
fn test_zero_counts_are_rejected() {
    let err = parse_and_validate_config(indoc! {"
        [domains]
        max_results = 0
    "})
    .unwrap_err();
    assert!(err.to_string().contains("domains.max_results"));
}

#[test]
fn test_config_changes_engine_behavior() {
    let lenient: SemanticConfig = parse_and_validate_config(indoc! {"
        [concerns]
        threshold = 0.1
        min_occurrences = 1
        min_affected_elements = 1
    "})
    .unwrap();

    let input = ParseResult::parsed(
        "single.js",
        "javascript",
        json!({"functions": [
            {"name": "boot", "body": "console.log('up'); console.log('ready');"},
            {"name": "noop", "body": "return;"}
        ]}),
    );

    let concern_names = |engine: &SemanticAnalysisEngine| match engine.analyze(&input) {
        FileAnalysis::Success(result) => result
            .cross_cutting_concerns
            .concerns
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>(),
        FileAnalysis::Failure(failure) => panic!("{}", failure.error),
    };

    assert!(concern_names(&SemanticAnalysisEngine::default()).is_empty());
    assert!(concern_names(&SemanticAnalysisEngine::new(lenient)).contains(&"Logging".to_string()));
}
