//! End-to-end tests for the semantic analysis engine.
//!
//! Inputs are built as the parser would hand them over: a JSON parse result
//! carrying a normalized AST.

use pretty_assertions::assert_eq;
use semmap::analyzers::rules::RuleType;
use semmap::catalogs::Severity;
use semmap::{FileAnalysis, ParseResult, SemanticAnalysisEngine, SemanticAnalysisResult};
use serde_json::{json, Value};

fn parse(value: Value) -> ParseResult {
    serde_json::from_value(value).expect("valid parse result")
}

fn analyze(value: Value) -> SemanticAnalysisResult {
    match SemanticAnalysisEngine::default().analyze(&parse(value)) {
        FileAnalysis::Success(result) => *result,
        FileAnalysis::Failure(failure) => panic!("analysis failed: {}", failure.error),
    }
}

fn logging_class(name: &str) -> Value {
    json!({
        "name": name,
        "methods": [
            {"name": "logInfo", "body": "console.log('info: ' + message)"},
            {"name": "logError", "body": "console.error('error: ' + message)"},
            {"name": "debugDump", "body": "logger.debug(JSON.stringify(state))"},
            {"name": "warnSlow", "body": "logger.warn('slow request')"},
            {"name": "logRequest", "body": "console.info(request.url)"}
        ]
    })
}

#[test]
fn test_pricing_function_yields_rules() {
    let result = analyze(json!({
        "success": true,
        "language": "javascript",
        "filePath": "src/pricing.js",
        "ast": {
            "functions": [{
                "name": "calculateTotalPrice",
                "body": "if (amount > 100) { return amount * taxRate; }"
            }]
        }
    }));

    let rules = &result.business_rules.rules;
    assert!(rules.iter().any(|r| r.rule_type == RuleType::Conditional));
    assert!(rules.iter().any(|r| r.rule_type == RuleType::Calculation));
    for rule in rules {
        assert!(rule.confidence >= 0.5);
        assert!(matches!(
            rule.primary_category.name(),
            "Calculation" | "Conditional"
        ));
    }
}

#[test]
fn test_scattered_logging_is_detected() {
    let result = analyze(json!({
        "success": true,
        "language": "javascript",
        "filePath": "src/services.js",
        "ast": {
            "classes": [
                logging_class("Logger"),
                logging_class("OrderService"),
                logging_class("InvoiceService"),
                logging_class("ShippingService")
            ]
        }
    }));

    let logging = result
        .cross_cutting_concerns
        .concerns
        .iter()
        .find(|c| c.name == "Logging")
        .expect("logging should qualify");
    assert_eq!(logging.severity, Severity::Medium);
    assert!(logging.affected_elements.len() >= 4);
    assert!(result.semantic_scores.separation_of_concerns_score <= 90);
}

#[test]
fn test_keyword_free_file() {
    let result = analyze(json!({
        "success": true,
        "language": "python",
        "filePath": "util.py",
        "ast": {
            "functions": [
                {"name": "foo", "body": "return bar(baz)"},
                {"name": "qux", "body": "pass"}
            ]
        }
    }));

    assert_eq!(result.semantic_scores.business_logic_score, 0);
    assert_eq!(result.semantic_scores.domain_clarity_score, 0);
    assert!(result.domains.is_empty());
    assert!(result.cross_cutting_concerns.concerns.is_empty());
}

#[test]
fn test_failed_parse_is_returned_exactly() {
    let output = SemanticAnalysisEngine::default().analyze(&parse(json!({
        "success": false,
        "error": "x",
        "filePath": "f.js"
    })));
    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({"success": false, "error": "x", "filePath": "f.js"})
    );
}

#[test]
fn test_success_output_contract() {
    let output = SemanticAnalysisEngine::default().analyze(&parse(json!({
        "success": true,
        "language": "TypeScript",
        "filePath": "src/cart.ts",
        "ast": {"functions": [{"name": "addToCart", "body": "cart.items.push(product)"}]}
    })));
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["filePath"], "src/cart.ts");
    assert_eq!(value["language"], "TypeScript");
    assert!(value["timestamp"].is_string());
    for key in [
        "businessLogic",
        "domains",
        "businessRules",
        "crossCuttingConcerns",
        "semanticScores",
        "recommendations",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let input = parse(json!({
        "success": true,
        "language": "javascript",
        "filePath": "src/orders.js",
        "ast": {
            "functions": [
                {"name": "placeOrder", "body": "if (customer.balance < order.total) { throw new Error('insufficient'); } payment.charge(order.total); logger.info('placed');"},
                {"name": "cancelOrder", "body": "if (order.status === 'pending') { order.status = 'cancelled'; logger.info('cancelled'); }"}
            ],
            "variables": [{"name": "TAX_RATE", "value": "0.2"}],
            "strings": ["Order placed"]
        }
    }));
    let engine = SemanticAnalysisEngine::default();

    let strip = |analysis: FileAnalysis| {
        let mut value = serde_json::to_value(analysis).unwrap();
        value.as_object_mut().unwrap().remove("timestamp");
        value
    };
    assert_eq!(strip(engine.analyze(&input)), strip(engine.analyze(&input)));
}

#[test]
fn test_malformed_ast_entry_fails_cleanly() {
    let output = SemanticAnalysisEngine::default().analyze(&parse(json!({
        "success": true,
        "language": "python",
        "filePath": "broken.py",
        "ast": {"functions": [{"body": "pass"}]}
    })));
    match output {
        FileAnalysis::Failure(failure) => {
            assert!(!failure.success);
            assert_eq!(failure.file_path, "broken.py");
            assert!(failure.error.contains("name"));
        }
        FileAnalysis::Success(_) => panic!("missing name should fail"),
    }
}
