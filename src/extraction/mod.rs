//! Input contract and element extraction.
//!
//! Parsing source text is somebody else's job. The engine receives a
//! [`ParseResult`] from the language parsers and turns its normalized AST
//! into [`FileElements`] through an [`ElementExtractor`].

use crate::core::{CodeElement, Error, FileElements, FunctionElement, Language, Result};
use crate::observability::current_phase;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A successfully parsed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub file_path: String,
    /// Language identifier as reported by the parser
    pub language: String,
    pub ast: Value,
    #[serde(default)]
    pub metadata: Value,
}

/// Outcome reported by the upstream parser for one file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawParseResult")]
pub enum ParseResult {
    Parsed(ParsedFile),
    Failed { error: String, file_path: String },
}

impl ParseResult {
    pub fn parsed(file_path: impl Into<String>, language: impl Into<String>, ast: Value) -> Self {
        Self::Parsed(ParsedFile {
            file_path: file_path.into(),
            language: language.into(),
            ast,
            metadata: Value::Null,
        })
    }

    pub fn failed(file_path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        match self {
            Self::Parsed(parsed) => &parsed.file_path,
            Self::Failed { file_path, .. } => file_path,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParseResult {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    ast: Value,
    #[serde(default)]
    metadata: Value,
    #[serde(default)]
    language: String,
    #[serde(default)]
    file_path: String,
    #[serde(default)]
    error: Option<String>,
}

impl From<RawParseResult> for ParseResult {
    fn from(raw: RawParseResult) -> Self {
        if raw.success {
            ParseResult::Parsed(ParsedFile {
                file_path: raw.file_path,
                language: raw.language,
                ast: raw.ast,
                metadata: raw.metadata,
            })
        } else {
            ParseResult::Failed {
                error: raw.error.unwrap_or_else(|| "unknown parse error".to_string()),
                file_path: raw.file_path,
            }
        }
    }
}

/// Converts a parsed file into normalized code elements.
pub trait ElementExtractor: Send + Sync {
    fn extract(&self, parsed: &ParsedFile) -> Result<FileElements>;
}

/// Reads the language-neutral AST shape emitted by the parsers:
///
/// ```json
/// {
///   "functions": [{"name": "f", "body": "..."}],
///   "classes": [{"name": "C", "body": "...", "methods": [{"name": "m", "body": "..."}]}],
///   "variables": [{"name": "v", "value": "..."}],
///   "strings": ["Order shipped"]
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizedAstExtractor;

#[derive(Debug, Deserialize)]
struct NormalizedAst {
    #[serde(default)]
    functions: Vec<AstFunction>,
    #[serde(default)]
    classes: Vec<AstClass>,
    #[serde(default)]
    variables: Vec<AstVariable>,
    #[serde(default)]
    strings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AstFunction {
    name: String,
    #[serde(default, alias = "bodyText")]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AstClass {
    name: String,
    #[serde(default, alias = "bodyText")]
    body: Option<String>,
    #[serde(default)]
    methods: Vec<AstFunction>,
}

#[derive(Debug, Deserialize)]
struct AstVariable {
    name: String,
    #[serde(default, alias = "bodyText", alias = "init")]
    value: Option<String>,
}

impl From<AstFunction> for FunctionElement {
    fn from(f: AstFunction) -> Self {
        FunctionElement {
            name: f.name,
            body_text: f.body.unwrap_or_default(),
        }
    }
}

fn class_element(class: AstClass) -> CodeElement {
    let methods: Vec<FunctionElement> = class.methods.into_iter().map(Into::into).collect();
    let body_text = match class.body {
        Some(body) if !body.is_empty() => body,
        // Without a class body the methods stand in for it
        _ => methods
            .iter()
            .map(|m| format!("{} {}", m.name, m.body_text))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    CodeElement::class(class.name, body_text, methods)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ElementExtractor for NormalizedAstExtractor {
    fn extract(&self, parsed: &ParsedFile) -> Result<FileElements> {
        if !parsed.ast.is_object() {
            return Err(Error::extraction(
                &parsed.file_path,
                current_phase(),
                format!("expected AST object, found {}", json_kind(&parsed.ast)),
            ));
        }

        let ast: NormalizedAst = serde_json::from_value(parsed.ast.clone()).map_err(|e| {
            Error::extraction(
                &parsed.file_path,
                current_phase(),
                format!("malformed element: {e}"),
            )
        })?;

        let mut elements = Vec::with_capacity(
            ast.functions.len() + ast.classes.len() + ast.variables.len(),
        );
        elements.extend(
            ast.functions
                .into_iter()
                .map(|f| CodeElement::Function(f.into())),
        );
        elements.extend(ast.classes.into_iter().map(class_element));
        elements.extend(
            ast.variables
                .into_iter()
                .map(|v| CodeElement::variable(v.name, v.value.unwrap_or_default())),
        );

        tracing::trace!(
            file = %parsed.file_path,
            elements = elements.len(),
            "extracted elements"
        );

        Ok(FileElements::new(
            parsed.file_path.clone(),
            Language::from_name(&parsed.language),
            elements,
        )
        .with_string_literals(ast.strings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ElementKind;
    use serde_json::json;

    #[test]
    fn test_failed_parse_result_deserializes() {
        let result: ParseResult =
            serde_json::from_value(json!({"success": false, "error": "x", "filePath": "f.js"}))
                .unwrap();
        assert_eq!(result, ParseResult::failed("f.js", "x"));
    }

    #[test]
    fn test_successful_parse_result_deserializes() {
        let result: ParseResult = serde_json::from_value(json!({
            "success": true,
            "ast": {"functions": []},
            "metadata": {"lines": 3},
            "language": "javascript",
            "filePath": "a.js"
        }))
        .unwrap();
        match result {
            ParseResult::Parsed(parsed) => {
                assert_eq!(parsed.language, "javascript");
                assert_eq!(parsed.metadata["lines"], 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_extracts_all_element_kinds() {
        let parsed = ParsedFile {
            file_path: "shop.js".into(),
            language: "javascript".into(),
            ast: json!({
                "functions": [{"name": "total", "body": "return a + b;"}],
                "classes": [{"name": "Cart", "methods": [{"name": "add", "body": "this.items.push(x)"}]}],
                "variables": [{"name": "TAX", "value": "0.2"}],
                "imports": ["lodash"],
                "strings": ["Cart is empty"]
            }),
            metadata: Value::Null,
        };
        let file = NormalizedAstExtractor.extract(&parsed).unwrap();
        let kinds: Vec<ElementKind> = file.elements.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Function, ElementKind::Class, ElementKind::Variable]
        );
        assert_eq!(file.language, Language::JavaScript);
        assert_eq!(file.elements[1].body_text(), "add this.items.push(x)");
        assert_eq!(file.string_literals, vec!["Cart is empty".to_string()]);
    }

    #[test]
    fn test_missing_name_is_extraction_error() {
        let parsed = ParsedFile {
            file_path: "bad.py".into(),
            language: "python".into(),
            ast: json!({"functions": [{"body": "pass"}]}),
            metadata: Value::Null,
        };
        let err = NormalizedAstExtractor.extract(&parsed).unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
        assert!(err.user_message().contains("name"));
    }

    #[test]
    fn test_non_object_ast_is_extraction_error() {
        let parsed = ParsedFile {
            file_path: "bad.py".into(),
            language: "python".into(),
            ast: json!([1, 2]),
            metadata: Value::Null,
        };
        let err = NormalizedAstExtractor.extract(&parsed).unwrap_err();
        assert_eq!(err.user_message(), "expected AST object, found array");
    }
}
