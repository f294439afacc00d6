//! Normalized code elements consumed by every analyzer.
//!
//! Elements are produced by an [`ElementExtractor`](crate::extraction::ElementExtractor)
//! and never mutated afterwards. All analyzers read them through the shared
//! accessors on [`CodeElement`].

pub mod errors;

use serde::{Deserialize, Serialize};

pub use errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Unknown,
}

impl Language {
    /// Resolve the language identifier reported by the parser.
    pub fn from_name(name: &str) -> Self {
        static NAME_MAP: &[(&[&str], Language)] = &[
            (&["javascript", "js", "jsx", "node"], Language::JavaScript),
            (&["typescript", "ts", "tsx"], Language::TypeScript),
            (&["python", "py"], Language::Python),
            (&["java"], Language::Java),
        ];

        let lower = name.trim().to_lowercase();
        NAME_MAP
            .iter()
            .find(|(names, _)| names.contains(&lower.as_str()))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Function,
    Class,
    Variable,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Priority, &str)] = &[
            (Priority::Low, "Low"),
            (Priority::Medium, "Medium"),
            (Priority::High, "High"),
            (Priority::Critical, "Critical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

/// Byte range inside an element body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionElement {
    pub name: String,
    pub body_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassElement {
    pub name: String,
    pub body_text: String,
    pub methods: Vec<FunctionElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableElement {
    pub name: String,
    pub body_text: String,
}

/// A single extracted code element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CodeElement {
    Function(FunctionElement),
    Class(ClassElement),
    Variable(VariableElement),
}

impl CodeElement {
    pub fn function(name: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self::Function(FunctionElement {
            name: name.into(),
            body_text: body_text.into(),
        })
    }

    pub fn class(
        name: impl Into<String>,
        body_text: impl Into<String>,
        methods: Vec<FunctionElement>,
    ) -> Self {
        Self::Class(ClassElement {
            name: name.into(),
            body_text: body_text.into(),
            methods,
        })
    }

    pub fn variable(name: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self::Variable(VariableElement {
            name: name.into(),
            body_text: body_text.into(),
        })
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Function(_) => ElementKind::Function,
            Self::Class(_) => ElementKind::Class,
            Self::Variable(_) => ElementKind::Variable,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Class(c) => &c.name,
            Self::Variable(v) => &v.name,
        }
    }

    pub fn body_text(&self) -> &str {
        match self {
            Self::Function(f) => &f.body_text,
            Self::Class(c) => &c.body_text,
            Self::Variable(v) => &v.body_text,
        }
    }

    /// Functions and classes carry behaviour; variables only carry data.
    pub fn is_behavioral(&self) -> bool {
        !matches!(self, Self::Variable(_))
    }

    /// Text used for pattern matching: `name + " " + body`.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.name(), self.body_text())
    }
}

/// All elements extracted from one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileElements {
    pub file_path: String,
    pub language: Language,
    pub elements: Vec<CodeElement>,
    #[serde(default)]
    pub string_literals: Vec<String>,
}

impl FileElements {
    pub fn new(file_path: impl Into<String>, language: Language, elements: Vec<CodeElement>) -> Self {
        Self {
            file_path: file_path.into(),
            language,
            elements,
            string_literals: Vec::new(),
        }
    }

    pub fn with_string_literals(mut self, literals: Vec<String>) -> Self {
        self.string_literals = literals;
        self
    }

    /// Every element name, element body and string literal, newline separated.
    pub fn aggregate_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.elements.len() * 2);
        for element in &self.elements {
            parts.push(element.name());
            parts.push(element.body_text());
        }
        parts.extend(self.string_literals.iter().map(String::as_str));
        parts.join("\n")
    }

    pub fn behavioral_elements(&self) -> impl Iterator<Item = &CodeElement> {
        self.elements.iter().filter(|e| e.is_behavioral())
    }
}
