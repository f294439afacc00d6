//! Tables driving business rule extraction.
//!
//! Construct families locate candidate rules, the business keyword list gates
//! relevance, complexity indicators weight the matched snippet, rule categories
//! classify it and the domain rule patterns tag domain-specific rules.

use crate::patterns::{IndicatorSet, RegexMatcher};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Conditional,
    Validation,
    Calculation,
    Workflow,
}

impl RuleType {
    pub const ALL: [RuleType; 4] = [
        RuleType::Conditional,
        RuleType::Validation,
        RuleType::Calculation,
        RuleType::Workflow,
    ];

    /// Category used when no category pattern scores above zero.
    pub fn default_category(self) -> RuleCategory {
        match self {
            RuleType::Conditional => RuleCategory::Conditional,
            RuleType::Validation => RuleCategory::Validation,
            RuleType::Calculation => RuleCategory::Calculation,
            RuleType::Workflow => RuleCategory::Workflow,
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conditional => write!(f, "conditional"),
            Self::Validation => write!(f, "validation"),
            Self::Calculation => write!(f, "calculation"),
            Self::Workflow => write!(f, "workflow"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleCategory {
    Validation,
    Calculation,
    Authorization,
    Workflow,
    #[serde(rename = "Business Logic")]
    BusinessLogic,
    Temporal,
    Conditional,
}

impl RuleCategory {
    /// Categories in scoring order; earlier entries win ties.
    pub const ALL: [RuleCategory; 7] = [
        RuleCategory::Validation,
        RuleCategory::Calculation,
        RuleCategory::Authorization,
        RuleCategory::Workflow,
        RuleCategory::BusinessLogic,
        RuleCategory::Temporal,
        RuleCategory::Conditional,
    ];

    pub fn is_business_critical(self) -> bool {
        matches!(
            self,
            RuleCategory::Validation | RuleCategory::Calculation | RuleCategory::Authorization
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Validation => "Validation",
            Self::Calculation => "Calculation",
            Self::Authorization => "Authorization",
            Self::Workflow => "Workflow",
            Self::BusinessLogic => "Business Logic",
            Self::Temporal => "Temporal",
            Self::Conditional => "Conditional",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One construct pattern of a rule family.
#[derive(Debug)]
pub struct ConstructPattern {
    pub rule_type: RuleType,
    pub matcher: RegexMatcher,
    /// Capture group holding the condition, 0 for the whole match
    pub condition_group: usize,
    pub action_group: Option<usize>,
    /// Capture group that must name a known workflow state
    pub state_group: Option<usize>,
}

#[derive(Debug)]
pub struct ComplexityIndicator {
    pub name: &'static str,
    pub matcher: RegexMatcher,
    pub weight: u32,
}

#[derive(Debug)]
pub struct DomainRulePattern {
    pub domain: &'static str,
    pub domain_type: &'static str,
    pub description: &'static str,
    pub matcher: RegexMatcher,
}

fn construct(
    rule_type: RuleType,
    pattern: &str,
    condition_group: usize,
    action_group: Option<usize>,
    state_group: Option<usize>,
) -> ConstructPattern {
    ConstructPattern {
        rule_type,
        matcher: RegexMatcher::builtin(pattern),
        condition_group,
        action_group,
        state_group,
    }
}

static CONSTRUCT_PATTERNS: Lazy<Vec<ConstructPattern>> = Lazy::new(|| {
    use RuleType::*;
    vec![
        // if / elif / else if heads with the statement that follows
        construct(
            Conditional,
            r"\b(?:else\s+if|elif|if)\s*\(?\s*([^{:\n]+?)\s*\)?\s*[{:]\s*([^\n}]*)",
            1,
            Some(2),
            None,
        ),
        construct(Conditional, r"\bswitch\s*\(([^)]*)\)", 1, None, None),
        construct(
            Conditional,
            r"([\w.]+\s*(?:[<>]=?|[!=]==?)\s*[\w.'\x22]+)\s*\?\s*([^:;\n]+):",
            1,
            Some(2),
            None,
        ),
        construct(
            Validation,
            r"([\w.]+)\.length\s*(?:[<>]=?|[!=]==?)\s*\d+",
            0,
            None,
            None,
        ),
        construct(
            Validation,
            r"\blen\(\s*([\w.]+)\s*\)\s*(?:[<>]=?|[!=]=)\s*\d+",
            0,
            None,
            None,
        ),
        construct(
            Validation,
            r"([\w.]+)\s*(?:[!=]==?)\s*(?:null|undefined|None)\b|([\w.]+)\s+is\s+(?:not\s+)?None\b",
            0,
            None,
            None,
        ),
        construct(
            Validation,
            r"\b(?:validate|verify|check)\w*\s*\(([^)]*)\)",
            0,
            None,
            None,
        ),
        construct(
            Validation,
            r"\b(?:throw\s+new|raise)\s+(\w*(?:Error|Exception))\s*\(([^)]*)\)",
            2,
            Some(1),
            None,
        ),
        construct(Validation, r"\breturn\s+(?:false|False)\b", 0, None, None),
        construct(
            Validation,
            r"([\w.]+)\.(?:isEmpty|isBlank)\s*\(\s*\)|([\w.]+)\.trim\(\)\s*===?\s*''",
            0,
            None,
            None,
        ),
        construct(
            Calculation,
            r"([\w.]+)\s*=\s*([\w.()]+\s*[-+*/%]\s*[\w.()]+(?:\s*[-+*/%]\s*[\w.()]+)*)",
            2,
            Some(1),
            None,
        ),
        construct(
            Calculation,
            r"([\w.]+)\s*([-+*/])=\s*([^;\n]+)",
            3,
            Some(1),
            None,
        ),
        construct(
            Calculation,
            r"\breturn\s+([\w.()]+\s*[-+*/%]\s*[\w.()]+[^;\n}]*)",
            1,
            None,
            None,
        ),
        construct(
            Calculation,
            r"\b(?:calculate|compute|sum|total)\w*\s*\(([^)]*)\)",
            0,
            None,
            None,
        ),
        construct(
            Calculation,
            r"\bMath\.(?:round|floor|ceil|max|min|pow|abs)\s*\(([^)]*)\)",
            0,
            None,
            None,
        ),
        construct(
            Workflow,
            r"\b(?:status|state)\w*\s*(?:===?|!==?|=)\s*['\x22]?(\w+)['\x22]?",
            0,
            None,
            Some(1),
        ),
        construct(
            Workflow,
            r"\bset_?(?:status|state)\s*\(\s*['\x22](\w+)['\x22]",
            0,
            None,
            Some(1),
        ),
        construct(
            Workflow,
            r"\.(approve|reject|submit|cancel|complete)\w*\s*\(([^)]*)\)",
            0,
            Some(1),
            None,
        ),
    ]
});

static KNOWN_STATES: &[&str] = &[
    "pending",
    "approved",
    "rejected",
    "completed",
    "cancelled",
    "canceled",
    "active",
    "inactive",
    "shipped",
    "delivered",
    "processing",
    "draft",
    "submitted",
    "paid",
    "unpaid",
    "refunded",
    "closed",
    "open",
    "suspended",
    "expired",
];

static BUSINESS_KEYWORDS: &[&str] = &[
    "amount",
    "price",
    "cost",
    "total",
    "tax",
    "discount",
    "balance",
    "payment",
    "status",
    "state",
    "role",
    "permission",
    "date",
    "deadline",
    "count",
    "quantity",
    "limit",
    "customer",
    "order",
    "product",
    "account",
    "invoice",
    "user",
    "employee",
    "rate",
];

static COMPLEXITY_INDICATORS: Lazy<Vec<ComplexityIndicator>> = Lazy::new(|| {
    let table: &[(&str, &str, u32)] = &[
        ("multiple_conditions", r"&&|\|\||\band\b|\bor\b", 1),
        ("nested_conditions", r"\bif\b[^\n]*\bif\b", 2),
        ("switch_cases", r"\bcase\b", 1),
        ("loops", r"\b(for|while|forEach)\b", 2),
        ("exception_handling", r"\b(try|catch|except)\b", 3),
        ("ternary", r"\?[^:\n]*:", 1),
    ];
    table
        .iter()
        .map(|(name, pattern, weight)| ComplexityIndicator {
            name,
            matcher: RegexMatcher::builtin(pattern),
            weight: *weight,
        })
        .collect()
});

static RULE_CATEGORIES: Lazy<Vec<(RuleCategory, IndicatorSet)>> = Lazy::new(|| {
    vec![
        (
            RuleCategory::Validation,
            IndicatorSet::builtin(
                "Validation",
                "Input and state validation",
                &[
                    r"\b(validate|verify|check|ensure)\w*",
                    r"\b(null|undefined|none|empty|length|required)\b",
                    r"\b(throw|raise)\b",
                ],
                &["invalid", "valid", "must"],
            ),
        ),
        (
            RuleCategory::Calculation,
            IndicatorSet::builtin(
                "Calculation",
                "Arithmetic over business quantities",
                &[
                    r"[\w)]\s*[*/+%-]\s*[\w(]",
                    r"\b(calculate|compute|sum|total)\w*",
                    r"\bMath\.\w+|\bround\s*\(",
                ],
                &["amount", "price", "tax", "rate", "total", "cost"],
            ),
        ),
        (
            RuleCategory::Authorization,
            IndicatorSet::builtin(
                "Authorization",
                "Access and permission decisions",
                &[
                    r"\b(role|permission|admin|authorized?|access|owner)\w*",
                    r"\b(can|may)_?(approve|access|edit|view|delete|manage)\w*",
                ],
                &["permission", "role", "privilege"],
            ),
        ),
        (
            RuleCategory::Workflow,
            IndicatorSet::builtin(
                "Workflow",
                "State transitions and process steps",
                &[
                    r"\b(status|state|stage|step)\w*",
                    r"\b(pending|approved|rejected|completed|shipped|submitted)\b",
                ],
                &["approve", "reject", "submit", "transition"],
            ),
        ),
        (
            RuleCategory::BusinessLogic,
            IndicatorSet::builtin(
                "Business Logic",
                "Domain policy decisions",
                &[
                    r"\b(business|policy|rule|eligib)\w*",
                    r"\b(customer|order|account|product|invoice|employee)\w*",
                ],
                &["eligible", "policy", "premium", "tier"],
            ),
        ),
        (
            RuleCategory::Temporal,
            IndicatorSet::builtin(
                "Temporal",
                "Date and time constraints",
                &[
                    r"\b(date|time|deadline|expir|duration|day|month|year)\w*",
                    r"\b(now|today|timestamp)\b",
                ],
                &["deadline", "schedule", "overdue"],
            ),
        ),
        (
            RuleCategory::Conditional,
            IndicatorSet::builtin(
                "Conditional",
                "Plain branching",
                &[r"\b(if|elif|else|switch|case)\b", r"[<>]=?|[!=]==?"],
                &["when", "unless"],
            ),
        ),
    ]
});

static DOMAIN_RULE_PATTERNS: Lazy<Vec<DomainRulePattern>> = Lazy::new(|| {
    let table: &[(&str, &str, &str, &str)] = &[
        ("ecommerce", "pricing", "Product pricing rule", r"\b(price|cost)\w*\s*[-+*/<>=]"),
        ("ecommerce", "discount", "Discount or promotion rule", r"\b(discount|coupon|promo)\w*"),
        ("ecommerce", "shipping", "Shipping and delivery rule", r"\b(shipping|delivery)\w*"),
        ("ecommerce", "inventory", "Stock level rule", r"\b(stock|inventory|quantity)\w*\s*[<>=]"),
        ("finance", "interest", "Interest computation rule", r"\binterest\w*"),
        ("finance", "balance", "Account balance rule", r"\bbalance\w*\s*[-+<>=]"),
        ("finance", "lending", "Loan and credit rule", r"\b(loan|credit|mortgage)\w*"),
        ("finance", "transaction", "Money movement rule", r"\b(transaction|transfer|withdraw|deposit)\w*"),
        ("healthcare", "patient", "Patient eligibility rule", r"\bpatient\w*"),
        ("healthcare", "diagnosis", "Clinical diagnosis rule", r"\b(diagnos|symptom)\w*"),
        ("healthcare", "medication", "Medication and dosage rule", r"\b(dose|dosage|medication)\w*"),
        ("healthcare", "scheduling", "Appointment scheduling rule", r"\bappointment\w*"),
    ];
    table
        .iter()
        .map(|(domain, domain_type, description, pattern)| DomainRulePattern {
            domain,
            domain_type,
            description,
            matcher: RegexMatcher::builtin(pattern),
        })
        .collect()
});

pub fn construct_patterns() -> &'static [ConstructPattern] {
    &CONSTRUCT_PATTERNS
}

pub fn known_states() -> &'static [&'static str] {
    KNOWN_STATES
}

pub fn business_keywords() -> &'static [&'static str] {
    BUSINESS_KEYWORDS
}

pub fn complexity_indicators() -> &'static [ComplexityIndicator] {
    &COMPLEXITY_INDICATORS
}

pub fn rule_categories() -> &'static [(RuleCategory, IndicatorSet)] {
    &RULE_CATEGORIES
}

pub fn domain_rule_patterns() -> &'static [DomainRulePattern] {
    &DOMAIN_RULE_PATTERNS
}
