//! Business and infrastructure indicator patterns per language.

use crate::core::Language;
use crate::patterns::IndicatorSet;
use once_cell::sync::Lazy;

/// Indicator sets used to classify one language's elements.
#[derive(Debug)]
pub struct LanguageIndicators {
    pub business: Vec<IndicatorSet>,
    pub infrastructure: Vec<IndicatorSet>,
}

fn common_business() -> Vec<IndicatorSet> {
    vec![
        IndicatorSet::builtin(
            "calculations",
            "Monetary and quantity calculations",
            &[
                r"\bcalculat\w*",
                r"\bcompute\w*",
                r"\w*(price|amount|total|tax|discount|fee|balance|interest|subtotal)\w*",
            ],
            &["price", "amount", "tax", "discount", "invoice", "payment"],
        ),
        IndicatorSet::builtin(
            "business_rules",
            "Eligibility, approval and policy decisions",
            &[
                r"\bvalidate\w*(order|payment|customer|account|policy|claim)\w*",
                r"\b(approve|reject|authorize_?payment)\w*",
                r"\b(eligib|qualif|entitle)\w*",
            ],
            &["eligible", "policy", "approval", "quota", "premium"],
        ),
        IndicatorSet::builtin(
            "domain_entities",
            "References to business entities",
            &[r"\b(customer|order|invoice|product|account|employee|patient|policy|claim|loan)\w*"],
            &["customer", "order", "product", "account"],
        ),
        IndicatorSet::builtin(
            "workflow",
            "Business state transitions",
            &[
                r"\bstatus\s*(===?|!==?|==)",
                r"\b(pending|approved|rejected|shipped|completed|cancelled|refunded)\b",
            ],
            &["workflow", "status"],
        ),
    ]
}

fn common_infrastructure() -> Vec<IndicatorSet> {
    vec![
        IndicatorSet::builtin(
            "persistence",
            "Database and storage plumbing",
            &[
                r"\b(query|execute|insert|select|commit|rollback)\b",
                r"\b(connection|cursor|repository|datasource|pool)\w*",
            ],
            &["database", "sql", "connection"],
        ),
        IndicatorSet::builtin(
            "network",
            "HTTP, sockets and remote calls",
            &[
                r"\b(fetch|axios|http|request|response|socket|url)\w*",
                r"\b(get|post|put|delete)\s*\(\s*['\x22]/",
            ],
            &["http", "endpoint", "header"],
        ),
        IndicatorSet::builtin(
            "logging",
            "Logging and diagnostics",
            &[r"\b(log|logger|console|logging)\.\w+", r"\b(debug|trace)\b"],
            &["logger", "logging"],
        ),
        IndicatorSet::builtin(
            "runtime",
            "Caching, configuration and runtime wiring",
            &[r"\bcache\w*", r"\b(config|settings|environment)\w*", r"\b(init|setup|bootstrap)\w*"],
            &["cache", "config", "middleware"],
        ),
        IndicatorSet::builtin(
            "io",
            "File system and serialization",
            &[
                r"\b(read|write)_?file\w*|\bopen\s*\(",
                r"\bjson\.(parse|stringify|loads|dumps)",
                r"\b(buffer|stream|serialize)\w*",
            ],
            &["file", "path", "encoding"],
        ),
    ]
}

fn with_extras(
    mut business: Vec<IndicatorSet>,
    mut infrastructure: Vec<IndicatorSet>,
    extra_business: Vec<IndicatorSet>,
    extra_infrastructure: Vec<IndicatorSet>,
) -> LanguageIndicators {
    business.extend(extra_business);
    infrastructure.extend(extra_infrastructure);
    LanguageIndicators {
        business,
        infrastructure,
    }
}

static JAVASCRIPT: Lazy<LanguageIndicators> = Lazy::new(|| {
    with_extras(
        common_business(),
        common_infrastructure(),
        vec![IndicatorSet::builtin(
            "js_domain_state",
            "Entity state held on objects",
            &[r"\bthis\.(price|total|amount|status|balance|quantity)\b"],
            &[],
        )],
        vec![IndicatorSet::builtin(
            "js_runtime",
            "Module loading, routing and async plumbing",
            &[
                r"\brequire\s*\(",
                r"\b(app|router|server)\.(get|post|put|delete|use|listen)\s*\(",
                r"process\.env",
                r"\b(Promise|setTimeout|setInterval|addEventListener)\b",
            ],
            &["express", "module.exports"],
        )],
    )
});

static TYPESCRIPT: Lazy<LanguageIndicators> = Lazy::new(|| {
    with_extras(
        common_business(),
        common_infrastructure(),
        vec![IndicatorSet::builtin(
            "ts_domain_types",
            "Domain types and interfaces",
            &[r"\b(interface|type)\s+\w*(Order|Customer|Invoice|Product|Account)\w*"],
            &[],
        )],
        vec![IndicatorSet::builtin(
            "ts_runtime",
            "Decorators, injection and module plumbing",
            &[
                r"@(Injectable|Controller|Module|Component)\b",
                r"\bimport\s+.*\s+from\s+",
                r"process\.env",
                r"\b(Observable|subscribe|HttpClient)\b",
            ],
            &["provider", "module"],
        )],
    )
});

static PYTHON: Lazy<LanguageIndicators> = Lazy::new(|| {
    with_extras(
        common_business(),
        common_infrastructure(),
        vec![IndicatorSet::builtin(
            "py_domain_functions",
            "Business functions by naming convention",
            &[r"\bdef\s+(calculate|validate|approve|process)_\w*(order|payment|price|claim|invoice)\w*"],
            &["decimal"],
        )],
        vec![IndicatorSet::builtin(
            "py_runtime",
            "Standard library plumbing",
            &[
                r"\bimport\s+(os|sys|logging|json|requests|sqlite3|socket|threading)\b",
                r"\bwith\s+open\s*\(",
                r"\bos\.(path|environ|getenv)",
                r"\bself\.(logger|cache|session|conn)\b",
            ],
            &["__init__", "kwargs"],
        )],
    )
});

static JAVA: Lazy<LanguageIndicators> = Lazy::new(|| {
    with_extras(
        common_business(),
        common_infrastructure(),
        vec![IndicatorSet::builtin(
            "java_domain",
            "Monetary types and domain services",
            &[r"\bBigDecimal\b", r"@(Entity|Service)\b"],
            &[],
        )],
        vec![IndicatorSet::builtin(
            "java_runtime",
            "Framework wiring and JDBC plumbing",
            &[
                r"@(Autowired|Repository|Component|Configuration|Bean)\b",
                r"\b(EntityManager|JdbcTemplate|HttpClient|DataSource)\b",
                r"System\.out\.print",
            ],
            &["servlet", "jdbc"],
        )],
    )
});

static GENERIC: Lazy<LanguageIndicators> = Lazy::new(|| LanguageIndicators {
    business: common_business(),
    infrastructure: common_infrastructure(),
});

/// Indicator sets for a language, falling back to the language-neutral sets.
pub fn indicators_for(language: Language) -> &'static LanguageIndicators {
    match language {
        Language::JavaScript => &JAVASCRIPT,
        Language::TypeScript => &TYPESCRIPT,
        Language::Python => &PYTHON,
        Language::Java => &JAVA,
        Language::Unknown => &GENERIC,
    }
}
