//! Cross-cutting concern definitions.

use super::Severity;
use crate::patterns::RegexMatcher;
use once_cell::sync::Lazy;

#[derive(Debug)]
pub struct ConcernDefinition {
    pub name: &'static str,
    pub patterns: Vec<RegexMatcher>,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub refactoring_strategy_id: &'static str,
}

fn concern(
    name: &'static str,
    patterns: &[&str],
    category: &'static str,
    severity: Severity,
    description: &'static str,
    refactoring_strategy_id: &'static str,
) -> ConcernDefinition {
    ConcernDefinition {
        name,
        patterns: patterns.iter().map(|p| RegexMatcher::builtin(p)).collect(),
        category,
        severity,
        description,
        refactoring_strategy_id,
    }
}

static CONCERN_DEFINITIONS: Lazy<Vec<ConcernDefinition>> = Lazy::new(|| {
    vec![
        concern(
            "Logging",
            &[
                r"\b(console|logger|log|logging)\.(log|info|debug|warn|warning|error|trace)\s*\(",
                r"\b(log|debug|warn|info)\w*\s*\(",
                r"\bprint(ln)?\s*\(|System\.out\.print",
            ],
            "observability",
            Severity::Medium,
            "Logging statements scattered through the code",
            "centralized_logging",
        ),
        concern(
            "Error Handling",
            &[
                r"\btry\s*[{:]",
                r"\bcatch\s*\(|\bexcept\b",
                r"\bthrow\s+new\s+\w+|\braise\s+\w+",
                r"\.catch\s*\(",
            ],
            "reliability",
            Severity::Medium,
            "Ad-hoc try/catch blocks and error translation",
            "error_handling_middleware",
        ),
        concern(
            "Authentication",
            &[
                r"\b(authenticate|login|logout|signin|sign_in)\w*",
                r"\b(password|credential|jwt|session)\w*",
                r"\b(isAuthenticated|is_authenticated|currentUser|current_user)\b",
            ],
            "security",
            Severity::High,
            "Identity checks embedded in business code",
            "authentication_service",
        ),
        concern(
            "Authorization",
            &[
                r"\b(authorize|permission|hasRole|has_role|isAdmin|is_admin)\w*",
                r"\brole\w*\s*(===?|!==?|\bin\b)",
                r"\b(acl|rbac|access_?control)\b",
            ],
            "security",
            Severity::High,
            "Permission and role checks repeated per operation",
            "authorization_policy",
        ),
        concern(
            "Caching",
            &[
                r"\bcache\w*\.(get|set|put|has|delete|clear)\s*\(",
                r"\b(memoize|lru_cache|redis|memcache)\w*",
                r"\bttl\b|\bexpir\w*",
            ],
            "performance",
            Severity::Medium,
            "Cache lookups and invalidation mixed with logic",
            "caching_layer",
        ),
        concern(
            "Validation",
            &[
                r"\b(validate|validator|isValid|is_valid)\w*",
                r"\b(required|mandatory)\b",
                r"===?\s*(null|undefined)\b|\bis\s+None\b",
                r"\.length\s*[<>]=?\s*\d+|\blen\(\w+\)\s*[<>]=?\s*\d+",
            ],
            "data_integrity",
            Severity::Medium,
            "Input validation duplicated across entry points",
            "validation_framework",
        ),
        concern(
            "Database Access",
            &[
                r"\b(SELECT|INSERT|UPDATE|DELETE)\s+",
                r"\b(query|execute|executeQuery|cursor|commit|rollback)\s*\(",
                r"\b(connection|db|database|repository)\.\w+",
            ],
            "persistence",
            Severity::High,
            "Queries and connection handling inside business code",
            "repository_pattern",
        ),
        concern(
            "Configuration",
            &[
                r"process\.env\.\w+|os\.environ|os\.getenv|System\.getenv",
                r"\b(config|settings|configuration)\s*(\.|\[)\s*['\x22]?\w+",
                r"\bget_?config\s*\(",
            ],
            "infrastructure",
            Severity::Low,
            "Configuration reads spread across modules",
            "configuration_management",
        ),
        concern(
            "Serialization",
            &[
                r"JSON\.(parse|stringify)|json\.(loads|dumps|load|dump)",
                r"\b(serialize|deserialize|marshal|unmarshal|toJSON|to_dict|from_dict)\w*",
                r"\b(pickle|yaml|xml)\.\w+",
            ],
            "data_format",
            Severity::Low,
            "Format conversion code repeated at boundaries",
            "serialization_layer",
        ),
        concern(
            "Monitoring",
            &[
                r"\b(metrics?|counter|gauge|histogram)\.\w+\s*\(",
                r"\b(performance\.now|Date\.now|time\.time|perf_counter|startTimer|stopwatch)\w*",
                r"\b(telemetry|statsd|newrelic|datadog)\w*",
            ],
            "observability",
            Severity::Low,
            "Timing and metric collection mixed with logic",
            "monitoring_aspect",
        ),
        concern(
            "Internationalization",
            &[
                r"\b(i18n|l10n|translate|gettext|t)\s*\(\s*['\x22]",
                r"\b(locale|lang)\w*\s*(===?|=)",
                r"\b(toLocaleString|Intl\.\w+|format_currency|formatMessage)\b",
            ],
            "presentation",
            Severity::Low,
            "Locale handling and message lookup in logic",
            "i18n_resources",
        ),
        concern(
            "Rate Limiting",
            &[
                r"\b(rate_?limit|throttle|debounce)\w*",
                r"\b(requests?_?per_?(second|minute)|max_?requests)\b",
                r"\b(retry_?after|too_?many_?requests)\b|\b429\b",
            ],
            "reliability",
            Severity::Medium,
            "Throttling logic duplicated per endpoint",
            "rate_limiting_middleware",
        ),
        concern(
            "Audit Trail",
            &[
                r"\baudit\w*",
                r"\b(created_?by|updated_?by|modified_?by|changed_?by)\b",
                r"\b(history|changelog|track_?change)\w*",
            ],
            "compliance",
            Severity::Medium,
            "Change tracking written by hand in each operation",
            "audit_interceptor",
        ),
    ]
});

pub fn concern_definitions() -> &'static [ConcernDefinition] {
    &CONCERN_DEFINITIONS
}
