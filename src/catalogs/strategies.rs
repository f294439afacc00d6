//! Refactoring strategies referenced by concern definitions.

use super::Effort;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringStrategy {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub implementation: Vec<&'static str>,
    pub benefits: Vec<&'static str>,
    pub effort: Effort,
}

fn strategy_entry(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    implementation: &[&'static str],
    benefits: &[&'static str],
    effort: Effort,
) -> (&'static str, RefactoringStrategy) {
    (
        id,
        RefactoringStrategy {
            id,
            name,
            description,
            implementation: implementation.to_vec(),
            benefits: benefits.to_vec(),
            effort,
        },
    )
}

static STRATEGIES: Lazy<HashMap<&'static str, RefactoringStrategy>> = Lazy::new(|| {
    HashMap::from([
        strategy_entry(
            "centralized_logging",
            "Centralized logging",
            "Route all log output through one structured logging facade",
            &[
                "Introduce a logger facade with levels and structured fields",
                "Replace direct console/print calls with the facade",
                "Move entry/exit logging into decorators or middleware",
            ],
            &["Consistent log format", "Single place to change sinks", "Less noise in business code"],
            Effort::Low,
        ),
        strategy_entry(
            "error_handling_middleware",
            "Error handling middleware",
            "Translate and report errors at module boundaries instead of per call",
            &[
                "Define a domain error hierarchy",
                "Catch and translate errors in one boundary layer",
                "Remove empty and log-only catch blocks",
            ],
            &["Uniform error responses", "Fewer swallowed errors"],
            Effort::Medium,
        ),
        strategy_entry(
            "authentication_service",
            "Authentication service",
            "Extract identity verification into a dedicated service",
            &[
                "Create an authentication service owning sessions and tokens",
                "Guard entry points with an authentication middleware",
                "Pass an authenticated principal into business code",
            ],
            &["Security logic reviewed in one place", "Business code free of credential handling"],
            Effort::High,
        ),
        strategy_entry(
            "authorization_policy",
            "Policy-based authorization",
            "Express permission checks as declarative policies",
            &[
                "Inventory every role and permission check",
                "Model them as named policies",
                "Enforce policies in a single interceptor",
            ],
            &["Auditable access rules", "No duplicated role checks"],
            Effort::High,
        ),
        strategy_entry(
            "caching_layer",
            "Caching layer",
            "Move cache reads and invalidation behind a cache-aside decorator",
            &[
                "Wrap repositories with a caching decorator",
                "Centralize TTL and invalidation policy",
            ],
            &["Predictable invalidation", "Business functions stay pure"],
            Effort::Medium,
        ),
        strategy_entry(
            "validation_framework",
            "Validation framework",
            "Declare validation rules once with a schema or validator library",
            &[
                "Collect validation rules per entity",
                "Express them as schemas validated at the boundary",
                "Delete inline null and length checks",
            ],
            &["Single source of truth for input rules", "Consistent error messages"],
            Effort::Medium,
        ),
        strategy_entry(
            "repository_pattern",
            "Repository pattern",
            "Hide queries and connections behind repositories",
            &[
                "Define a repository interface per aggregate",
                "Move SQL and connection handling into implementations",
                "Inject repositories into services",
            ],
            &["Testable business logic", "Storage can change independently"],
            Effort::High,
        ),
        strategy_entry(
            "configuration_management",
            "Configuration management",
            "Load configuration once into a typed settings object",
            &[
                "Create a typed configuration object loaded at startup",
                "Inject it instead of reading the environment directly",
            ],
            &["Fail-fast on bad configuration", "Clear list of settings"],
            Effort::Low,
        ),
        strategy_entry(
            "serialization_layer",
            "Serialization layer",
            "Keep format conversion in mappers at the system edge",
            &["Introduce DTOs and mappers", "Remove serialization calls from services"],
            &["Domain types independent of wire formats"],
            Effort::Low,
        ),
        strategy_entry(
            "monitoring_aspect",
            "Monitoring aspect",
            "Collect timings and metrics with instrumentation wrappers",
            &[
                "Adopt a metrics library",
                "Instrument through decorators or middleware",
            ],
            &["Uniform metric names", "Business code free of timers"],
            Effort::Low,
        ),
        strategy_entry(
            "i18n_resources",
            "Externalized messages",
            "Move user-facing text and locale rules into resource bundles",
            &[
                "Extract literal messages into resource files",
                "Resolve locale once per request",
            ],
            &["Translators work without code changes"],
            Effort::Low,
        ),
        strategy_entry(
            "rate_limiting_middleware",
            "Rate limiting middleware",
            "Enforce throttling at the edge with a shared limiter",
            &[
                "Choose a token-bucket limiter",
                "Apply it as middleware keyed by client",
            ],
            &["Consistent limits", "No throttling code in handlers"],
            Effort::Medium,
        ),
        strategy_entry(
            "audit_interceptor",
            "Audit interceptor",
            "Record changes through an interceptor or event listener",
            &[
                "Publish domain events for state changes",
                "Write audit records from a single listener",
            ],
            &["Complete audit coverage", "No forgotten audit calls"],
            Effort::Medium,
        ),
    ])
});

pub fn strategy(id: &str) -> Option<&'static RefactoringStrategy> {
    STRATEGIES.get(id)
}
