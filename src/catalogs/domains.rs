//! Business domain profiles and the domain business-rule lookup table.

use crate::patterns::{RegexMatcher, TextMatcher};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maximum distance, in characters, between two related entity mentions
const ADJACENCY_WINDOW: usize = 80;

#[derive(Debug, Clone)]
pub struct EntityDefinition {
    pub name: &'static str,
    /// Relative importance in `(0, 1]`
    pub weight: f64,
    pub aliases: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct RelationshipDefinition {
    pub from: &'static str,
    pub to: &'static str,
    pub relationship_type: &'static str,
    /// `from` near `to`, `to` near `from`, and `from <type> to` phrasing
    pub adjacency: [RegexMatcher; 3],
}

impl RelationshipDefinition {
    /// True when the two entities appear related in `text`.
    pub fn is_confirmed(&self, text: &str) -> bool {
        self.adjacency.iter().any(|m| m.is_match(text))
    }
}

#[derive(Debug, Clone)]
pub struct ProcessDefinition {
    pub name: &'static str,
    pub steps: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct DomainProfile {
    pub name: &'static str,
    pub entities: Vec<EntityDefinition>,
    pub relationships: Vec<RelationshipDefinition>,
    pub business_rule_ids: Vec<&'static str>,
    pub processes: Vec<ProcessDefinition>,
}

impl DomainProfile {
    pub fn total_weight(&self) -> f64 {
        self.entities.iter().map(|e| e.weight).sum()
    }
}

fn entity(name: &'static str, weight: f64, aliases: &[&'static str]) -> EntityDefinition {
    EntityDefinition {
        name,
        weight,
        aliases: aliases.to_vec(),
    }
}

fn relation(from: &'static str, relationship_type: &'static str, to: &'static str) -> RelationshipDefinition {
    let (f, t, k) = (
        regex::escape(from),
        regex::escape(to),
        regex::escape(relationship_type),
    );
    RelationshipDefinition {
        from,
        to,
        relationship_type,
        adjacency: [
            RegexMatcher::builtin(&format!(r"{f}[\s\S]{{0,{ADJACENCY_WINDOW}}}{t}")),
            RegexMatcher::builtin(&format!(r"{t}[\s\S]{{0,{ADJACENCY_WINDOW}}}{f}")),
            RegexMatcher::builtin(&format!(r"{f}[_.\s]*{k}[_.\s]*{t}")),
        ],
    }
}

fn process(name: &'static str, steps: &[&'static str]) -> ProcessDefinition {
    ProcessDefinition {
        name,
        steps: steps.to_vec(),
    }
}

static DOMAIN_PROFILES: Lazy<Vec<DomainProfile>> = Lazy::new(|| {
    vec![
        DomainProfile {
            name: "ecommerce",
            entities: vec![
                entity("order", 1.0, &["purchase", "checkout"]),
                entity("product", 0.9, &["item", "sku", "merchandise"]),
                entity("customer", 0.9, &["buyer", "shopper"]),
                entity("cart", 0.8, &["basket"]),
                entity("payment", 0.9, &["charge", "billing"]),
                entity("shipping", 0.7, &["shipment", "delivery", "fulfillment"]),
                entity("discount", 0.6, &["coupon", "promotion", "voucher"]),
            ],
            relationships: vec![
                relation("customer", "places", "order"),
                relation("order", "contains", "product"),
                relation("cart", "contains", "product"),
                relation("order", "has", "payment"),
                relation("order", "requires", "shipping"),
            ],
            business_rule_ids: vec![
                "minimum_order_amount",
                "discount_eligibility",
                "free_shipping_threshold",
                "stock_availability",
            ],
            processes: vec![
                process("checkout", &["cart", "shipping", "payment", "confirm"]),
                process("order_fulfillment", &["pick", "pack", "ship", "deliver"]),
                process("returns", &["return", "approve", "refund"]),
            ],
        },
        DomainProfile {
            name: "finance",
            entities: vec![
                entity("account", 1.0, &["ledger"]),
                entity("transaction", 1.0, &["transfer", "deposit", "withdrawal"]),
                entity("balance", 0.8, &["funds"]),
                entity("loan", 0.8, &["credit", "mortgage"]),
                entity("interest", 0.7, &["yield"]),
                entity("customer", 0.6, &["client", "holder"]),
            ],
            relationships: vec![
                relation("customer", "owns", "account"),
                relation("account", "has", "transaction"),
                relation("loan", "accrues", "interest"),
                relation("account", "has", "balance"),
            ],
            business_rule_ids: vec![
                "overdraft_protection",
                "interest_calculation",
                "transaction_limit",
                "credit_check",
            ],
            processes: vec![
                process("loan_application", &["apply", "verify", "approve", "disburse"]),
                process("funds_transfer", &["debit", "credit", "settle"]),
            ],
        },
        DomainProfile {
            name: "healthcare",
            entities: vec![
                entity("patient", 1.0, &["member"]),
                entity("appointment", 0.8, &["visit", "encounter"]),
                entity("diagnosis", 0.8, &["condition", "symptom"]),
                entity("prescription", 0.8, &["medication", "dosage"]),
                entity("provider", 0.7, &["physician", "doctor", "clinician"]),
                entity("insurance", 0.6, &["coverage", "claim", "payer"]),
            ],
            relationships: vec![
                relation("patient", "has", "appointment"),
                relation("provider", "makes", "diagnosis"),
                relation("patient", "receives", "prescription"),
                relation("patient", "has", "insurance"),
            ],
            business_rule_ids: vec![
                "dosage_limit",
                "appointment_scheduling",
                "insurance_eligibility",
            ],
            processes: vec![
                process("patient_intake", &["register", "verify", "triage", "admit"]),
                process("claims_billing", &["claim", "adjudicate", "pay"]),
            ],
        },
        DomainProfile {
            name: "human_resources",
            entities: vec![
                entity("employee", 1.0, &["staff", "worker", "personnel"]),
                entity("salary", 0.8, &["payroll", "wage", "compensation"]),
                entity("department", 0.7, &["division"]),
                entity("leave", 0.6, &["vacation", "absence"]),
                entity("position", 0.6, &["title", "job"]),
                entity("performance", 0.5, &["appraisal"]),
            ],
            relationships: vec![
                relation("employee", "belongs", "department"),
                relation("employee", "has", "salary"),
                relation("employee", "requests", "leave"),
            ],
            business_rule_ids: vec!["leave_balance", "overtime_calculation", "probation_period"],
            processes: vec![
                process("onboarding", &["hire", "orient", "train", "assign"]),
                process("leave_request", &["request", "approve", "schedule"]),
            ],
        },
        DomainProfile {
            name: "inventory",
            entities: vec![
                entity("inventory", 1.0, &["stock"]),
                entity("warehouse", 0.8, &["depot"]),
                entity("supplier", 0.8, &["vendor"]),
                entity("shipment", 0.7, &["freight"]),
                entity("product", 0.6, &["sku", "barcode"]),
            ],
            relationships: vec![
                relation("warehouse", "stores", "inventory"),
                relation("supplier", "supplies", "product"),
                relation("shipment", "delivers", "inventory"),
            ],
            business_rule_ids: vec!["reorder_point", "stock_availability"],
            processes: vec![process(
                "replenishment",
                &["forecast", "reorder", "receive", "restock"],
            )],
        },
        DomainProfile {
            name: "customer_relationship",
            entities: vec![
                entity("lead", 0.9, &["prospect"]),
                entity("contact", 0.8, &["person"]),
                entity("opportunity", 0.8, &["deal"]),
                entity("campaign", 0.6, &["marketing"]),
                entity("customer", 0.8, &["client"]),
            ],
            relationships: vec![
                relation("lead", "converts", "opportunity"),
                relation("campaign", "generates", "lead"),
                relation("contact", "belongs", "customer"),
            ],
            business_rule_ids: vec!["lead_scoring"],
            processes: vec![process(
                "sales_pipeline",
                &["qualify", "propose", "negotiate", "close"],
            )],
        },
    ]
});

static BUSINESS_RULE_PATTERNS: Lazy<HashMap<&'static str, Vec<RegexMatcher>>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "minimum_order_amount",
            &[
                r"(order|cart)\w*\.?\s*(total|amount)\w*\s*[<>]=?\s*\d+",
                r"min\w*_?order\w*",
            ],
        ),
        (
            "discount_eligibility",
            &[
                r"(eligible|qualif)\w*[\s_]*(for)?[\s_]*\w*discount",
                r"discount\w*\s*=\s*[^;\n]*\*",
                r"coupon\w*\s*\.?\s*(valid|expired|is_?valid)",
            ],
        ),
        (
            "free_shipping_threshold",
            &[r"free_?shipping", r"shipping\w*\s*=\s*0\b"],
        ),
        (
            "stock_availability",
            &[
                r"(stock|inventory|quantity)\w*\s*[<>]=?\s*\w+",
                r"out_?of_?stock|in_?stock",
            ],
        ),
        (
            "overdraft_protection",
            &[r"balance\w*\s*<\s*(0|\w*amount)", r"overdraft"],
        ),
        (
            "interest_calculation",
            &[r"interest\w*\s*=\s*[^;\n]*\*", r"calculate_?interest"],
        ),
        (
            "transaction_limit",
            &[
                r"(transaction|transfer|withdraw)\w*\s*\.?\s*(amount|limit)\w*\s*[<>]",
                r"daily_?limit|max_?transfer",
            ],
        ),
        (
            "credit_check",
            &[r"credit_?score\w*\s*[<>]=?\s*\d+", r"check_?credit"],
        ),
        ("dosage_limit", &[r"dos(e|age)\w*\s*[<>]=?\s*\w+", r"max_?dose"]),
        (
            "appointment_scheduling",
            &[
                r"(appointment|slot)\w*\s*\.?\s*(available|booked|overlap)",
                r"schedule_?appointment",
            ],
        ),
        (
            "insurance_eligibility",
            &[
                r"(coverage|insurance)\w*\s*\.?\s*(active|valid|eligible)",
                r"verify_?(coverage|insurance)",
            ],
        ),
        (
            "leave_balance",
            &[r"leave_?balance", r"vacation_?days\w*\s*[<>]"],
        ),
        ("overtime_calculation", &[r"overtime", r"hours\w*\s*>\s*40"]),
        ("probation_period", &[r"probation"]),
        (
            "reorder_point",
            &[
                r"reorder_?(point|level|threshold)",
                r"(stock|quantity)\w*\s*<=?\s*(min|reorder)\w*",
            ],
        ),
        (
            "lead_scoring",
            &[r"lead_?score", r"\bscore\w*\s*[<>]=?\s*\d+"],
        ),
    ];

    table
        .iter()
        .map(|(id, patterns)| {
            (
                *id,
                patterns.iter().map(|p| RegexMatcher::builtin(p)).collect(),
            )
        })
        .collect()
});

pub fn domain_profiles() -> &'static [DomainProfile] {
    &DOMAIN_PROFILES
}

/// Matchers confirming a business-rule id, empty for unknown ids.
pub fn business_rule_patterns(rule_id: &str) -> &'static [RegexMatcher] {
    BUSINESS_RULE_PATTERNS
        .get(rule_id)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// True when any matcher for `rule_id` matches `text`.
pub fn rule_confirmed(rule_id: &str, text: &str) -> bool {
    business_rule_patterns(rule_id)
        .iter()
        .any(|m| m.is_match(text))
}
