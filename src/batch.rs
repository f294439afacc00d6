//! Parallel analysis over many parse results.
//!
//! Each file is analyzed independently on the rayon pool; results come back
//! in input order. Cross-file aggregation happens here and nowhere else.

use crate::engine::{FileAnalysis, SemanticAnalysisEngine};
use crate::extraction::ParseResult;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub mean_business_logic_score: f64,
    pub mean_domain_clarity_score: f64,
    pub mean_separation_of_concerns_score: f64,
    pub mean_overall_semantic_score: f64,
    /// Files in which each domain was identified
    pub domain_frequency: BTreeMap<String, usize>,
    /// Files in which each concern qualified
    pub concern_frequency: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub results: Vec<FileAnalysis>,
    pub summary: BatchSummary,
    #[serde(skip)]
    pub elapsed: Duration,
}

pub fn analyze_batch(engine: &SemanticAnalysisEngine, inputs: &[ParseResult]) -> BatchReport {
    let start = Instant::now();
    tracing::info!(file_count = inputs.len(), "Starting batch semantic analysis");

    let results: Vec<FileAnalysis> = inputs.par_iter().map(|input| engine.analyze(input)).collect();

    let summary = summarize_batch(&results);
    let elapsed = start.elapsed();
    tracing::info!(
        analyzed = summary.files_analyzed,
        failed = summary.files_failed,
        elapsed_ms = elapsed.as_millis() as u64,
        "Batch semantic analysis complete"
    );

    BatchReport {
        results,
        summary,
        elapsed,
    }
}

pub fn summarize_batch(results: &[FileAnalysis]) -> BatchSummary {
    let successes: Vec<_> = results.iter().filter_map(FileAnalysis::as_success).collect();

    let mut summary = BatchSummary {
        files_analyzed: successes.len(),
        files_failed: results.len() - successes.len(),
        ..Default::default()
    };
    if successes.is_empty() {
        return summary;
    }

    let mean = |score: fn(&crate::engine::SemanticScores) -> u32| {
        successes
            .iter()
            .map(|s| f64::from(score(&s.semantic_scores)))
            .sum::<f64>()
            / successes.len() as f64
    };
    summary.mean_business_logic_score = mean(|s| s.business_logic_score);
    summary.mean_domain_clarity_score = mean(|s| s.domain_clarity_score);
    summary.mean_separation_of_concerns_score = mean(|s| s.separation_of_concerns_score);
    summary.mean_overall_semantic_score = mean(|s| s.overall_semantic_score);

    for success in &successes {
        for domain in &success.domains {
            *summary.domain_frequency.entry(domain.domain.clone()).or_insert(0) += 1;
        }
        for concern in &success.cross_cutting_concerns.concerns {
            *summary.concern_frequency.entry(concern.name.clone()).or_insert(0) += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inputs() -> Vec<ParseResult> {
        vec![
            ParseResult::parsed(
                "a.js",
                "javascript",
                json!({"functions": [{"name": "foo", "body": "bar(baz)"}]}),
            ),
            ParseResult::failed("b.js", "Unexpected token"),
            ParseResult::parsed("c.py", "python", json!({"functions": []})),
        ]
    }

    #[test]
    fn test_batch_preserves_order() {
        let report = analyze_batch(&SemanticAnalysisEngine::default(), &inputs());
        let paths: Vec<&str> = report.results.iter().map(|r| r.file_path()).collect();
        assert_eq!(paths, vec!["a.js", "b.js", "c.py"]);
        assert_eq!(report.summary.files_analyzed, 2);
        assert_eq!(report.summary.files_failed, 1);
    }

    #[test]
    fn test_empty_batch() {
        let report = analyze_batch(&SemanticAnalysisEngine::default(), &[]);
        assert!(report.results.is_empty());
        assert_eq!(report.summary, BatchSummary::default());
    }

    #[test]
    fn test_means_over_successes_only() {
        let report = analyze_batch(&SemanticAnalysisEngine::default(), &inputs());
        // No concerns in either file
        assert_eq!(report.summary.mean_separation_of_concerns_score, 100.0);
        assert_eq!(report.summary.mean_business_logic_score, 0.0);
        assert!(report.summary.concern_frequency.is_empty());
    }

    #[test]
    fn test_concurrent_batches_report_independently() {
        let engine = SemanticAnalysisEngine::default();
        let small = inputs();
        let large: Vec<ParseResult> = (0..12)
            .map(|i| ParseResult::failed(format!("broken_{i}.js"), "Unexpected token"))
            .collect();

        let (small_report, large_report) = std::thread::scope(|scope| {
            let small_run = scope.spawn(|| analyze_batch(&engine, &small));
            let large_run = scope.spawn(|| analyze_batch(&engine, &large));
            (small_run.join().unwrap(), large_run.join().unwrap())
        });

        assert_eq!(small_report.summary.files_analyzed, 2);
        assert_eq!(small_report.summary.files_failed, 1);
        assert_eq!(large_report.summary.files_analyzed, 0);
        assert_eq!(large_report.summary.files_failed, 12);
        assert_eq!(large_report.results.len(), 12);
    }
}
