//! Thread-local context tracking for analysis diagnostics.
//!
//! Records which phase of the per-file state machine is running and which
//! file is being analyzed. Uses thread-local storage so every rayon worker
//! keeps its own context; nothing here is shared between threads.
//!
//! Context guards use RAII: dropping one restores the whole previous
//! context, phase included.

use serde::Serialize;
use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<AnalysisContext> = const { RefCell::new(AnalysisContext::new()) };
}

/// Context snapshot for the current analysis operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisContext {
    /// Current analysis phase
    pub phase: Option<AnalysisPhase>,
    /// File currently being analyzed
    pub current_file: Option<String>,
}

impl AnalysisContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
        }
    }
}

/// States of the per-file analysis state machine.
///
/// A file moves `Received → ExtractingElements → Classifying →
/// IdentifyingDomains → ExtractingRules → DetectingConcerns → Scoring → Done`,
/// or from `Received` straight to `Failed` when the parser reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPhase {
    Received,
    ExtractingElements,
    Classifying,
    IdentifyingDomains,
    ExtractingRules,
    DetectingConcerns,
    Scoring,
    Done,
    Failed,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::ExtractingElements => write!(f, "extracting_elements"),
            Self::Classifying => write!(f, "classifying"),
            Self::IdentifyingDomains => write!(f, "identifying_domains"),
            Self::ExtractingRules => write!(f, "extracting_rules"),
            Self::DetectingConcerns => write!(f, "detecting_concerns"),
            Self::Scoring => write!(f, "scoring"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// RAII guard for restoring analysis context on drop.
///
/// When the guard is dropped, it restores the previous context,
/// enabling nested context tracking (e.g., phase within file).
pub struct ContextGuard {
    previous: AnalysisContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current analysis phase without returning a guard.
///
/// Used for transitions inside one file's state machine where the phase
/// should persist until the next transition.
pub fn set_phase_persistent(phase: AnalysisPhase) {
    CURRENT_CONTEXT.with(|ctx| {
        ctx.borrow_mut().phase = Some(phase);
    });
}

/// Set the current file being analyzed.
///
/// Returns a guard that restores the previous file on drop.
#[must_use]
pub fn set_current_file(path: impl Into<String>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_file = Some(path.into());
        ContextGuard { previous }
    })
}

/// Get the current context snapshot.
#[must_use]
pub fn get_current_context() -> AnalysisContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Phase of the current thread, `Received` when nothing was set.
#[must_use]
pub fn current_phase() -> AnalysisPhase {
    get_current_context()
        .phase
        .unwrap_or(AnalysisPhase::Received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_guard_restores_phase_set_inside() {
        set_phase_persistent(AnalysisPhase::Classifying);
        {
            let _file = set_current_file("ledger.py");
            set_phase_persistent(AnalysisPhase::ExtractingRules);
            assert_eq!(current_phase(), AnalysisPhase::ExtractingRules);
        }
        assert_eq!(current_phase(), AnalysisPhase::Classifying);
    }

    #[test]
    fn test_file_guard_restores_previous() {
        {
            let _file = set_current_file("billing.js");
            assert_eq!(
                get_current_context().current_file.as_deref(),
                Some("billing.js")
            );
        }
        assert_eq!(get_current_context().current_file, None);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(
            AnalysisPhase::IdentifyingDomains.to_string(),
            "identifying_domains"
        );
    }
}
