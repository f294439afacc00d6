//! Observability for the analysis pipeline.
//!
//! Tracks the current phase of each file's state machine and the file being
//! analyzed so failures and trace spans can say where they happened.
//!
//! ## Usage
//!
//! ```ignore
//! use semmap::observability::{set_current_file, set_phase_persistent, AnalysisPhase};
//!
//! let _file = set_current_file("billing.js");
//! set_phase_persistent(AnalysisPhase::Classifying);
//! // Dropping `_file` restores the phase that was current before it
//! ```

pub mod context;

pub use context::{
    current_phase, get_current_context, set_current_file, set_phase_persistent, AnalysisContext,
    AnalysisPhase, ContextGuard,
};
