//! The audit contract layer.
//!
//! Everything between "a user typed something that names an Instagram
//! profile" and "a validated, immutable [`types::AnalysisResult`]" lives
//! here: the input normalizer, the analyzer orchestration around the single
//! grounded provider call, and the caller-visible session state machine.
//!
//! The presentation layer needs exactly one entry point,
//! [`analyzer::Analyzer::analyze`]; [`session::AuditSession`] tells it what
//! it is allowed to trigger and when.
pub mod analyzer;
pub mod handle;
pub mod session;
pub mod sources;
pub mod types;

pub use analyzer::Analyzer;
pub use session::{AuditEvent, AuditSession, AuditStatus, SessionError};
