//! Caller-visible session state.
//!
//! One logical request in flight at a time: the state machine is the guard.
//! All mutation goes through [`AuditSession::apply`], a single unidirectional
//! update function; the convenience methods are thin wrappers over it.
//!
//! `Idle → Searching → Analyzing → Completed | Error`; `Error` returns to
//! `Idle` only via an explicit retry. Export is a second, independently
//! guarded operation that requires a completed analysis.

/// Where the session currently is, as the presentation layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Idle,
    /// Provider call dispatched, grounding in progress.
    Searching,
    /// Response received, local validation/assembly running.
    Analyzing,
    Completed,
    Error,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    Submitted,
    ResponseReceived,
    AnalysisCompleted,
    AnalysisFailed,
    RetryRequested,
    ExportStarted,
    ExportFinished,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// A submission arrived while a request was already in flight. Rejected,
    /// never queued or raced.
    #[error("an analysis is already in flight")]
    Busy,

    /// The session is in `Error`; the user must retry explicitly first.
    #[error("previous analysis failed; retry before submitting again")]
    RetryRequired,

    #[error("an export is already running")]
    ExportBusy,

    #[error("no completed analysis to export")]
    NothingToExport,

    #[error("event {event:?} is not valid in state {state:?}")]
    InvalidTransition {
        state: AuditStatus,
        event: AuditEvent,
    },
}

#[derive(Debug)]
pub struct AuditSession {
    status: AuditStatus,
    exporting: bool,
}

impl Default for AuditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSession {
    pub fn new() -> Self {
        Self {
            status: AuditStatus::Idle,
            exporting: false,
        }
    }

    pub fn status(&self) -> AuditStatus {
        self.status
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// True while a provider request is outstanding; the submit affordance
    /// must be disabled for as long as this holds.
    pub fn in_flight(&self) -> bool {
        matches!(self.status, AuditStatus::Searching | AuditStatus::Analyzing)
    }

    /// The one transition function.
    pub fn apply(&mut self, event: AuditEvent) -> Result<(), SessionError> {
        use AuditEvent::*;
        use AuditStatus::*;

        match (self.status, event) {
            (Searching | Analyzing, Submitted) => return Err(SessionError::Busy),
            (Error, Submitted) => return Err(SessionError::RetryRequired),
            (Idle | Completed, Submitted) => self.status = Searching,

            (Searching, ResponseReceived) => self.status = Analyzing,
            (Searching | Analyzing, AnalysisCompleted) => self.status = Completed,
            (Searching | Analyzing, AnalysisFailed) => self.status = Error,

            (Error, RetryRequested) => self.status = Idle,

            (Completed, ExportStarted) if self.exporting => {
                return Err(SessionError::ExportBusy);
            }
            (Completed, ExportStarted) => self.exporting = true,
            (_, ExportStarted) => return Err(SessionError::NothingToExport),
            (_, ExportFinished) => self.exporting = false,

            (state, event) => {
                return Err(SessionError::InvalidTransition { state, event });
            }
        }
        Ok(())
    }

    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::Submitted)
    }

    pub fn response_received(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::ResponseReceived)
    }

    pub fn complete(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::AnalysisCompleted)
    }

    pub fn fail(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::AnalysisFailed)
    }

    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::RetryRequested)
    }

    pub fn begin_export(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::ExportStarted)
    }

    pub fn finish_export(&mut self) -> Result<(), SessionError> {
        self.apply(AuditEvent::ExportFinished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_walks_all_states() {
        let mut session = AuditSession::new();
        assert_eq!(session.status(), AuditStatus::Idle);

        session.begin().unwrap();
        assert_eq!(session.status(), AuditStatus::Searching);
        assert!(session.in_flight());

        session.response_received().unwrap();
        assert_eq!(session.status(), AuditStatus::Analyzing);

        session.complete().unwrap();
        assert_eq!(session.status(), AuditStatus::Completed);
        assert!(!session.in_flight());
    }

    #[test]
    fn submission_while_in_flight_is_rejected_not_raced() {
        let mut session = AuditSession::new();
        session.begin().unwrap();
        assert_eq!(session.begin(), Err(SessionError::Busy));

        session.response_received().unwrap();
        assert_eq!(session.begin(), Err(SessionError::Busy));
    }

    #[test]
    fn error_state_requires_explicit_retry() {
        let mut session = AuditSession::new();
        session.begin().unwrap();
        session.fail().unwrap();
        assert_eq!(session.status(), AuditStatus::Error);

        assert_eq!(session.begin(), Err(SessionError::RetryRequired));
        session.retry().unwrap();
        assert_eq!(session.status(), AuditStatus::Idle);
        session.begin().unwrap();
    }

    #[test]
    fn completed_session_accepts_a_new_submission() {
        let mut session = AuditSession::new();
        session.begin().unwrap();
        session.response_received().unwrap();
        session.complete().unwrap();

        session.begin().unwrap();
        assert_eq!(session.status(), AuditStatus::Searching);
    }

    #[test]
    fn export_requires_completion_and_is_not_reentrant() {
        let mut session = AuditSession::new();
        assert_eq!(session.begin_export(), Err(SessionError::NothingToExport));

        session.begin().unwrap();
        session.response_received().unwrap();
        session.complete().unwrap();

        session.begin_export().unwrap();
        assert!(session.is_exporting());
        assert_eq!(session.begin_export(), Err(SessionError::ExportBusy));

        session.finish_export().unwrap();
        assert!(!session.is_exporting());
        session.begin_export().unwrap();
    }
}
