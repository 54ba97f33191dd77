//! Submission state machine.
//!
//! ```text
//! [Validating] ──ok──→ [Analyzing] ──→ [Storing] ──ledger off──→ [LedgerDisabled] ──→ [Idle]
//!      │                                   │   └──ledger on───→ [Registering] ─┬─failed / gate closed─→ [Idle]
//!      │ invalid                           │ write failed                      └─gate open─→ [IssuingCredits]
//!      ↓                                   ↓                                          │
//!  [Aborted]                           [Aborted]            [Idle] / [IssuingCredits] ──→ [Done]
//! ```

use std::fmt;

use tracing::{debug, warn};

/// Where a submission is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionState {
    Validating,
    Analyzing,
    Storing,
    LedgerDisabled,
    Registering,
    /// No (further) ledger work for this submission.
    Idle,
    IssuingCredits,
    Done,
    /// Terminal failure: invalid input or a failed store write.
    Aborted,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Validating => "validating",
            SubmissionState::Analyzing => "analyzing",
            SubmissionState::Storing => "storing",
            SubmissionState::LedgerDisabled => "ledger-disabled",
            SubmissionState::Registering => "registering",
            SubmissionState::Idle => "idle",
            SubmissionState::IssuingCredits => "issuing-credits",
            SubmissionState::Done => "done",
            SubmissionState::Aborted => "aborted",
        }
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Validating, Analyzing)
                | (Validating, Aborted)
                | (Analyzing, Storing)
                | (Storing, LedgerDisabled)
                | (Storing, Registering)
                | (Storing, Aborted)
                | (LedgerDisabled, Idle)
                | (Registering, Idle)
                | (Registering, IssuingCredits)
                | (Idle, Done)
                | (IssuingCredits, Done)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Done | SubmissionState::Aborted)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks and logs the state of one submission.
#[derive(Debug)]
pub struct SubmissionTracker {
    state: SubmissionState,
    history: Vec<SubmissionState>,
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Validating,
            history: vec![SubmissionState::Validating],
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Every state visited so far, in order.
    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    /// Move to `next`, logging the transition.
    ///
    /// An illegal transition is logged and still applied; the pipeline
    /// code is the only caller.
    pub fn advance(&mut self, next: SubmissionState) {
        if self.state.can_transition_to(next) {
            debug!(from = %self.state, state = %next, "[bc-04] State transition");
        } else {
            warn!(from = %self.state, state = %next, "[bc-04] Unexpected state transition");
        }
        self.state = next;
        self.history.push(next);
    }
}
