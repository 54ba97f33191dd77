//! # BC-04 Submission Orchestrator
//!
//! Turns one evidence submission into a durable, content-addressed analysis
//! result and an optional ledger registration.
//!
//! **Subsystem ID:** 04  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Pipeline
//!
//! ```text
//! Validating → Analyzing → Storing → (LedgerDisabled | Registering)
//!            → (Idle | IssuingCredits) → Done
//! ```
//!
//! ## Failure Policy
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Invalid input | Abort with `ClientInput` (400), no external call made |
//! | Scorer timeout / error / garbage | Deterministic fallback, `degraded` set |
//! | Store write failure | Abort with `Persistence` (500) |
//! | Ledger disabled | `skipped-ledger-disabled`, local project id |
//! | Registration failure | `registration-failed`, local project id |
//! | Issuance failure | `credits-failed`, registration kept |
//!
//! Nothing is retried within one submission.
//!
//! ## Module Structure
//!
//! ```text
//! bc-04-submission/
//! ├── domain/          # Policy constants, request validation, state machine, outcome
//! ├── ports/           # SubmissionApi (inbound), subsystem dependencies (outbound)
//! ├── application/     # SubmissionService
//! └── config.rs        # SubmissionConfig
//! ```

#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::SubmissionService;
pub use config::SubmissionConfig;
pub use domain::{
    credit_gate_open, LedgerFailure, LedgerOutcome, LedgerOutcomeKind, RawSubmission,
    SubmissionError, SubmissionOutcome, SubmissionRequest, SubmissionState, SubmissionTracker,
    ValidationError, CONFIDENCE_THRESHOLD, DEFAULT_MAX_EVIDENCE_BYTES, LOCAL_PROJECT_ID_PREFIX,
};
pub use ports::SubmissionApi;
