//! # BC-02 Analysis Client
//!
//! Turns evidence plus declared metadata into an `AnalysisResult`, whatever
//! the external scorer does.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Outcomes
//!
//! | Scorer behaviour | Result | Degradation |
//! |------------------|--------|-------------|
//! | Well-formed output within the timeout | Parsed output | none |
//! | Malformed output | Deterministic fallback | `MalformedOutput` |
//! | Error / non-zero exit / unreachable | Deterministic fallback | `ScorerFailed` |
//! | No answer within the timeout | Deterministic fallback | `Timeout` |
//!
//! `analyze` never fails. The degradation is reported alongside the result
//! for observability only.
//!
//! ## Fallback Policy
//!
//! Credits are `floor(area × base rate)` with the per-ecosystem rates in
//! [`ECOSYSTEM_BASE_RATES`]. The remaining fields come from a PRNG seeded
//! with the configured seed mixed with a digest of the declared metadata,
//! so the same metadata always yields the same fallback.
//!
//! ## Module Structure
//!
//! ```text
//! bc-02-analysis/
//! ├── domain/          # Fallback policy, scorer output validation, errors
//! ├── ports/           # AnalysisApi (inbound), Scorer (outbound) + MockScorer
//! ├── adapters/        # SubprocessScorer, UnconfiguredScorer
//! ├── application/     # AnalysisService
//! └── config.rs        # AnalysisConfig, ScorerCommandConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{SubprocessScorer, UnconfiguredScorer};
pub use application::AnalysisService;
pub use config::{
    AnalysisConfig, ScorerCommandConfig, DEFAULT_FALLBACK_SEED, DEFAULT_SCORER_TIMEOUT,
};
pub use domain::{
    base_rate, fallback_content, parse_scorer_output, truncate_for_log, AnalysisDegradation,
    AnalysisOutcome, ScorerError, ScorerReport, ECOSYSTEM_BASE_RATES,
};
pub use ports::{AnalysisApi, MockScorer, MockScorerBehavior, Scorer};
