//! Listing risk scoring for Guardify.
//!
//! Turns [`ProductSignals`](guardify_core::ProductSignals) into a bounded
//! [`ScoreResult`](guardify_core::ScoreResult). The local heuristic is a pure
//! rule table; the remote scorer asks an external classifier first and falls
//! back to the heuristic on any failure or when its time budget runs out.

pub mod engine;
pub mod error;
pub mod heuristic;
pub mod remote;
pub mod rules;
pub mod session;
pub mod text;

pub use engine::{scan, Scorer};
pub use error::ScoringError;
pub use heuristic::{score_local, score_with_rules};
pub use remote::{
    HttpTransport, RemoteScoreRequest, RemoteScorer, RemoteTransport, DEFAULT_REMOTE_BUDGET,
};
pub use rules::{Rule, RuleContext, RULES};
pub use session::{ScanSession, ScanTicket};
