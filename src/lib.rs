//! Santa Algo - gift exchange matchup service
//!
//! This library assigns every participant exactly one giftee so that all of
//! them form a single loop, while honoring exclusions (pairs that must not
//! draw each other). It also encodes reveal links that carry one
//! participant's details.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{CycleSolver, SolveOutcome, SolverOptions, ShareTokenCodec, get_matchups};
pub use models::{Participant, ParticipantId, ExclusionPair, ResultPair};
