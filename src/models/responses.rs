use serde::{Deserialize, Serialize};
use crate::core::render::MatchupLink;
use crate::models::domain::{Participant, ParticipantId, ResultPair};

/// Response for the matchups endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    /// `solved`, `too_few_participants`, `infeasible` or `budget_exhausted`
    pub status: String,
    pub matchups: Vec<ResultPair>,
    #[serde(rename = "permutationsExamined")]
    pub permutations_examined: u64,
    pub links: Vec<MatchupLink>,
    pub rendered: String,
}

/// Response for the exclusions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionsResponse {
    #[serde(rename = "excludedIds")]
    pub excluded_ids: Vec<ParticipantId>,
    #[serde(rename = "eligiblePartnerIds")]
    pub eligible_partner_ids: Vec<ParticipantId>,
}

/// Response for the fixtures endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesResponse {
    pub participants: Vec<Participant>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
