use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{ExclusionPair, Participant, ParticipantId};

/// Request to compute matchups
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SolveRequest {
    #[validate(length(max = 64))]
    pub participants: Vec<Participant>,
    #[serde(default)]
    #[serde(alias = "one_way", rename = "oneWay")]
    pub one_way: bool,
    /// Fixed seed for a reproducible shuffle
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Request to look up the exclusions of one participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExclusionsRequest {
    #[validate(length(max = 1000))]
    pub participants: Vec<Participant>,
    /// Explicit exclusion list; expanded from `participants` when omitted
    #[serde(default)]
    #[serde(alias = "exclusion_pairs", rename = "exclusionPairs")]
    pub exclusion_pairs: Option<Vec<ExclusionPair>>,
    pub id: ParticipantId,
    #[serde(default)]
    #[serde(alias = "one_way", rename = "oneWay")]
    pub one_way: bool,
}

/// Request to generate demo participants
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateFixturesRequest {
    #[validate(range(max = 1000))]
    pub count: usize,
    #[serde(default)]
    #[serde(alias = "num_exclusions", rename = "numExclusions")]
    pub num_exclusions: usize,
}

/// Query string of the share link
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecodeShareQuery {
    #[validate(length(min = 1))]
    pub secret: String,
}
