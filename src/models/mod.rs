// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Participant, ParticipantId, ExclusionPair, ResultPair};
pub use requests::{SolveRequest, ExclusionsRequest, GenerateFixturesRequest, DecodeShareQuery};
pub use responses::{SolveResponse, ExclusionsResponse, FixturesResponse, HealthResponse, ErrorResponse};
