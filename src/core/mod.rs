// Core algorithm exports
pub mod exclusions;
pub mod fixtures;
pub mod permutations;
pub mod registry;
pub mod render;
pub mod share;
pub mod solver;

pub use exclusions::{expand_exclusions, edge_is_excluded, exclusions_for, eligible_partners_for, pair_has_contact_info};
pub use fixtures::generate_participants;
pub use permutations::Permutations;
pub use registry::{IdAllocator, ParticipantRegistry, find_participant, find_participant_by_name, is_empty_participant};
pub use render::{MatchupLink, matchup_links, render_links, render_matchups};
pub use share::{ShareTokenCodec, ShareTokenError, cleaned_object};
pub use solver::{first_duplicate_id, CycleSolver, SolveOutcome, SolveReport, SolverOptions, get_matchups};
