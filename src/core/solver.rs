use std::collections::HashSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use crate::core::exclusions::expand_exclusions;
use crate::core::permutations::{factorial, Permutations};
use crate::models::{Participant, ParticipantId, ResultPair};

/// How a solve attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A valid cycle, sorted ascending by giver id
    Solved(Vec<ResultPair>),
    /// Fewer than two non-empty participants
    TooFewParticipants,
    /// Two active participants share this id, so no cycle can tell them apart
    DuplicateParticipant(ParticipantId),
    /// Every ordering was examined and all of them hit an exclusion
    Infeasible,
    /// The permutation budget ran out before a cycle was found
    BudgetExhausted,
}

impl SolveOutcome {
    /// Wire name used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveOutcome::Solved(_) => "solved",
            SolveOutcome::TooFewParticipants => "too_few_participants",
            SolveOutcome::DuplicateParticipant(_) => "duplicate_participant",
            SolveOutcome::Infeasible => "infeasible",
            SolveOutcome::BudgetExhausted => "budget_exhausted",
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// Collapse to the plain edge list; every failure becomes empty
    pub fn into_pairs(self) -> Vec<ResultPair> {
        match self {
            SolveOutcome::Solved(pairs) => pairs,
            _ => Vec::new(),
        }
    }
}

/// Result of the search plus how much of it was done
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub permutations_examined: u64,
}

/// Search limits and ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    /// Stop after this many permutations; `None` searches all of them
    pub max_permutations: Option<u64>,
    /// Shuffle participants before searching, so repeated solves pick
    /// different cycles
    pub shuffle: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_permutations: None,
            shuffle: true,
        }
    }
}

/// Finds a single gift-giving cycle over all participants that avoids every
/// exclusion.
///
/// The search walks permutations of the (shuffled) participants and reads
/// each one as a closed loop `p0 -> p1 -> ... -> pk -> p0`. It is exhaustive:
/// without a budget, an infeasible answer means no valid cycle exists.
#[derive(Debug, Clone, Default)]
pub struct CycleSolver {
    options: SolverOptions,
}

impl CycleSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Matchups for `participants`, or an empty list when there are fewer
    /// than two active participants or no valid cycle
    pub fn solve(&self, participants: &[Participant], one_way: bool) -> Vec<ResultPair> {
        self.solve_detailed(participants, one_way, &mut rand::thread_rng())
            .outcome
            .into_pairs()
    }

    /// Same as [`CycleSolver::solve_detailed`] with a reproducible shuffle
    pub fn solve_seeded(&self, participants: &[Participant], one_way: bool, seed: u64) -> SolveReport {
        let mut rng = StdRng::seed_from_u64(seed);
        self.solve_detailed(participants, one_way, &mut rng)
    }

    pub fn solve_detailed<R>(&self, participants: &[Participant], one_way: bool, rng: &mut R) -> SolveReport
    where
        R: Rng + ?Sized,
    {
        let active: Vec<&Participant> = participants.iter().filter(|p| !p.is_empty()).collect();

        if active.len() < 2 {
            return SolveReport {
                outcome: SolveOutcome::TooFewParticipants,
                permutations_examined: 0,
            };
        }

        if let Some(id) = first_duplicate_id(active.iter().copied()) {
            tracing::warn!("Participant id {} appears more than once", id);
            return SolveReport {
                outcome: SolveOutcome::DuplicateParticipant(id),
                permutations_examined: 0,
            };
        }

        let forbidden = forbidden_edges(&active, one_way);

        let mut order: Vec<ParticipantId> = active.iter().map(|p| p.id).collect();
        if self.options.shuffle {
            order.shuffle(rng);
        }

        tracing::debug!(
            "Searching up to {} orderings of {} participants ({} forbidden edges, one_way={})",
            factorial(order.len()),
            order.len(),
            forbidden.len(),
            one_way
        );

        let mut examined: u64 = 0;
        for candidate in Permutations::new(order) {
            if self.options.max_permutations.is_some_and(|max| examined >= max) {
                tracing::warn!("Permutation budget exhausted after {} candidates", examined);
                return SolveReport {
                    outcome: SolveOutcome::BudgetExhausted,
                    permutations_examined: examined,
                };
            }
            examined += 1;

            if cycle_is_valid(&candidate, &forbidden) {
                let mut pairs = cycle_edges(&candidate);
                pairs.sort_by_key(|pair| pair.a);
                tracing::debug!("Found a valid cycle after {} candidates", examined);
                return SolveReport {
                    outcome: SolveOutcome::Solved(pairs),
                    permutations_examined: examined,
                };
            }
        }

        tracing::debug!("No valid cycle among {} candidates", examined);
        SolveReport {
            outcome: SolveOutcome::Infeasible,
            permutations_examined: examined,
        }
    }
}

/// Solve with default options: shuffled, unbounded
pub fn get_matchups(participants: &[Participant], one_way: bool) -> Vec<ResultPair> {
    CycleSolver::default().solve(participants, one_way)
}

/// First id that occurs twice among `participants`, in input order
pub fn first_duplicate_id<'a, I>(participants: I) -> Option<ParticipantId>
where
    I: IntoIterator<Item = &'a Participant>,
{
    let mut seen = HashSet::new();
    participants.into_iter().map(|p| p.id).find(|&id| !seen.insert(id))
}

/// Directed edges no cycle may use. A mutual exclusion forbids both
/// directions.
fn forbidden_edges(active: &[&Participant], one_way: bool) -> HashSet<(ParticipantId, ParticipantId)> {
    let mut forbidden = HashSet::new();
    for pair in expand_exclusions(active.iter().copied()) {
        forbidden.insert((pair.a, pair.b));
        if !one_way {
            forbidden.insert((pair.b, pair.a));
        }
    }
    forbidden
}

/// Edges of the closed loop through `order`, in loop order
fn cycle_edges(order: &[ParticipantId]) -> Vec<ResultPair> {
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(&a, &b)| ResultPair { a, b })
        .collect()
}

fn cycle_is_valid(order: &[ParticipantId], forbidden: &HashSet<(ParticipantId, ParticipantId)>) -> bool {
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .all(|(&a, &b)| !forbidden.contains(&(a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: ParticipantId, exclusions: Vec<ParticipantId>) -> Participant {
        Participant::new(id, format!("Player {}", id), format!("{}@email.com", id)).with_exclusions(exclusions)
    }

    fn in_order() -> CycleSolver {
        CycleSolver::new(SolverOptions {
            max_permutations: None,
            shuffle: false,
        })
    }

    #[test]
    fn test_cycle_edges_close_the_loop() {
        assert_eq!(
            cycle_edges(&[5, 3, 9]),
            vec![ResultPair { a: 5, b: 3 }, ResultPair { a: 3, b: 9 }, ResultPair { a: 9, b: 5 }]
        );
    }

    #[test]
    fn test_two_participants() {
        let players = vec![participant(0, vec![]), participant(1, vec![])];
        let pairs = CycleSolver::default().solve(&players, false);
        assert_eq!(pairs, vec![ResultPair { a: 0, b: 1 }, ResultPair { a: 1, b: 0 }]);
    }

    #[test]
    fn test_three_participants_in_order() {
        let players = vec![participant(0, vec![]), participant(1, vec![]), participant(2, vec![])];
        let pairs = in_order().solve(&players, false);
        assert_eq!(
            pairs,
            vec![ResultPair { a: 0, b: 1 }, ResultPair { a: 1, b: 2 }, ResultPair { a: 2, b: 0 }]
        );
    }

    #[test]
    fn test_in_order_skips_forbidden_first_candidate() {
        // 0 -> 1 -> 2 -> 0 is blocked one way, so the reverse loop is the answer
        let players = vec![participant(0, vec![1]), participant(1, vec![]), participant(2, vec![])];
        let pairs = in_order().solve(&players, true);
        assert_eq!(
            pairs,
            vec![ResultPair { a: 0, b: 2 }, ResultPair { a: 1, b: 0 }, ResultPair { a: 2, b: 1 }]
        );
    }

    #[test]
    fn test_too_few_participants() {
        let solver = CycleSolver::default();
        assert_eq!(solver.solve_seeded(&[], false, 1).outcome, SolveOutcome::TooFewParticipants);
        assert_eq!(
            solver.solve_seeded(&[participant(0, vec![])], false, 1).outcome,
            SolveOutcome::TooFewParticipants
        );
    }

    #[test]
    fn test_placeholders_do_not_count() {
        let players = vec![participant(0, vec![]), Participant::new(1, "", ""), Participant::new(2, "", "")];
        assert_eq!(
            CycleSolver::default().solve_seeded(&players, false, 3).outcome,
            SolveOutcome::TooFewParticipants
        );
    }

    #[test]
    fn test_mutual_exclusion_between_two_is_infeasible() {
        let players = vec![participant(0, vec![1]), participant(1, vec![])];
        let report = CycleSolver::default().solve_seeded(&players, false, 7);
        assert_eq!(report.outcome, SolveOutcome::Infeasible);
        assert_eq!(report.permutations_examined, 2);
    }

    #[test]
    fn test_one_way_exclusion_between_two_is_infeasible() {
        // A 2-cycle always uses both directions
        let players = vec![participant(0, vec![1]), participant(1, vec![])];
        assert!(CycleSolver::default().solve(&players, true).is_empty());
    }

    #[test]
    fn test_budget_exhausted_is_distinct() {
        let players: Vec<_> = (0..4).map(|i| participant(i, (0..4).filter(|&j| j != i).collect())).collect();
        let solver = CycleSolver::new(SolverOptions {
            max_permutations: Some(5),
            shuffle: true,
        });
        let report = solver.solve_seeded(&players, false, 11);
        assert_eq!(report.outcome, SolveOutcome::BudgetExhausted);
        assert_eq!(report.permutations_examined, 5);

        let report = CycleSolver::default().solve_seeded(&players, false, 11);
        assert_eq!(report.outcome, SolveOutcome::Infeasible);
        assert_eq!(report.permutations_examined, 24);
    }

    #[test]
    fn test_seeded_solve_is_reproducible() {
        let players: Vec<_> = (0..6).map(|i| participant(i, vec![(i + 1) % 6])).collect();
        let solver = CycleSolver::default();
        let first = solver.solve_seeded(&players, false, 42);
        let second = solver.solve_seeded(&players, false, 42);
        assert!(first.outcome.is_solved());
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.permutations_examined, second.permutations_examined);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let players = vec![
            participant(0, vec![]),
            Participant::new(0, "Second Zero", "zero@email.com"),
            participant(1, vec![]),
        ];
        for seed in 0..8 {
            let report = CycleSolver::default().solve_seeded(&players, false, seed);
            assert_eq!(report.outcome, SolveOutcome::DuplicateParticipant(0));
            assert_eq!(report.permutations_examined, 0);
        }
        assert!(in_order().solve(&players, true).is_empty());
    }

    #[test]
    fn test_duplicate_placeholder_ids_ignored() {
        let players = vec![
            participant(0, vec![]),
            participant(1, vec![]),
            Participant::new(7, "", ""),
            Participant::new(7, "", ""),
        ];
        assert!(CycleSolver::default().solve_seeded(&players, false, 2).outcome.is_solved());
    }

    #[test]
    fn test_first_duplicate_id() {
        let players = vec![participant(3, vec![]), participant(1, vec![]), participant(1, vec![]), participant(3, vec![])];
        assert_eq!(first_duplicate_id(&players), Some(1));
        assert_eq!(first_duplicate_id(&players[..2]), None);
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(SolveOutcome::DuplicateParticipant(4).as_str(), "duplicate_participant");
        assert_eq!(SolveOutcome::Solved(vec![]).as_str(), "solved");
        assert_eq!(SolveOutcome::Infeasible.as_str(), "infeasible");
        assert_eq!(SolveOutcome::BudgetExhausted.into_pairs(), vec![]);
    }
}
