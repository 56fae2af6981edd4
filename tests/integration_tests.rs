// Integration tests for Santa Algo

use santa_algo::core::{
    edge_is_excluded, expand_exclusions, generate_participants, render_matchups, CycleSolver, IdAllocator,
    ShareTokenCodec, SolveOutcome, SolverOptions,
};
use santa_algo::get_matchups;
use santa_algo::models::{Participant, ParticipantId, ResultPair};
use std::collections::HashMap;

fn create_participants(count: u64) -> Vec<Participant> {
    (0..count)
        .map(|i| Participant::new(i, format!("Player {}", i), format!("{}@email.com", i)))
        .collect()
}

/// Every active participant gives once and receives once, and following
/// the gifts from any participant visits all of them before coming back.
fn assert_single_cycle(pairs: &[ResultPair], participants: &[Participant]) {
    let active: Vec<ParticipantId> = participants.iter().filter(|p| !p.is_empty()).map(|p| p.id).collect();
    assert_eq!(pairs.len(), active.len(), "one edge per active participant");

    let next: HashMap<ParticipantId, ParticipantId> = pairs.iter().map(|p| (p.a, p.b)).collect();
    assert_eq!(next.len(), active.len(), "each participant gives exactly once");

    let mut receivers: Vec<_> = pairs.iter().map(|p| p.b).collect();
    receivers.sort_unstable();
    let mut expected = active.clone();
    expected.sort_unstable();
    assert_eq!(receivers, expected, "each participant receives exactly once");

    let start = active[0];
    let mut current = start;
    for _ in 0..active.len() {
        current = next[&current];
    }
    assert_eq!(current, start);
    let mut seen = std::collections::HashSet::new();
    let mut current = start;
    while seen.insert(current) {
        current = next[&current];
    }
    assert_eq!(seen.len(), active.len(), "one loop covers everyone");

    assert!(pairs.windows(2).all(|w| w[0].a <= w[1].a), "sorted by giver");
}

fn assert_respects_exclusions(pairs: &[ResultPair], participants: &[Participant], one_way: bool) {
    let exclusions = expand_exclusions(participants);
    for pair in pairs {
        assert!(
            !exclusions.iter().any(|e| edge_is_excluded(e, pair.a, pair.b, one_way)),
            "edge {:?} is excluded",
            pair
        );
    }
}

#[test]
fn test_zero_or_one_active_participant() {
    assert!(get_matchups(&[], false).is_empty());
    assert!(get_matchups(&create_participants(1), false).is_empty());

    let mut with_placeholder = create_participants(1);
    with_placeholder.push(Participant::new(5, "", ""));
    assert!(get_matchups(&with_placeholder, true).is_empty());
}

#[test]
fn test_two_participants_form_two_cycle() {
    let pairs = get_matchups(&create_participants(2), false);
    assert_eq!(pairs, vec![ResultPair { a: 0, b: 1 }, ResultPair { a: 1, b: 0 }]);
}

#[test]
fn test_three_participants_form_triangle() {
    let players = create_participants(3);
    let pairs = get_matchups(&players, false);
    assert_single_cycle(&pairs, &players);

    let forward = vec![ResultPair { a: 0, b: 1 }, ResultPair { a: 1, b: 2 }, ResultPair { a: 2, b: 0 }];
    let backward = vec![ResultPair { a: 0, b: 2 }, ResultPair { a: 1, b: 0 }, ResultPair { a: 2, b: 1 }];
    assert!(pairs == forward || pairs == backward, "{:?}", pairs);

    let unshuffled = CycleSolver::new(SolverOptions { max_permutations: None, shuffle: false });
    assert_eq!(unshuffled.solve(&players, false), forward);
}

#[test]
fn test_mutual_exclusion_never_used() {
    let mut players = create_participants(4);
    players[0].exclusions = vec![1];

    for seed in 0..50 {
        let report = CycleSolver::default().solve_seeded(&players, false, seed);
        let SolveOutcome::Solved(pairs) = report.outcome else {
            panic!("expected a solution for seed {}", seed);
        };
        assert_single_cycle(&pairs, &players);
        assert!(!pairs.contains(&ResultPair { a: 0, b: 1 }));
        assert!(!pairs.contains(&ResultPair { a: 1, b: 0 }));
    }
}

#[test]
fn test_one_way_exclusion_allows_reverse() {
    // 0 must not give to 1 or 2; 0 -> 3 is the only option left
    let mut players = create_participants(4);
    players[0].exclusions = vec![1, 2];

    let pairs = get_matchups(&players, true);
    assert_single_cycle(&pairs, &players);
    assert_respects_exclusions(&pairs, &players, true);
    assert!(pairs.contains(&ResultPair { a: 0, b: 3 }));

    // Mutually, 0 can only sit next to 3, which a 4-cycle cannot do
    assert!(get_matchups(&players, false).is_empty());
}

#[test]
fn test_complete_exclusion_graph_is_infeasible() {
    for n in 3..=4 {
        let mut players = create_participants(n);
        for p in players.iter_mut() {
            p.exclusions = (0..n).filter(|&j| j != p.id).collect();
        }
        let report = CycleSolver::default().solve_seeded(&players, false, 1);
        assert_eq!(report.outcome, SolveOutcome::Infeasible);
        assert_eq!(report.permutations_examined, (1..=n).product::<u64>());
        assert!(get_matchups(&players, true).is_empty());
    }
}

#[test]
fn test_solution_found_whenever_one_exists() {
    // Each participant excludes its successor in id order, mutually; a
    // cycle still exists by skipping around
    let mut players = create_participants(7);
    for p in players.iter_mut() {
        p.exclusions = vec![(p.id + 1) % 7];
    }

    let pairs = get_matchups(&players, false);
    assert_single_cycle(&pairs, &players);
    assert_respects_exclusions(&pairs, &players, false);
}

#[test]
fn test_generated_fixtures() {
    let allocator = IdAllocator::new();

    let players = generate_participants(&allocator, 6, 0);
    let pairs = get_matchups(&players, false);
    assert_single_cycle(&pairs, &players);

    // With three participants and two exclusions each, nobody can give
    let players = generate_participants(&allocator, 3, 2);
    assert!(get_matchups(&players, true).is_empty());

    // Everyone but the first participant excludes the first participant,
    // so nobody is left to give to them
    let players = generate_participants(&allocator, 5, 2);
    let report = CycleSolver::default().solve_seeded(&players, true, 9);
    assert_eq!(report.outcome, SolveOutcome::Infeasible);
    assert_eq!(report.permutations_examined, 120);
}

#[test]
fn test_render_matchups_end_to_end() {
    let players = create_participants(3);
    let codec = ShareTokenCodec::new("integration key");
    let pairs = get_matchups(&players, false);

    let rendered = render_matchups(&pairs, &players, "https://gifts.example/reveal", &codec).unwrap();
    let entries: Vec<&str> = rendered.split("\n\n").collect();
    assert_eq!(entries.len(), 3);

    for (entry, pair) in entries.iter().zip(&pairs) {
        let (giver, link) = entry.split_once('\n').unwrap();
        assert_eq!(giver, format!("Player {}", pair.a));
        let secret = link.split_once("?secret=").unwrap().1;
        let giftee: Participant = codec.decode_share_secret(secret).unwrap();
        assert_eq!(giftee.id, pair.b);
    }
}
