use crate::core::registry::IdAllocator;
use crate::models::Participant;

/// Synthetic participants for demos and solver benchmarks.
///
/// Creates `count` participants named `Participant {i}`. When
/// `num_exclusions > 1`, each one excludes the first `num_exclusions` other
/// generated participants in list order. A placeholder row is appended at
/// the end.
pub fn generate_participants(allocator: &IdAllocator, count: usize, num_exclusions: usize) -> Vec<Participant> {
    let mut participants: Vec<Participant> = (0..count)
        .map(|i| {
            Participant::new(allocator.allocate(), format!("Participant {}", i), format!("{}@email.com", i))
                .with_address(format!("{}th Street Road", i))
        })
        .collect();

    if num_exclusions > 1 {
        let ids: Vec<_> = participants.iter().map(|p| p.id).collect();
        for (i, participant) in participants.iter_mut().enumerate() {
            participant.exclusions = ids
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &id)| id)
                .take(num_exclusions)
                .collect();
        }
    }

    participants.push(Participant::new(allocator.allocate(), "", ""));
    participants
}
