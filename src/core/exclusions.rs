use crate::core::registry::find_participant;
use crate::models::{ExclusionPair, Participant, ParticipantId};

/// Flatten every participant's `exclusions` into directed pairs
pub fn expand_exclusions<'a, I>(participants: I) -> Vec<ExclusionPair>
where
    I: IntoIterator<Item = &'a Participant>,
{
    participants
        .into_iter()
        .flat_map(|participant| {
            participant
                .exclusions
                .iter()
                .map(move |&excluded| ExclusionPair { a: participant.id, b: excluded })
        })
        .collect()
}

/// Whether the edge `from -> to` hits `pair`. Mutual exclusions also match
/// the reversed direction.
#[inline]
pub fn edge_is_excluded(pair: &ExclusionPair, from: ParticipantId, to: ParticipantId, one_way: bool) -> bool {
    (pair.a == from && pair.b == to) || (!one_way && pair.a == to && pair.b == from)
}

/// Ids excluded for participant `id`, ascending and without duplicates.
///
/// Ids that no longer belong to a participant in `participants` are dropped,
/// since exclusion lists may lag behind removals.
pub fn exclusions_for(
    participants: &[Participant],
    exclusion_pairs: &[ExclusionPair],
    id: ParticipantId,
    one_way: bool,
) -> Vec<ParticipantId> {
    let mut excluded: Vec<ParticipantId> = exclusion_pairs
        .iter()
        .filter_map(|pair| {
            if pair.a == id {
                Some(pair.b)
            } else if !one_way && pair.b == id {
                Some(pair.a)
            } else {
                None
            }
        })
        .filter(|&other| find_participant(participants, other).is_some())
        .collect();

    excluded.sort_unstable();
    excluded.dedup();
    excluded
}

/// Participants `id` may still be paired with, ascending by id.
///
/// Skips `id` itself, placeholder rows, and everyone in [`exclusions_for`].
pub fn eligible_partners_for<'a>(
    participants: &'a [Participant],
    exclusion_pairs: &[ExclusionPair],
    id: ParticipantId,
    one_way: bool,
) -> Vec<&'a Participant> {
    let excluded = exclusions_for(participants, exclusion_pairs, id, one_way);

    let mut eligible: Vec<&Participant> = participants
        .iter()
        .filter(|p| p.id != id)
        .filter(|p| !p.is_empty())
        .filter(|p| excluded.binary_search(&p.id).is_err())
        .collect();

    eligible.sort_by_key(|p| p.id);
    eligible
}

/// Both ends resolve to participants with an email address
pub fn pair_has_contact_info(participants: &[Participant], a: ParticipantId, b: ParticipantId) -> bool {
    match (find_participant(participants, a), find_participant(participants, b)) {
        (Some(giver), Some(receiver)) => giver.has_email() && receiver.has_email(),
        _ => false,
    }
}
