use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use crate::models::{Participant, ParticipantId};

/// Hands out participant ids. Values are never reused for the lifetime of
/// the allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start allocating at `first`, e.g. past the ids of restored records
    pub fn starting_at(first: ParticipantId) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Next fresh id, strictly greater than every id returned before
    pub fn allocate(&self) -> ParticipantId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// First participant with the given id, in input order
pub fn find_participant(participants: &[Participant], id: ParticipantId) -> Option<&Participant> {
    participants.iter().find(|p| p.id == id)
}

/// First participant with the given name, in input order
pub fn find_participant_by_name<'a>(participants: &'a [Participant], name: &str) -> Option<&'a Participant> {
    participants.iter().find(|p| p.name == name)
}

/// True when the participant is missing or is a placeholder row
pub fn is_empty_participant(participant: Option<&Participant>) -> bool {
    participant.map_or(true, Participant::is_empty)
}

/// Owns the participant list of one exchange
#[derive(Debug, Clone)]
pub struct ParticipantRegistry {
    allocator: Arc<IdAllocator>,
    participants: Vec<Participant>,
}

impl ParticipantRegistry {
    pub fn new(allocator: Arc<IdAllocator>) -> Self {
        Self {
            allocator,
            participants: Vec::new(),
        }
    }

    pub fn allocate_id(&self) -> ParticipantId {
        self.allocator.allocate()
    }

    /// Blank participant with a fresh id, not yet added to the registry
    pub fn create_empty_participant(&self) -> Participant {
        Participant::new(self.allocate_id(), "", "")
    }

    /// Add a participant under a fresh id and return that id
    pub fn add(&mut self, name: impl Into<String>, email: impl Into<String>) -> ParticipantId {
        let participant = Participant::new(self.allocate_id(), name, email);
        let id = participant.id;
        self.participants.push(participant);
        id
    }

    /// Append a trailing placeholder row
    pub fn push_empty(&mut self) -> ParticipantId {
        let participant = self.create_empty_participant();
        let id = participant.id;
        self.participants.push(participant);
        id
    }

    pub fn find(&self, id: ParticipantId) -> Option<&Participant> {
        find_participant(&self.participants, id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Participant> {
        find_participant_by_name(&self.participants, name)
    }

    /// Apply `change` to the participant with `id`. The id itself cannot be
    /// changed. Returns false when no such participant exists.
    pub fn update<F>(&mut self, id: ParticipantId, change: F) -> bool
    where
        F: FnOnce(&mut Participant),
    {
        match self.participants.iter_mut().find(|p| p.id == id) {
            Some(participant) => {
                change(participant);
                participant.id = id;
                true
            }
            None => false,
        }
    }

    pub fn set_exclusions(&mut self, id: ParticipantId, exclusions: Vec<ParticipantId>) -> bool {
        self.update(id, |p| p.exclusions = exclusions)
    }

    /// Remove a participant. Exclusion lists that still mention its id are
    /// left alone; lookups filter stale ids.
    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Participants that take part in matchup generation
    pub fn active_participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
