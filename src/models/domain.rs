use serde::{Deserialize, Serialize};

/// Participant identifier, allocated by [`crate::core::IdAllocator`]
pub type ParticipantId = u64;

/// A person taking part in the gift exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Ids this participant must not be paired with
    #[serde(default)]
    pub exclusions: Vec<ParticipantId>,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            address: String::new(),
            exclusions: Vec::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_exclusions(mut self, exclusions: Vec<ParticipantId>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Placeholder rows carry neither a name nor an email
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// Forbidden pairing: `a` must not be paired with `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExclusionPair {
    pub a: ParticipantId,
    pub b: ParticipantId,
}

/// Cycle edge: `a` gives to `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultPair {
    pub a: ParticipantId,
    pub b: ParticipantId,
}

impl ResultPair {
    pub fn giver(&self) -> ParticipantId {
        self.a
    }

    pub fn receiver(&self) -> ParticipantId {
        self.b
    }
}
