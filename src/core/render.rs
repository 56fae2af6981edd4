use serde::{Deserialize, Serialize};
use crate::core::exclusions::pair_has_contact_info;
use crate::core::registry::find_participant;
use crate::core::share::{ShareTokenCodec, ShareTokenError};
use crate::models::{Participant, ParticipantId, ResultPair};

/// One giver with the reveal link for their giftee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupLink {
    #[serde(rename = "giverId")]
    pub giver_id: ParticipantId,
    #[serde(rename = "giverName")]
    pub giver_name: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: ParticipantId,
    #[serde(rename = "shareLink")]
    pub share_link: String,
    /// Both sides have an email, so the link can be sent out
    #[serde(rename = "canNotify")]
    pub can_notify: bool,
}

/// Build a reveal link per matchup.
///
/// Matchups whose giver or receiver is not in `participants` are skipped.
pub fn matchup_links(
    matchups: &[ResultPair],
    participants: &[Participant],
    base_url: &str,
    codec: &ShareTokenCodec,
) -> Result<Vec<MatchupLink>, ShareTokenError> {
    let mut links = Vec::with_capacity(matchups.len());

    for pair in matchups {
        let (Some(giver), Some(receiver)) = (
            find_participant(participants, pair.giver()),
            find_participant(participants, pair.receiver()),
        ) else {
            tracing::warn!("Skipping matchup {} -> {}: participant not found", pair.a, pair.b);
            continue;
        };

        links.push(MatchupLink {
            giver_id: giver.id,
            giver_name: giver.name.clone(),
            receiver_id: receiver.id,
            share_link: codec.build_share_link(base_url, receiver)?,
            can_notify: pair_has_contact_info(participants, giver.id, receiver.id),
        });
    }

    Ok(links)
}

/// Plain-text block for the mailer: giver name, then the giftee link, with
/// a blank line between entries
pub fn render_links(links: &[MatchupLink]) -> String {
    links
        .iter()
        .map(|link| format!("{}\n{}", link.giver_name, link.share_link))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_matchups(
    matchups: &[ResultPair],
    participants: &[Participant],
    base_url: &str,
    codec: &ShareTokenCodec,
) -> Result<String, ShareTokenError> {
    Ok(render_links(&matchup_links(matchups, participants, base_url, codec)?))
}
