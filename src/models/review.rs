//! Review log of classification corrections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, MatchId, PlayerId, ReviewId, Role};

/// Why a participant's role was looked at a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewReason {
    /// Player ID was on the operator's armor override list
    ForcedOverride,
    /// Infantry with high effectiveness and little infantry-weapon evidence
    LowConfidenceInfantry,
    /// No weapon evidence but effectiveness high enough to be an armor spotter
    SpottingArmor,
}

impl std::fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewReason::ForcedOverride => write!(f, "forced_override"),
            ReviewReason::LowConfidenceInfantry => write!(f, "low_confidence_infantry"),
            ReviewReason::SpottingArmor => write!(f, "spotting_armor"),
        }
    }
}

/// One correction (or confirmation) of a participant's role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Derived from match, player and reason
    pub id: ReviewId,

    pub match_id: MatchId,

    pub player_id: PlayerId,

    pub player_name: String,

    pub reason: ReviewReason,

    /// Role before this review
    pub original_role: Role,

    /// Role after this review
    pub final_role: Role,

    /// Whether the decision came from the decision callback
    pub asked: bool,

    pub created_at: DateTime<Utc>,
}

impl ReviewItem {
    pub fn new(
        match_id: MatchId,
        player_id: PlayerId,
        player_name: String,
        reason: ReviewReason,
        original_role: Role,
        final_role: Role,
    ) -> Self {
        let id = review_id(&match_id, &player_id, reason);
        Self {
            id,
            match_id,
            player_id,
            player_name,
            reason,
            original_role,
            final_role,
            asked: false,
            created_at: Utc::now(),
        }
    }

    /// Builder method to mark the decision as answered by the callback.
    pub fn with_asked(mut self, asked: bool) -> Self {
        self.asked = asked;
        self
    }

    /// The same review attached to another match id.
    pub fn for_match(&self, match_id: &MatchId) -> Self {
        Self {
            id: review_id(match_id, &self.player_id, self.reason),
            match_id: match_id.clone(),
            ..self.clone()
        }
    }

    /// Whether the review changed the role.
    pub fn changed_role(&self) -> bool {
        self.original_role != self.final_role
    }
}

fn review_id(match_id: &MatchId, player_id: &PlayerId, reason: ReviewReason) -> ReviewId {
    EntityId::generate(&[match_id.as_str(), player_id.as_str(), &reason.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(reason: ReviewReason, from: Role, to: Role) -> ReviewItem {
        ReviewItem::new(
            MatchId::from("match-1"),
            PlayerId::from("7656"),
            "Tanker".to_string(),
            reason,
            from,
            to,
        )
    }

    #[test]
    fn test_review_item_creation() {
        let r = item(ReviewReason::ForcedOverride, Role::Infantry, Role::Armor);
        assert!(r.changed_role());
        assert!(!r.asked);
        assert_eq!(r.id.as_str().len(), 16);
    }

    #[test]
    fn test_review_item_declined_keeps_role() {
        let r = item(
            ReviewReason::LowConfidenceInfantry,
            Role::Infantry,
            Role::Infantry,
        )
        .with_asked(true);
        assert!(!r.changed_role());
        assert!(r.asked);
    }

    #[test]
    fn test_review_id_depends_on_reason() {
        let a = item(ReviewReason::ForcedOverride, Role::Infantry, Role::Armor);
        let b = item(ReviewReason::SpottingArmor, Role::Unknown, Role::Armor);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_for_match_rekeys() {
        let r = item(ReviewReason::SpottingArmor, Role::Unknown, Role::Armor).with_asked(true);
        let moved = r.for_match(&MatchId::from("match-2"));
        assert_eq!(moved.match_id.as_str(), "match-2");
        assert_ne!(moved.id, r.id);
        assert!(moved.asked);
        assert_eq!(moved.created_at, r.created_at);
        assert_eq!(moved.final_role, Role::Armor);
    }

    #[test]
    fn test_review_reason_display() {
        assert_eq!(format!("{}", ReviewReason::ForcedOverride), "forced_override");
        assert_eq!(
            serde_json::to_string(&ReviewReason::LowConfidenceInfantry).unwrap(),
            "\"low_confidence_infantry\""
        );
    }
}
