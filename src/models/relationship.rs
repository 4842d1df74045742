use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string outside the relationship vocabulary was supplied
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown relationship kind: {0}")]
pub struct UnknownKind(pub String);

/// How a user relates to a game
///
/// Each kind carries a fixed positive `distance` encoding inverse affinity:
/// the lower the distance, the stronger the positive signal. Distances are
/// strictly increasing in declaration order, so the derived `Ord` doubles as
/// an affinity ordering and no two kinds can collide on weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    #[serde(rename = "COMPLETE_100")]
    Complete100,
    Beaten,
    SetAsideEnjoyed,
    SetAside,
    GotBored,
    WouldNotLike,
}

impl RelationshipKind {
    /// Every kind, in ascending-distance order
    pub const ALL: [RelationshipKind; 6] = [
        RelationshipKind::Complete100,
        RelationshipKind::Beaten,
        RelationshipKind::SetAsideEnjoyed,
        RelationshipKind::SetAside,
        RelationshipKind::GotBored,
        RelationshipKind::WouldNotLike,
    ];

    /// Inverse-affinity weight carried by edges of this kind
    pub fn distance(self) -> u32 {
        match self {
            RelationshipKind::Complete100 => 1,
            RelationshipKind::Beaten => 2,
            RelationshipKind::SetAsideEnjoyed => 3,
            RelationshipKind::SetAside => 5,
            RelationshipKind::GotBored => 8,
            RelationshipKind::WouldNotLike => 13,
        }
    }

    /// Wire name, identical to the serde representation
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::Complete100 => "COMPLETE_100",
            RelationshipKind::Beaten => "BEATEN",
            RelationshipKind::SetAsideEnjoyed => "SET_ASIDE_ENJOYED",
            RelationshipKind::SetAside => "SET_ASIDE",
            RelationshipKind::GotBored => "GOT_BORED",
            RelationshipKind::WouldNotLike => "WOULD_NOT_LIKE",
        }
    }
}

impl Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = UnknownKind;

    /// Case-sensitive; anything outside the vocabulary is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETE_100" => Ok(RelationshipKind::Complete100),
            "BEATEN" => Ok(RelationshipKind::Beaten),
            "SET_ASIDE_ENJOYED" => Ok(RelationshipKind::SetAsideEnjoyed),
            "SET_ASIDE" => Ok(RelationshipKind::SetAside),
            "GOT_BORED" => Ok(RelationshipKind::GotBored),
            "WOULD_NOT_LIKE" => Ok(RelationshipKind::WouldNotLike),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A directed, kind-labeled, weighted relation from a user to a game
///
/// At most one edge of a given kind exists per (user, game) pair. The pair
/// may carry edges of several kinds at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub user_id: String,
    pub game_id: String,
    pub kind: RelationshipKind,
    pub distance: u32,
    pub created_at: DateTime<Utc>,
}
