use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slug;

/// A game node in the relationship graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    /// Identifier derived from the display name, e.g. `gid-mass-effect-3`
    pub id: String,
    pub name: String,
    /// Reference into an external game catalog, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub const ID_PREFIX: &'static str = "gid";

    /// Creates a game whose id is derived from the display name.
    ///
    /// Returns `None` when the name contains no alphanumeric characters and
    /// therefore cannot produce an identifier.
    pub fn from_name(name: &str, external_ref: Option<String>) -> Option<Self> {
        let id = slug::derive_id(Self::ID_PREFIX, name)?;
        Some(Self {
            id,
            name: name.trim().to_string(),
            external_ref,
            created_at: Utc::now(),
        })
    }
}
