use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slug;

/// A user node in the relationship graph
///
/// Immutable once referenced by edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Identifier derived from the display name, e.g. `uid-jane-doe`
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub const ID_PREFIX: &'static str = "uid";

    /// Creates a user whose id is derived from the display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let id = slug::derive_id(Self::ID_PREFIX, name)?;
        Some(Self {
            id,
            name: name.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}
