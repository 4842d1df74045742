use serde::{Deserialize, Serialize};

mod game;
mod relationship;
mod slug;
mod user;

pub use game::Game;
pub use relationship::{Edge, RelationshipKind, UnknownKind};
pub use user::User;

/// Query parameters shared by the paginated list endpoints
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Identifier of the last record of the previous page
    pub after: Option<String>,
    pub limit: Option<usize>,
}

/// One id-ordered page of records
///
/// `next` carries the cursor for the following page and is absent once the
/// listing is exhausted.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}
