use async_trait::async_trait;

use crate::models::{Edge, Game, RelationshipKind, User};

pub mod memory;

pub use memory::MemoryGraph;

/// Failures surfaced by a graph store implementation
///
/// The store is the only synchronization point for writes; callers never
/// retry here, they map these into the application taxonomy and let the
/// client decide.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("node not found: {0}")]
    MissingNode(String),

    #[error("{0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Graph query collaborator
///
/// Narrow contract between the core components and whatever holds the graph.
/// `MemoryGraph` implements it in-process; a networked graph database would
/// implement the same trait. All write operations are merge-on-write and
/// atomic per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create-if-absent by id. Returns the stored record and whether this
    /// call created it; an existing record is left untouched.
    async fn merge_user(&self, user: User) -> StoreResult<(User, bool)>;

    /// Create-if-absent by id, same semantics as `merge_user`.
    async fn merge_game(&self, game: Game) -> StoreResult<(Game, bool)>;

    async fn get_user(&self, id: &str) -> StoreResult<Option<User>>;

    async fn get_game(&self, id: &str) -> StoreResult<Option<Game>>;

    /// Id-ordered page of users strictly after the cursor.
    async fn list_users<'a>(&self, after: Option<&'a str>, limit: usize)
        -> StoreResult<Vec<User>>;

    /// Id-ordered page of games strictly after the cursor.
    async fn list_games<'a>(&self, after: Option<&'a str>, limit: usize)
        -> StoreResult<Vec<Game>>;

    /// Create-if-absent directed labeled edge carrying `distance`.
    ///
    /// Idempotent per (user, game, kind) triple; never touches edges of other
    /// kinds between the pair. Fails with `MissingNode` when either endpoint
    /// is absent. Returns whether this call created the edge.
    async fn merge_edge(
        &self,
        user_id: &str,
        game_id: &str,
        kind: RelationshipKind,
        distance: u32,
    ) -> StoreResult<bool>;

    /// Atomically removes every edge between the pair and inserts the given
    /// one. Returns the kinds that were removed.
    async fn replace_edges(
        &self,
        user_id: &str,
        game_id: &str,
        kind: RelationshipKind,
        distance: u32,
    ) -> StoreResult<Vec<RelationshipKind>>;

    /// All outgoing edges of a user. Serves both the subject user and, during
    /// scoring, each neighbor user.
    async fn edges_of(&self, user_id: &str) -> StoreResult<Vec<Edge>>;

    /// All edges into a game whose distance equals the given value, excluding
    /// the given user.
    async fn users_sharing_game(
        &self,
        game_id: &str,
        distance: u32,
        exclude_user: &str,
    ) -> StoreResult<Vec<Edge>>;
}
