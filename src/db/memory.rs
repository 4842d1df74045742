use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Edge, Game, RelationshipKind, User};

use super::{GraphStore, StoreError, StoreResult};

/// In-memory graph store
///
/// Node tables are `BTreeMap`s so listings and cursors come out in id order.
/// A single `RwLock` over the whole graph makes every merge and replace
/// atomic, which is the create-if-absent guarantee the write path leans on.
pub struct MemoryGraph {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<String, User>,
    games: BTreeMap<String, Game>,
    /// Outgoing edges keyed by user id
    edges: HashMap<String, Vec<Edge>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn page_after<T: Clone>(table: &BTreeMap<String, T>, after: Option<&str>, limit: usize) -> Vec<T> {
    match after {
        Some(cursor) => table
            .range::<str, _>((Bound::Excluded(cursor), Bound::Unbounded))
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect(),
        None => table.values().take(limit).cloned().collect(),
    }
}

impl Inner {
    fn require_endpoints(&self, user_id: &str, game_id: &str) -> StoreResult<()> {
        if !self.users.contains_key(user_id) {
            return Err(StoreError::MissingNode(format!("user {}", user_id)));
        }
        if !self.games.contains_key(game_id) {
            return Err(StoreError::MissingNode(format!("game {}", game_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn merge_user(&self, user: User) -> StoreResult<(User, bool)> {
        let mut inner = self.inner.write().await;
        match inner.users.get(&user.id) {
            Some(existing) => Ok((existing.clone(), false)),
            None => {
                inner.users.insert(user.id.clone(), user.clone());
                Ok((user, true))
            }
        }
    }

    async fn merge_game(&self, game: Game) -> StoreResult<(Game, bool)> {
        let mut inner = self.inner.write().await;
        match inner.games.get(&game.id) {
            Some(existing) => Ok((existing.clone(), false)),
            None => {
                inner.games.insert(game.id.clone(), game.clone());
                Ok((game, true))
            }
        }
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn get_game(&self, id: &str) -> StoreResult<Option<Game>> {
        Ok(self.inner.read().await.games.get(id).cloned())
    }

    async fn list_users<'a>(&self, after: Option<&'a str>, limit: usize) -> StoreResult<Vec<User>> {
        Ok(page_after(&self.inner.read().await.users, after, limit))
    }

    async fn list_games<'a>(&self, after: Option<&'a str>, limit: usize) -> StoreResult<Vec<Game>> {
        Ok(page_after(&self.inner.read().await.games, after, limit))
    }

    async fn merge_edge(
        &self,
        user_id: &str,
        game_id: &str,
        kind: RelationshipKind,
        distance: u32,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        inner.require_endpoints(user_id, game_id)?;

        let edges = inner.edges.entry(user_id.to_string()).or_default();
        if edges
            .iter()
            .any(|e| e.game_id == game_id && e.kind == kind)
        {
            return Ok(false);
        }

        edges.push(Edge {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            kind,
            distance,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn replace_edges(
        &self,
        user_id: &str,
        game_id: &str,
        kind: RelationshipKind,
        distance: u32,
    ) -> StoreResult<Vec<RelationshipKind>> {
        let mut inner = self.inner.write().await;
        inner.require_endpoints(user_id, game_id)?;

        let edges = inner.edges.entry(user_id.to_string()).or_default();
        let mut removed: Vec<RelationshipKind> = Vec::new();
        edges.retain(|e| {
            if e.game_id == game_id {
                removed.push(e.kind);
                false
            } else {
                true
            }
        });
        removed.sort();

        edges.push(Edge {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            kind,
            distance,
            created_at: Utc::now(),
        });
        Ok(removed)
    }

    async fn edges_of(&self, user_id: &str) -> StoreResult<Vec<Edge>> {
        let inner = self.inner.read().await;
        let mut edges = inner.edges.get(user_id).cloned().unwrap_or_default();
        edges.sort_by(|a, b| a.game_id.cmp(&b.game_id).then(a.kind.cmp(&b.kind)));
        Ok(edges)
    }

    async fn users_sharing_game(
        &self,
        game_id: &str,
        distance: u32,
        exclude_user: &str,
    ) -> StoreResult<Vec<Edge>> {
        let inner = self.inner.read().await;
        let mut shared: Vec<Edge> = inner
            .edges
            .values()
            .flatten()
            .filter(|e| {
                e.game_id == game_id && e.distance == distance && e.user_id != exclude_user
            })
            .cloned()
            .collect();
        shared.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.kind.cmp(&b.kind)));
        Ok(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryGraph {
        let store = MemoryGraph::new();
        for name in ["Alice", "Bob"] {
            store
                .merge_user(User::from_name(name).unwrap())
                .await
                .unwrap();
        }
        for name in ["Mass Effect 3", "Dark Souls", "Celeste"] {
            store
                .merge_game(Game::from_name(name, None).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_merge_user_is_create_if_absent() {
        let store = MemoryGraph::new();
        let (first, created) = store
            .merge_user(User::from_name("Alice").unwrap())
            .await
            .unwrap();
        assert!(created);

        let (second, created) = store
            .merge_user(User::from_name("Alice").unwrap())
            .await
            .unwrap();
        assert!(!created);
        // The original record wins, timestamps included.
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_merge_edge_is_idempotent() {
        let store = seeded().await;
        let created = store
            .merge_edge("uid-alice", "gid-dark-souls", RelationshipKind::Beaten, 2)
            .await
            .unwrap();
        assert!(created);

        let created = store
            .merge_edge("uid-alice", "gid-dark-souls", RelationshipKind::Beaten, 2)
            .await
            .unwrap();
        assert!(!created);

        assert_eq!(store.edges_of("uid-alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_edge_requires_both_endpoints() {
        let store = seeded().await;
        let err = store
            .merge_edge("uid-nobody", "gid-celeste", RelationshipKind::Beaten, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingNode(_)));

        let err = store
            .merge_edge("uid-alice", "gid-nothing", RelationshipKind::Beaten, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingNode(_)));
    }

    #[tokio::test]
    async fn test_pair_may_hold_several_kinds() {
        let store = seeded().await;
        store
            .merge_edge("uid-alice", "gid-celeste", RelationshipKind::SetAside, 5)
            .await
            .unwrap();
        store
            .merge_edge("uid-alice", "gid-celeste", RelationshipKind::Beaten, 2)
            .await
            .unwrap();

        let edges = store.edges_of("uid-alice").await.unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.game_id == "gid-celeste"));
    }

    #[tokio::test]
    async fn test_replace_edges_removes_prior_kinds() {
        let store = seeded().await;
        store
            .merge_edge("uid-alice", "gid-celeste", RelationshipKind::SetAside, 5)
            .await
            .unwrap();
        store
            .merge_edge("uid-alice", "gid-celeste", RelationshipKind::GotBored, 8)
            .await
            .unwrap();

        let removed = store
            .replace_edges("uid-alice", "gid-celeste", RelationshipKind::Beaten, 2)
            .await
            .unwrap();
        assert_eq!(
            removed,
            vec![RelationshipKind::SetAside, RelationshipKind::GotBored]
        );

        let edges = store.edges_of("uid-alice").await.unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].kind, RelationshipKind::Beaten);
    }

    #[tokio::test]
    async fn test_replace_edges_leaves_other_games_alone() {
        let store = seeded().await;
        store
            .merge_edge("uid-alice", "gid-celeste", RelationshipKind::Beaten, 2)
            .await
            .unwrap();
        store
            .merge_edge("uid-alice", "gid-dark-souls", RelationshipKind::GotBored, 8)
            .await
            .unwrap();

        store
            .replace_edges("uid-alice", "gid-celeste", RelationshipKind::Complete100, 1)
            .await
            .unwrap();

        let edges = store.edges_of("uid-alice").await.unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges
            .iter()
            .any(|e| e.game_id == "gid-dark-souls" && e.kind == RelationshipKind::GotBored));
    }

    #[tokio::test]
    async fn test_users_sharing_game_filters_distance_and_subject() {
        let store = seeded().await;
        store
            .merge_edge("uid-alice", "gid-celeste", RelationshipKind::Complete100, 1)
            .await
            .unwrap();
        store
            .merge_edge("uid-bob", "gid-celeste", RelationshipKind::Complete100, 1)
            .await
            .unwrap();
        store
            .merge_edge("uid-bob", "gid-dark-souls", RelationshipKind::SetAside, 5)
            .await
            .unwrap();

        let shared = store
            .users_sharing_game("gid-celeste", 1, "uid-alice")
            .await
            .unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].user_id, "uid-bob");

        // Distance mismatch excludes the edge entirely.
        let shared = store
            .users_sharing_game("gid-celeste", 2, "uid-alice")
            .await
            .unwrap();
        assert!(shared.is_empty());
    }

    #[tokio::test]
    async fn test_list_games_pages_in_id_order() {
        let store = seeded().await;

        let first = store.list_games(None, 2).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, "gid-celeste");
        assert_eq!(first[1].id, "gid-dark-souls");

        let rest = store
            .list_games(Some("gid-dark-souls"), 2)
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, "gid-mass-effect-3");
    }
}
