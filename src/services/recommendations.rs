use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    db::GraphStore,
    error::AppResult,
    services::scoring::{self, Recommendation, SharedGame},
};

/// Computes ranked game recommendations for a user.
///
/// Fetches the user's own edges, anchors on every other user holding an
/// equal-distance edge into one of those games, pulls each such neighbor's
/// outgoing edges, and hands the snapshot to the scorer. Read-only; a user
/// with no edges (or no equal-affinity neighbors) gets an empty list rather
/// than an error.
///
/// `exclude_already_connected` is the normal mode; passing false admits games
/// the user already relates to, which is only useful for introspection.
pub async fn recommend(
    store: &dyn GraphStore,
    user_id: &str,
    exclude_already_connected: bool,
) -> AppResult<Vec<Recommendation>> {
    let own = store.edges_of(user_id).await?;
    if own.is_empty() {
        return Ok(Vec::new());
    }

    let own_games: HashSet<String> = own.iter().map(|e| e.game_id.clone()).collect();

    let mut shares: Vec<SharedGame> = Vec::new();
    let mut neighbor_ids: BTreeSet<String> = BTreeSet::new();
    for edge in &own {
        let peers = store
            .users_sharing_game(&edge.game_id, edge.distance, user_id)
            .await?;
        for peer in peers {
            neighbor_ids.insert(peer.user_id.clone());
            shares.push(SharedGame {
                own: edge.clone(),
                peer,
            });
        }
    }

    let mut peer_edges: HashMap<String, Vec<_>> = HashMap::with_capacity(neighbor_ids.len());
    for neighbor in neighbor_ids {
        let outgoing = store.edges_of(&neighbor).await?;
        peer_edges.insert(neighbor, outgoing);
    }

    let ranked = scoring::rank(&own_games, &shares, &peer_edges, exclude_already_connected);

    tracing::debug!(
        user_id = %user_id,
        own_edges = own.len(),
        neighbors = peer_edges.len(),
        candidates = ranked.len(),
        "Recommendation scoring complete"
    );

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryGraph;
    use crate::models::{Game, RelationshipKind, User};
    use crate::services::scoring::Evidence;

    async fn seeded(users: &[&str], games: &[&str]) -> MemoryGraph {
        let store = MemoryGraph::new();
        for name in users {
            store
                .merge_user(User::from_name(name).unwrap())
                .await
                .unwrap();
        }
        for name in games {
            store
                .merge_game(Game::from_name(name, None).unwrap())
                .await
                .unwrap();
        }
        store
    }

    async fn relate(store: &MemoryGraph, user: &str, game: &str, kind: RelationshipKind) {
        store
            .merge_edge(user, game, kind, kind.distance())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_user_with_no_edges_gets_empty_list() {
        let store = seeded(&["Alice"], &["Celeste"]).await;
        let recs = recommend(&store, "uid-alice", true).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_equal_affinity_neighbor_recommends_their_games() {
        let store = seeded(&["Alice", "Bob"], &["G One", "G Two"]).await;
        relate(&store, "uid-alice", "gid-g-one", RelationshipKind::Complete100).await;
        relate(&store, "uid-bob", "gid-g-one", RelationshipKind::Complete100).await;
        relate(&store, "uid-bob", "gid-g-two", RelationshipKind::Beaten).await;

        let recs = recommend(&store, "uid-alice", true).await.unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].game_id, "gid-g-two");
        assert_eq!(recs[0].score, 1 + 1 + 2);
        assert_eq!(
            recs[0].evidence,
            vec![Evidence {
                shared_game_id: "gid-g-one".to_string(),
                own_kind: RelationshipKind::Complete100,
                shared_kind: RelationshipKind::Complete100,
                target_kind: RelationshipKind::Beaten,
            }]
        );
    }

    #[tokio::test]
    async fn test_mismatched_affinity_neighbor_is_ignored() {
        let store = seeded(&["Alice", "Bob"], &["G One", "G Two"]).await;
        // Bob played the same game but felt differently about it.
        relate(&store, "uid-alice", "gid-g-one", RelationshipKind::Complete100).await;
        relate(&store, "uid-bob", "gid-g-one", RelationshipKind::SetAside).await;
        relate(&store, "uid-bob", "gid-g-two", RelationshipKind::Beaten).await;

        let recs = recommend(&store, "uid-alice", true).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_weaker_shared_affinity_still_anchors() {
        // Any equal-distance overlap anchors a path, not just the strong kinds.
        let store = seeded(&["Alice", "Bob"], &["G One", "G Two"]).await;
        relate(&store, "uid-alice", "gid-g-one", RelationshipKind::GotBored).await;
        relate(&store, "uid-bob", "gid-g-one", RelationshipKind::GotBored).await;
        relate(&store, "uid-bob", "gid-g-two", RelationshipKind::Complete100).await;

        let recs = recommend(&store, "uid-alice", true).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].score, 8 + 8 + 1);
    }

    #[tokio::test]
    async fn test_min_cost_wins_across_neighbors() {
        let store = seeded(&["Alice", "Bob", "Cara"], &["G One", "G Two", "G Three"]).await;
        // Cheap anchor through Bob on G One, expensive through Cara on G Three.
        relate(&store, "uid-alice", "gid-g-one", RelationshipKind::Complete100).await;
        relate(&store, "uid-alice", "gid-g-three", RelationshipKind::SetAside).await;
        relate(&store, "uid-bob", "gid-g-one", RelationshipKind::Complete100).await;
        relate(&store, "uid-bob", "gid-g-two", RelationshipKind::Beaten).await;
        relate(&store, "uid-cara", "gid-g-three", RelationshipKind::SetAside).await;
        relate(&store, "uid-cara", "gid-g-two", RelationshipKind::Beaten).await;

        let recs = recommend(&store, "uid-alice", true).await.unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].game_id, "gid-g-two");
        // 1+1+2 beats 5+5+2; no summing across paths.
        assert_eq!(recs[0].score, 4);
        assert_eq!(recs[0].evidence.len(), 1);
        assert_eq!(recs[0].evidence[0].shared_game_id, "gid-g-one");
    }

    #[tokio::test]
    async fn test_already_connected_games_are_not_candidates() {
        let store = seeded(&["Alice", "Bob"], &["G One", "G Two"]).await;
        relate(&store, "uid-alice", "gid-g-one", RelationshipKind::Beaten).await;
        relate(&store, "uid-alice", "gid-g-two", RelationshipKind::GotBored).await;
        relate(&store, "uid-bob", "gid-g-one", RelationshipKind::Beaten).await;
        relate(&store, "uid-bob", "gid-g-two", RelationshipKind::Complete100).await;

        let recs = recommend(&store, "uid-alice", true).await.unwrap();
        assert!(recs.is_empty());

        let recs = recommend(&store, "uid-alice", false).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].game_id, "gid-g-two");
    }
}
