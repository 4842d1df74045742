use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::models::{Edge, RelationshipKind};

/// A ranked candidate game with the paths that earned its score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub game_id: String,
    /// Minimum path cost over all qualifying paths reaching the game
    pub score: u32,
    /// Every distinct path shape that achieved the minimum, ordered
    pub evidence: Vec<Evidence>,
}

/// One qualifying path, peer identity elided
///
/// Reads as: the subject relates to `shared_game_id` with `own_kind`, some
/// user of equal affinity relates to it with `shared_kind`, and that user
/// relates to the candidate game with `target_kind`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Evidence {
    pub shared_game_id: String,
    pub own_kind: RelationshipKind,
    pub shared_kind: RelationshipKind,
    pub target_kind: RelationshipKind,
}

/// A 2-hop anchor: the subject's edge to a game plus another user's edge
/// into the same game at the same distance
#[derive(Debug, Clone)]
pub struct SharedGame {
    pub own: Edge,
    pub peer: Edge,
}

/// Ranks candidate games over weighted 2-hop paths.
///
/// Each anchor in `shares` extends through its peer's outgoing edges to
/// candidate targets; a path `u -(d1)-> g <-(d2)- v -(d3)-> g'` costs
/// `d1 + d2 + d3`. A game's score is the cheapest path that reaches it, so a
/// single strong path beats any pile of weak ones. Ties rank by ascending
/// game id.
///
/// `own_games` are the subject's already-connected games; they are skipped as
/// targets unless `exclude_connected` is off (an introspection mode). The
/// shared game itself is never a target.
///
/// Pure over its inputs. Empty `shares` yields an empty ranking.
pub fn rank(
    own_games: &HashSet<String>,
    shares: &[SharedGame],
    peer_edges: &HashMap<String, Vec<Edge>>,
    exclude_connected: bool,
) -> Vec<Recommendation> {
    let mut best: BTreeMap<String, (u32, BTreeSet<Evidence>)> = BTreeMap::new();

    for share in shares {
        debug_assert_eq!(share.own.distance, share.peer.distance);
        debug_assert_eq!(share.own.game_id, share.peer.game_id);

        let Some(outgoing) = peer_edges.get(&share.peer.user_id) else {
            continue;
        };

        for target in outgoing {
            if target.game_id == share.own.game_id {
                continue;
            }
            if exclude_connected && own_games.contains(&target.game_id) {
                continue;
            }

            let cost = share.own.distance + share.peer.distance + target.distance;
            let evidence = Evidence {
                shared_game_id: share.own.game_id.clone(),
                own_kind: share.own.kind,
                shared_kind: share.peer.kind,
                target_kind: target.kind,
            };

            match best.get_mut(&target.game_id) {
                None => {
                    best.insert(target.game_id.clone(), (cost, BTreeSet::from([evidence])));
                }
                Some((score, paths)) => {
                    if cost < *score {
                        *score = cost;
                        paths.clear();
                        paths.insert(evidence);
                    } else if cost == *score {
                        paths.insert(evidence);
                    }
                }
            }
        }
    }

    let mut ranked: Vec<Recommendation> = best
        .into_iter()
        .map(|(game_id, (score, paths))| Recommendation {
            game_id,
            score,
            evidence: paths.into_iter().collect(),
        })
        .collect();

    ranked.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.game_id.cmp(&b.game_id)));
    ranked
}
