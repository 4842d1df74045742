use serde::Serialize;

use crate::{
    db::GraphStore,
    error::AppResult,
    models::RelationshipKind,
};

/// Result of an additive relationship write
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpsertOutcome {
    pub user_id: String,
    pub game_id: String,
    pub kind: RelationshipKind,
    pub distance: u32,
    /// False when the identical edge already existed and the call was a no-op
    pub created: bool,
}

/// Result of a replacing relationship write
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplaceOutcome {
    pub user_id: String,
    pub game_id: String,
    pub kind: RelationshipKind,
    pub distance: u32,
    /// Kinds the pair carried before the replacement, ascending
    pub removed: Vec<RelationshipKind>,
}

/// Merges a single directed edge User→Game labeled `kind`.
///
/// The kind is validated before the store is touched, so an unknown kind can
/// never reach the write path. The merge is create-if-absent: repeat calls
/// with the same triple are no-ops, and edges of other kinds between the same
/// pair are left untouched.
pub async fn upsert_edge(
    store: &dyn GraphStore,
    user_id: &str,
    game_id: &str,
    kind: &str,
) -> AppResult<UpsertOutcome> {
    let kind: RelationshipKind = kind.parse()?;
    let distance = kind.distance();

    let created = store.merge_edge(user_id, game_id, kind, distance).await?;

    tracing::info!(
        user_id = %user_id,
        game_id = %game_id,
        kind = %kind,
        distance,
        created,
        "Merged relationship edge"
    );

    Ok(UpsertOutcome {
        user_id: user_id.to_string(),
        game_id: game_id.to_string(),
        kind,
        distance,
        created,
    })
}

/// Replaces every relationship between the pair with a single edge of `kind`.
///
/// Delete-old and insert-new happen in one atomic store operation. The
/// removed kinds come back to the caller, who may treat a non-empty list as
/// "relationship changed" and an empty one as "relationship established".
pub async fn replace_edge(
    store: &dyn GraphStore,
    user_id: &str,
    game_id: &str,
    kind: &str,
) -> AppResult<ReplaceOutcome> {
    let kind: RelationshipKind = kind.parse()?;
    let distance = kind.distance();

    let removed = store
        .replace_edges(user_id, game_id, kind, distance)
        .await?;

    tracing::info!(
        user_id = %user_id,
        game_id = %game_id,
        kind = %kind,
        removed = removed.len(),
        "Replaced relationship edges"
    );

    Ok(ReplaceOutcome {
        user_id: user_id.to_string(),
        game_id: game_id.to_string(),
        kind,
        distance,
        removed,
    })
}
