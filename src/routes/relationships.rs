use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    routes::AppState,
    services::edges::{self, ReplaceOutcome, UpsertOutcome},
};

#[derive(Debug, Deserialize)]
pub struct RelationshipRequest {
    pub kind: String,
}

/// Handler for the additive relationship write
pub async fn upsert(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((user_id, game_id)): Path<(String, String)>,
    Json(request): Json<RelationshipRequest>,
) -> AppResult<(StatusCode, Json<UpsertOutcome>)> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        game_id = %game_id,
        kind = %request.kind,
        "Processing relationship upsert"
    );

    let outcome =
        edges::upsert_edge(state.store.as_ref(), &user_id, &game_id, &request.kind).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

/// Handler for the replacing relationship write
pub async fn replace(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((user_id, game_id)): Path<(String, String)>,
    Json(request): Json<RelationshipRequest>,
) -> AppResult<Json<ReplaceOutcome>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        game_id = %game_id,
        kind = %request.kind,
        "Processing relationship replace"
    );

    let outcome =
        edges::replace_edge(state.store.as_ref(), &user_id, &game_id, &request.kind).await?;

    Ok(Json(outcome))
}
