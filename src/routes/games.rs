use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Game, PageQuery, PageResponse},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    pub external_ref: Option<String>,
}

/// Handler for the paginated game listing
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PageResponse<Game>>> {
    let limit = resolve_limit(&state, page.limit)?;
    let items = state.store.list_games(page.after.as_deref(), limit).await?;
    let next = next_cursor(items.len(), limit, items.last().map(|g| g.id.clone()));
    Ok(Json(PageResponse { items, next }))
}

/// Handler for game creation
///
/// The identifier is derived from the name, so posting the same name twice
/// lands on the same record: 201 on first creation, 200 with the existing
/// record afterwards.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> AppResult<(StatusCode, Json<Game>)> {
    let game = Game::from_name(&request.name, request.external_ref).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "game name {:?} contains no usable characters",
            request.name
        ))
    })?;

    let (game, created) = state.store.merge_game(game).await?;

    tracing::info!(game_id = %game.id, created, "Merged game");

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(game)))
}

/// Clamps a requested page size to the configured ceiling
pub(super) fn resolve_limit(state: &AppState, requested: Option<usize>) -> AppResult<usize> {
    let limit = requested.unwrap_or(state.config.default_page_size);
    if limit == 0 {
        return Err(AppError::InvalidInput("limit must be positive".to_string()));
    }
    Ok(limit.min(state.config.max_page_size))
}

/// A further page may exist only when this one came back full
pub(super) fn next_cursor(len: usize, limit: usize, last: Option<String>) -> Option<String> {
    if len == limit {
        last
    } else {
        None
    }
}
