use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Edge, PageQuery, PageResponse, RelationshipKind, User},
    routes::games::{next_cursor, resolve_limit},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// One outgoing edge of a user, as returned by the listing endpoint
#[derive(Debug, Serialize)]
pub struct UserGameResponse {
    pub game_id: String,
    pub kind: RelationshipKind,
    pub distance: u32,
    pub created_at: DateTime<Utc>,
}

impl From<Edge> for UserGameResponse {
    fn from(edge: Edge) -> Self {
        Self {
            game_id: edge.game_id,
            kind: edge.kind,
            distance: edge.distance,
            created_at: edge.created_at,
        }
    }
}

/// Handler for the paginated user listing
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PageResponse<User>>> {
    let limit = resolve_limit(&state, page.limit)?;
    let items = state.store.list_users(page.after.as_deref(), limit).await?;
    let next = next_cursor(items.len(), limit, items.last().map(|u| u.id.clone()));
    Ok(Json(PageResponse { items, next }))
}

/// Handler for user creation
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = User::from_name(&request.name).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "user name {:?} contains no usable characters",
            request.name
        ))
    })?;

    let (user, created) = state.store.merge_user(user).await?;

    tracing::info!(user_id = %user.id, created, "Merged user");

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(user)))
}

/// Handler listing a user's relationship edges
pub async fn games(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<UserGameResponse>>> {
    state
        .store
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::UnknownEntity(format!("user {}", id)))?;

    let edges = state.store.edges_of(&id).await?;
    Ok(Json(edges.into_iter().map(UserGameResponse::from).collect()))
}
