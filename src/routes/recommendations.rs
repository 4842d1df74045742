use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    routes::AppState,
    services::{recommendations, scoring::Recommendation},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Admit games the user already relates to; introspection only
    #[serde(default)]
    pub include_connected: bool,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    state
        .store
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::UnknownEntity(format!("user {}", user_id)))?;

    let ranked = recommendations::recommend(
        state.store.as_ref(),
        &user_id,
        !query.include_connected,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        candidates = ranked.len(),
        "Recommendations computed"
    );

    Ok(Json(ranked))
}
