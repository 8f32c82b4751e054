//! Stand handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ActivityId, Stand, StandChanges, StandId, User};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStandRequest {
    pub name: String,
    /// Teams hosted at the same time; defaults to 1
    pub nb_teams_on_stand: Option<u32>,
    pub activity_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStandRequest {
    pub name: Option<String>,
    pub nb_teams_on_stand: Option<u32>,
    pub activity_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandResponse {
    pub id: i64,
    pub name: String,
    pub nb_teams_on_stand: u32,
    pub activity_id: Option<i64>,
    pub user_id: i64,
    pub created_at: String,
}

impl From<Stand> for StandResponse {
    fn from(stand: Stand) -> Self {
        Self {
            id: stand.id.0,
            name: stand.name,
            nb_teams_on_stand: stand.capacity,
            activity_id: stand.activity_id.map(|a| a.0),
            user_id: stand.user_id.0,
            created_at: stand.created_at.to_rfc3339(),
        }
    }
}

fn to_responses(stands: Vec<Stand>) -> Json<Vec<StandResponse>> {
    Json(stands.into_iter().map(StandResponse::from).collect())
}

/// GET /stands
pub async fn list_stands(
    State(state): State<AppState>,
) -> Result<Json<Vec<StandResponse>>, AppError> {
    Ok(to_responses(state.roster_service.list_stands().await?))
}

/// GET /activities/:id/stands
///
/// Stands of an activity in creation order.
pub async fn activity_stands(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<StandResponse>>, AppError> {
    Ok(to_responses(
        state.roster_service.stands_of(&ActivityId(id)).await?,
    ))
}

/// GET /stands/:id
pub async fn get_stand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StandResponse>, AppError> {
    let stand = state.roster_service.get_stand(&StandId(id)).await?;
    Ok(Json(stand.into()))
}

/// POST /stands
pub async fn create_stand(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateStandRequest>,
) -> Result<(StatusCode, Json<StandResponse>), AppError> {
    let stand = state
        .roster_service
        .create_stand(
            user.id,
            &request.name,
            request.nb_teams_on_stand,
            request.activity_id.map(ActivityId),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(stand.into())))
}

/// PUT /stands/:id
pub async fn update_stand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStandRequest>,
) -> Result<Json<StandResponse>, AppError> {
    let changes = StandChanges {
        name: request.name,
        capacity: request.nb_teams_on_stand,
        activity_id: request.activity_id.map(ActivityId),
    };
    let stand = state
        .roster_service
        .update_stand(&StandId(id), changes)
        .await?;

    Ok(Json(stand.into()))
}

/// DELETE /stands/:id
pub async fn delete_stand(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.roster_service.delete_stand(&StandId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
