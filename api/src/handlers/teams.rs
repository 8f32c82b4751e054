//! Team handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ActivityId, Team, TeamChanges, TeamId, User};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    pub activity_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub activity_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub activity_id: Option<i64>,
    pub user_id: i64,
    pub created_at: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id.0,
            name: team.name,
            activity_id: team.activity_id.map(|a| a.0),
            user_id: team.user_id.0,
            created_at: team.created_at.to_rfc3339(),
        }
    }
}

fn to_responses(teams: Vec<Team>) -> Json<Vec<TeamResponse>> {
    Json(teams.into_iter().map(TeamResponse::from).collect())
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    Ok(to_responses(state.roster_service.list_teams().await?))
}

/// GET /activities/:id/teams
///
/// Teams of an activity in creation order.
pub async fn activity_teams(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    Ok(to_responses(
        state.roster_service.teams_of(&ActivityId(id)).await?,
    ))
}

/// GET /teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamResponse>, AppError> {
    let team = state.roster_service.get_team(&TeamId(id)).await?;
    Ok(Json(team.into()))
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), AppError> {
    let team = state
        .roster_service
        .create_team(user.id, &request.name, request.activity_id.map(ActivityId))
        .await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// PUT /teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    let changes = TeamChanges {
        name: request.name,
        activity_id: request.activity_id.map(ActivityId),
    };
    let team = state.roster_service.update_team(&TeamId(id), changes).await?;

    Ok(Json(team.into()))
}

/// DELETE /teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.roster_service.delete_team(&TeamId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
