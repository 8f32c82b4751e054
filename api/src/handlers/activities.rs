//! Activity handlers
//!
//! Activity CRUD, pincode exchange and live progression.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::app::{LiveAction, LiveSnapshot, PincodeAccess};
use crate::domain::entities::{Activity, ActivityChanges, ActivityId, ActivityStatus, User};
use crate::error::AppError;
use crate::AppState;

/// Body of POST /activities and PUT /activities/:id
///
/// Durations are in seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub name: Option<String>,
    pub activity_date: Option<NaiveDate>,
    pub nb_participants: Option<i32>,
    pub nb_teams: Option<i32>,
    pub global_duration: Option<i32>,
    pub rotation_duration: Option<i32>,
    pub stand_duration: Option<i32>,
}

impl From<ActivityRequest> for ActivityChanges {
    fn from(request: ActivityRequest) -> Self {
        ActivityChanges {
            name: request.name,
            activity_date: request.activity_date,
            nb_participants: request.nb_participants,
            nb_teams: request.nb_teams,
            global_duration: request.global_duration,
            rotation_duration: request.rotation_duration,
            stand_duration: request.stand_duration,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: i64,
    pub name: String,
    pub activity_date: Option<NaiveDate>,
    pub nb_participants: Option<i32>,
    pub nb_teams: Option<i32>,
    pub global_duration: Option<i32>,
    pub rotation_duration: Option<i32>,
    pub stand_duration: Option<i32>,
    /// Only shown to organizers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animator_code: Option<String>,
    pub status: ActivityStatus,
    pub elapsed_ms: i64,
    pub user_id: i64,
    pub created_at: String,
}

impl ActivityResponse {
    fn build(activity: Activity, with_codes: bool) -> Self {
        let elapsed_ms = activity.live.elapsed_ms(Utc::now().timestamp_millis());
        Self {
            id: activity.id.0,
            name: activity.name,
            activity_date: activity.activity_date,
            nb_participants: activity.nb_participants,
            nb_teams: activity.nb_teams,
            global_duration: activity.global_duration,
            rotation_duration: activity.rotation_duration,
            stand_duration: activity.stand_duration,
            participant_code: with_codes.then_some(activity.participant_code),
            animator_code: with_codes.then_some(activity.animator_code),
            status: activity.live.status,
            elapsed_ms,
            user_id: activity.user_id.0,
            created_at: activity.created_at.to_rfc3339(),
        }
    }

    /// Full view for organizers
    pub fn private(activity: Activity) -> Self {
        Self::build(activity, true)
    }

    /// View for pincode holders and anonymous readers
    pub fn public(activity: Activity) -> Self {
        Self::build(activity, false)
    }
}

/// GET /activities
pub async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    let activities = state.activity_service.list().await?;
    Ok(Json(
        activities.into_iter().map(ActivityResponse::private).collect(),
    ))
}

/// GET /activities/:id
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActivityResponse>, AppError> {
    let activity = state.activity_service.get(&ActivityId(id)).await?;
    Ok(Json(ActivityResponse::public(activity)))
}

/// POST /activities
pub async fn create_activity(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<ActivityResponse>), AppError> {
    let activity = state
        .activity_service
        .create(user.id, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ActivityResponse::private(activity))))
}

/// PUT /activities/:id
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    let activity = state
        .activity_service
        .update(&ActivityId(id), request.into())
        .await?;

    Ok(Json(ActivityResponse::private(activity)))
}

/// DELETE /activities/:id
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.activity_service.delete(&ActivityId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /activities/:role/code/:pincode
///
/// `role` is `participant` or `animator`.
pub async fn activity_by_pincode(
    State(state): State<AppState>,
    Path((role, pincode)): Path<(String, String)>,
) -> Result<Json<PincodeAccess>, AppError> {
    let access = state
        .activity_service
        .find_by_pincode(&role, &pincode)
        .await?;
    Ok(Json(access))
}

async fn progress(
    state: AppState,
    id: i64,
    action: LiveAction,
) -> Result<Json<LiveSnapshot>, AppError> {
    let snapshot = state
        .activity_service
        .apply(&ActivityId(id), action, Utc::now().timestamp_millis())
        .await?;
    Ok(Json(snapshot))
}

/// POST /activities/:id/start
pub async fn start_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveSnapshot>, AppError> {
    progress(state, id, LiveAction::Start).await
}

/// POST /activities/:id/rotate
pub async fn rotate_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveSnapshot>, AppError> {
    progress(state, id, LiveAction::Rotate).await
}

/// POST /activities/:id/settle
pub async fn settle_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveSnapshot>, AppError> {
    progress(state, id, LiveAction::Settle).await
}

/// POST /activities/:id/pause
pub async fn pause_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveSnapshot>, AppError> {
    progress(state, id, LiveAction::Pause).await
}

/// POST /activities/:id/resume
pub async fn resume_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveSnapshot>, AppError> {
    progress(state, id, LiveAction::Resume).await
}

/// POST /activities/:id/complete
pub async fn complete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveSnapshot>, AppError> {
    progress(state, id, LiveAction::Complete).await
}
