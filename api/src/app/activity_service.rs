//! Activity service
//!
//! Activity CRUD, pincode access and the live progression a game master drives
//! while the event runs.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::app::pincode;
use crate::domain::entities::{
    validate_name, Activity, ActivityChanges, ActivityId, ActivityStatus, NewActivity,
    PincodeKind, UserId, MAX_DURATION_SECS,
};
use crate::domain::ports::ActivityRepository;
use crate::error::AppError;

/// A live progression step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveAction {
    Start,
    Rotate,
    Settle,
    Pause,
    Resume,
    Complete,
}

impl std::fmt::Display for LiveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveAction::Start => write!(f, "start"),
            LiveAction::Rotate => write!(f, "rotate"),
            LiveAction::Settle => write!(f, "settle"),
            LiveAction::Pause => write!(f, "pause"),
            LiveAction::Resume => write!(f, "resume"),
            LiveAction::Complete => write!(f, "complete"),
        }
    }
}

/// What a pincode grants
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PincodeAccess {
    pub activity_id: ActivityId,
    pub role: &'static str,
}

/// Live status as seen by clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSnapshot {
    pub activity_id: ActivityId,
    pub status: ActivityStatus,
    pub elapsed_ms: i64,
}

/// Service for managing activities
pub struct ActivityService<AR>
where
    AR: ActivityRepository,
{
    activities: Arc<AR>,
}

impl<AR> ActivityService<AR>
where
    AR: ActivityRepository,
{
    pub fn new(activities: Arc<AR>) -> Self {
        Self { activities }
    }

    pub async fn list(&self) -> Result<Vec<Activity>, AppError> {
        Ok(self.activities.find_all().await?)
    }

    pub async fn get(&self, id: &ActivityId) -> Result<Activity, AppError> {
        self.activities
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
    }

    /// Create an activity owned by `owner`, with fresh pincodes
    pub async fn create(
        &self,
        owner: UserId,
        fields: ActivityChanges,
    ) -> Result<Activity, AppError> {
        let name = fields
            .name
            .clone()
            .ok_or_else(|| AppError::BadRequest("The name field is required".to_string()))?;
        validate_name(&name).map_err(AppError::BadRequest)?;
        validate_numbers(&fields)?;

        let mut rng = StdRng::from_entropy();
        let participant_code = pincode::generate_unique_code(
            self.activities.as_ref(),
            PincodeKind::Participant,
            &mut rng,
        )
        .await?;
        let animator_code = pincode::generate_unique_code(
            self.activities.as_ref(),
            PincodeKind::Animator,
            &mut rng,
        )
        .await?;

        let activity = self
            .activities
            .create(&NewActivity {
                name: name.trim().to_string(),
                activity_date: fields.activity_date,
                nb_participants: fields.nb_participants,
                nb_teams: fields.nb_teams,
                global_duration: fields.global_duration,
                rotation_duration: fields.rotation_duration,
                stand_duration: fields.stand_duration,
                participant_code,
                animator_code,
                user_id: owner,
            })
            .await?;

        tracing::info!(activity_id = %activity.id, name = %activity.name, "Activity created");
        Ok(activity)
    }

    pub async fn update(
        &self,
        id: &ActivityId,
        mut changes: ActivityChanges,
    ) -> Result<Activity, AppError> {
        self.get(id).await?;

        if let Some(name) = &changes.name {
            validate_name(name).map_err(AppError::BadRequest)?;
            changes.name = Some(name.trim().to_string());
        }
        validate_numbers(&changes)?;

        Ok(self.activities.update(id, &changes).await?)
    }

    pub async fn delete(&self, id: &ActivityId) -> Result<(), AppError> {
        self.activities.delete(id).await?;
        tracing::info!(activity_id = %id, "Activity deleted");
        Ok(())
    }

    /// Exchange a pincode for read access to an activity
    ///
    /// `role` is the route prefix: `participant` or `animator`.
    pub async fn find_by_pincode(&self, role: &str, code: &str) -> Result<PincodeAccess, AppError> {
        let kind: PincodeKind = role.parse().map_err(AppError::NotFound)?;

        if !pincode::is_well_formed(code) {
            return Err(AppError::NotFound("Invalid code".to_string()));
        }

        let activity = match kind {
            PincodeKind::Participant => self.activities.find_by_participant_code(code).await?,
            PincodeKind::Animator => self.activities.find_by_animator_code(code).await?,
        }
        .ok_or_else(|| AppError::NotFound("Invalid code".to_string()))?;

        Ok(PincodeAccess {
            activity_id: activity.id,
            role: kind.role_name(),
        })
    }

    /// Apply a live progression step at `now_ms` (unix milliseconds)
    pub async fn apply(
        &self,
        id: &ActivityId,
        action: LiveAction,
        now_ms: i64,
    ) -> Result<LiveSnapshot, AppError> {
        let activity = self.get(id).await?;
        let mut live = activity.live;

        match action {
            LiveAction::Start => live.start(now_ms)?,
            LiveAction::Rotate => live.rotate()?,
            LiveAction::Settle => live.settle()?,
            LiveAction::Pause => live.pause(now_ms)?,
            LiveAction::Resume => live.resume(now_ms)?,
            LiveAction::Complete => live.complete(now_ms)?,
        }

        let updated = self.activities.update_live_state(id, &live).await?;
        tracing::info!(
            activity_id = %id,
            action = %action,
            status = %updated.live.status,
            "Activity progressed"
        );

        Ok(LiveSnapshot {
            activity_id: updated.id,
            status: updated.live.status,
            elapsed_ms: updated.live.elapsed_ms(now_ms),
        })
    }
}

fn validate_numbers(fields: &ActivityChanges) -> Result<(), AppError> {
    let counts = [
        ("nbParticipants", fields.nb_participants),
        ("nbTeams", fields.nb_teams),
    ];
    let durations = [
        ("globalDuration", fields.global_duration),
        ("rotationDuration", fields.rotation_duration),
        ("standDuration", fields.stand_duration),
    ];

    for (field, value) in counts.iter().chain(&durations) {
        if matches!(value, Some(v) if *v < 0) {
            return Err(AppError::BadRequest(format!(
                "{} must not be negative",
                field
            )));
        }
    }
    for (field, value) in durations {
        if matches!(value, Some(v) if v > MAX_DURATION_SECS) {
            return Err(AppError::BadRequest(format!(
                "{} must not exceed {} seconds",
                field, MAX_DURATION_SECS
            )));
        }
    }
    Ok(())
}
