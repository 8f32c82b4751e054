//! PostgreSQL adapter for ActivityRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{
    Activity, ActivityChanges, ActivityId, ActivityStatus, LiveState, NewActivity, PincodeKind,
    UserId,
};
use crate::domain::ports::ActivityRepository;
use crate::entity::activities;
use crate::error::DomainError;

/// PostgreSQL implementation of ActivityRepository
pub struct PostgresActivityRepository {
    db: DatabaseConnection,
}

impl PostgresActivityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &ActivityId) -> Result<activities::Model, DomainError> {
        activities::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Activity {}", id)))
    }

    async fn find_by_code(
        &self,
        column: activities::Column,
        code: &str,
    ) -> Result<Option<Activity>, DomainError> {
        let result = activities::Entity::find()
            .filter(column.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

fn code_column(kind: PincodeKind) -> activities::Column {
    match kind {
        PincodeKind::Participant => activities::Column::ParticipantCode,
        PincodeKind::Animator => activities::Column::AnimatorCode,
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        let result = activities::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Activity>, DomainError> {
        let results = activities::Entity::find()
            .order_by_asc(activities::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_participant_code(&self, code: &str) -> Result<Option<Activity>, DomainError> {
        self.find_by_code(code_column(PincodeKind::Participant), code)
            .await
    }

    async fn find_by_animator_code(&self, code: &str) -> Result<Option<Activity>, DomainError> {
        self.find_by_code(code_column(PincodeKind::Animator), code)
            .await
    }

    async fn code_exists(&self, kind: PincodeKind, code: &str) -> Result<bool, DomainError> {
        let count = activities::Entity::find()
            .filter(code_column(kind).eq(code))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, activity: &NewActivity) -> Result<Activity, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = activities::ActiveModel {
            name: Set(activity.name.clone()),
            activity_date: Set(activity.activity_date),
            status: Set(ActivityStatus::NotStarted.to_string()),
            nb_participants: Set(activity.nb_participants),
            nb_teams: Set(activity.nb_teams),
            global_duration: Set(activity.global_duration),
            rotation_duration: Set(activity.rotation_duration),
            stand_duration: Set(activity.stand_duration),
            participant_code: Set(activity.participant_code.clone()),
            animator_code: Set(activity.animator_code.clone()),
            started_at_ms: Set(None),
            pause_started_at_ms: Set(None),
            paused_duration_ms: Set(0),
            user_id: Set(activity.user_id.0),
            created_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &ActivityId,
        changes: &ActivityChanges,
    ) -> Result<Activity, DomainError> {
        let mut model = self.find_model(id).await?.into_active_model();

        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(date) = changes.activity_date {
            model.activity_date = Set(Some(date));
        }
        if let Some(n) = changes.nb_participants {
            model.nb_participants = Set(Some(n));
        }
        if let Some(n) = changes.nb_teams {
            model.nb_teams = Set(Some(n));
        }
        if let Some(d) = changes.global_duration {
            model.global_duration = Set(Some(d));
        }
        if let Some(d) = changes.rotation_duration {
            model.rotation_duration = Set(Some(d));
        }
        if let Some(d) = changes.stand_duration {
            model.stand_duration = Set(Some(d));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_live_state(
        &self,
        id: &ActivityId,
        live: &LiveState,
    ) -> Result<Activity, DomainError> {
        let mut model = self.find_model(id).await?.into_active_model();

        model.status = Set(live.status.to_string());
        model.started_at_ms = Set(live.started_at_ms);
        model.pause_started_at_ms = Set(live.pause_started_at_ms);
        model.paused_duration_ms = Set(live.paused_duration_ms);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError> {
        let result = activities::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Activity {}", id)));
        }

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<activities::Model> for Activity {
    fn from(model: activities::Model) -> Self {
        Activity {
            id: ActivityId(model.id),
            name: model.name,
            activity_date: model.activity_date,
            nb_participants: model.nb_participants,
            nb_teams: model.nb_teams,
            global_duration: model.global_duration,
            rotation_duration: model.rotation_duration,
            stand_duration: model.stand_duration,
            participant_code: model.participant_code,
            animator_code: model.animator_code,
            live: LiveState {
                status: model.status.parse().unwrap_or(ActivityStatus::NotStarted),
                started_at_ms: model.started_at_ms,
                pause_started_at_ms: model.pause_started_at_ms,
                paused_duration_ms: model.paused_duration_ms,
            },
            user_id: UserId(model.user_id),
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
