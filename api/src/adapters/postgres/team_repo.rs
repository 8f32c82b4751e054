//! PostgreSQL adapter for TeamRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{ActivityId, NewTeam, Team, TeamChanges, TeamId, UserId};
use crate::domain::ports::TeamRepository;
use crate::entity::teams;
use crate::error::DomainError;

/// PostgreSQL implementation of TeamRepository
pub struct PostgresTeamRepository {
    db: DatabaseConnection,
}

impl PostgresTeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let result = teams::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Team>, DomainError> {
        let results = teams::Entity::find()
            .order_by_asc(teams::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_activity(&self, activity_id: &ActivityId) -> Result<Vec<Team>, DomainError> {
        let results = teams::Entity::find()
            .filter(teams::Column::ActivityId.eq(activity_id.0))
            .order_by_asc(teams::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, team: &NewTeam) -> Result<Team, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = teams::ActiveModel {
            name: Set(team.name.clone()),
            activity_id: Set(team.activity_id.map(|a| a.0)),
            user_id: Set(team.user_id.0),
            created_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &TeamId, changes: &TeamChanges) -> Result<Team, DomainError> {
        let mut model = teams::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Team {}", id)))?
            .into_active_model();

        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(activity_id) = changes.activity_id {
            model.activity_id = Set(Some(activity_id.0));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn delete(&self, id: &TeamId) -> Result<(), DomainError> {
        let result = teams::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Team {}", id)));
        }

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Team {
            id: TeamId(model.id),
            name: model.name,
            activity_id: model.activity_id.map(ActivityId),
            user_id: UserId(model.user_id),
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
