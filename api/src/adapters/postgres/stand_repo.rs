//! PostgreSQL adapter for StandRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{ActivityId, NewStand, Stand, StandChanges, StandId, UserId};
use crate::domain::ports::StandRepository;
use crate::entity::stands;
use crate::error::DomainError;

/// PostgreSQL implementation of StandRepository
pub struct PostgresStandRepository {
    db: DatabaseConnection,
}

impl PostgresStandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StandRepository for PostgresStandRepository {
    async fn find_by_id(&self, id: &StandId) -> Result<Option<Stand>, DomainError> {
        let result = stands::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Stand>, DomainError> {
        let results = stands::Entity::find()
            .order_by_asc(stands::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_activity(&self, activity_id: &ActivityId) -> Result<Vec<Stand>, DomainError> {
        let results = stands::Entity::find()
            .filter(stands::Column::ActivityId.eq(activity_id.0))
            .order_by_asc(stands::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, stand: &NewStand) -> Result<Stand, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = stands::ActiveModel {
            name: Set(stand.name.clone()),
            nb_teams_on_stand: Set(capacity_column(stand.capacity)?),
            activity_id: Set(stand.activity_id.map(|a| a.0)),
            user_id: Set(stand.user_id.0),
            created_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &StandId, changes: &StandChanges) -> Result<Stand, DomainError> {
        let mut model = stands::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Stand {}", id)))?
            .into_active_model();

        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(capacity) = changes.capacity {
            model.nb_teams_on_stand = Set(capacity_column(capacity)?);
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

    async fn delete(&self, id: &StandId) -> Result<(), DomainError> {
        let result = stands::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Stand {}", id)));
        }

        Ok(())
    }
}

fn capacity_column(capacity: u32) -> Result<i32, DomainError> {
    i32::try_from(capacity)
        .map_err(|_| DomainError::Validation(format!("Capacity {} is out of range", capacity)))
}

/// Convert SeaORM model to domain entity
impl From<stands::Model> for Stand {
    fn from(model: stands::Model) -> Self {
        Stand {
            id: StandId(model.id),
            name: model.name,
            // Column has a CHECK constraint keeping it positive
            capacity: u32::try_from(model.nb_teams_on_stand).unwrap_or(1),
            activity_id: model.activity_id.map(ActivityId),
            user_id: UserId(model.user_id),
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
