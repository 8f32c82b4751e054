//! PostgreSQL adapter for ScenarioRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use serde_json::Value;

use crate::domain::entities::{ActivityId, Scenario, ScenarioId};
use crate::domain::ports::ScenarioRepository;
use crate::entity::scenarios;
use crate::error::DomainError;

/// PostgreSQL implementation of ScenarioRepository
pub struct PostgresScenarioRepository {
    db: DatabaseConnection,
}

impl PostgresScenarioRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<scenarios::Model>, DomainError> {
        scenarios::Entity::find()
            .filter(scenarios::Column::ActivityId.eq(activity_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

#[async_trait]
impl ScenarioRepository for PostgresScenarioRepository {
    async fn find_by_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<Scenario>, DomainError> {
        Ok(self.find_model(activity_id).await?.map(|m| m.into()))
    }

    async fn save_base(
        &self,
        activity_id: &ActivityId,
        base: &Value,
    ) -> Result<Scenario, DomainError> {
        let now = Utc::now().fixed_offset();

        let result = match self.find_model(activity_id).await? {
            Some(existing) => {
                let mut model = existing.into_active_model();
                model.base_scenario = Set(Some(base.clone()));
                model.current_scenario = Set(None);
                model.updated_at = Set(Some(now));
                model.update(&self.db).await
            }
            None => {
                scenarios::ActiveModel {
                    activity_id: Set(activity_id.0),
                    base_scenario: Set(Some(base.clone())),
                    current_scenario: Set(None),
                    updated_at: Set(Some(now)),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_current(
        &self,
        activity_id: &ActivityId,
        current: &Value,
    ) -> Result<Scenario, DomainError> {
        let mut model = self
            .find_model(activity_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Scenario for activity {}", activity_id))
            })?
            .into_active_model();

        model.current_scenario = Set(Some(current.clone()));
        model.updated_at = Set(Some(Utc::now().fixed_offset()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<scenarios::Model> for Scenario {
    fn from(model: scenarios::Model) -> Self {
        Scenario {
            id: ScenarioId(model.id),
            activity_id: ActivityId(model.activity_id),
            base_scenario: model.base_scenario,
            current_scenario: model.current_scenario,
            updated_at: model
                .updated_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
