//! Scenario handlers
//!
//! Rotation schedule generation and editing.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::app::GeneratedScenario;
use crate::domain::entities::{ActivityId, Scenario};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    pub id: i64,
    pub activity_id: i64,
    pub base_scenario: Option<Value>,
    pub current_scenario: Option<Value>,
    /// Working copy if edited, otherwise the generated schedule
    pub scenario: Option<Value>,
    pub updated_at: String,
}

impl From<Scenario> for ScenarioResponse {
    fn from(scenario: Scenario) -> Self {
        let effective = scenario.effective().cloned();
        Self {
            id: scenario.id.0,
            activity_id: scenario.activity_id.0,
            base_scenario: scenario.base_scenario,
            current_scenario: scenario.current_scenario,
            scenario: effective,
            updated_at: scenario.updated_at.to_rfc3339(),
        }
    }
}

/// GET /scenarios/:activity_id
pub async fn get_scenario(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<ScenarioResponse>, AppError> {
    let scenario = state
        .scenario_service
        .get(&ActivityId(activity_id))
        .await?;
    Ok(Json(scenario.into()))
}

/// POST /scenarios/:activity_id/generate
///
/// Runs the rotation scheduler over the activity's teams and stands.
/// Rejected configurations answer 400 with `success: false` and the reason.
pub async fn generate_scenario(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<GeneratedScenario>, AppError> {
    let generated = state
        .scenario_service
        .generate(&ActivityId(activity_id))
        .await?;
    Ok(Json(generated))
}

/// PUT /scenarios/:activity_id/current
pub async fn update_current_scenario(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<ScenarioResponse>, AppError> {
    let scenario = state
        .scenario_service
        .update_current(&ActivityId(activity_id), body)
        .await?;
    Ok(Json(scenario.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScenarioId;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn scenario_response_exposes_effective_scenario() {
        let scenario = Scenario {
            id: ScenarioId(1),
            activity_id: ActivityId(2),
            base_scenario: Some(json!({"rounds": [[]]})),
            current_scenario: None,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(ScenarioResponse::from(scenario)).unwrap();

        assert_eq!(json["activityId"], 2);
        assert_eq!(json["scenario"], json!({"rounds": [[]]}));
        assert!(json["currentScenario"].is_null());
    }
}
