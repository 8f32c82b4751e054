//! Scenario service
//!
//! Loads the teams and stands of an activity, runs the rotation scheduler and
//! stores the result as the activity's base scenario.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{Activity, ActivityId, Scenario};
use crate::domain::ports::{
    ActivityRepository, ScenarioRepository, StandRepository, TeamRepository,
};
use crate::domain::scheduler::{self, Schedule, StandSlot, TeamSlot};
use crate::error::AppError;

/// How the generated rounds fit in the activity's time budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSummary {
    pub rounds: usize,
    /// Seconds per round (stand + rotation), when both are set
    pub turn_duration: Option<i32>,
    /// Rounds allowed by the global duration, when known
    pub max_rounds: Option<i32>,
    /// Whether every round fits, when known
    pub fits: Option<bool>,
}

impl TimingSummary {
    pub fn for_activity(activity: &Activity, rounds: usize) -> Self {
        let max_rounds = activity.max_rounds();
        Self {
            rounds,
            turn_duration: activity.turn_duration(),
            max_rounds,
            fits: max_rounds.map(|max| i64::from(max) >= rounds as i64),
        }
    }
}

/// Result of a successful generation
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedScenario {
    pub success: bool,
    pub message: &'static str,
    pub data: Schedule,
    pub timing: TimingSummary,
}

/// Service for generating and editing rotation scenarios
pub struct ScenarioService<AR, TR, SR, SCR>
where
    AR: ActivityRepository,
    TR: TeamRepository,
    SR: StandRepository,
    SCR: ScenarioRepository,
{
    activities: Arc<AR>,
    teams: Arc<TR>,
    stands: Arc<SR>,
    scenarios: Arc<SCR>,
}

impl<AR, TR, SR, SCR> ScenarioService<AR, TR, SR, SCR>
where
    AR: ActivityRepository,
    TR: TeamRepository,
    SR: StandRepository,
    SCR: ScenarioRepository,
{
    pub fn new(activities: Arc<AR>, teams: Arc<TR>, stands: Arc<SR>, scenarios: Arc<SCR>) -> Self {
        Self {
            activities,
            teams,
            stands,
            scenarios,
        }
    }

    /// Scenario of an activity
    pub async fn get(&self, activity_id: &ActivityId) -> Result<Scenario, AppError> {
        self.scenarios
            .find_by_activity(activity_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No scenario for activity {}", activity_id))
            })
    }

    /// Generate the rotation schedule of an activity and store it
    pub async fn generate(&self, activity_id: &ActivityId) -> Result<GeneratedScenario, AppError> {
        let activity = self
            .activities
            .find_by_id(activity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

        // Creation order drives the initial placement
        let teams: Vec<TeamSlot> = self
            .teams
            .find_by_activity(activity_id)
            .await?
            .iter()
            .map(TeamSlot::from)
            .collect();
        let stands: Vec<StandSlot> = self
            .stands
            .find_by_activity(activity_id)
            .await?
            .iter()
            .map(StandSlot::from)
            .collect();

        let schedule = match scheduler::generate_schedule(&teams, &stands) {
            Ok(schedule) => schedule,
            Err(e) if e.is_invariant_violation() => {
                tracing::error!(
                    activity_id = %activity_id,
                    teams = teams.len(),
                    stands = stands.len(),
                    error = %e,
                    "Scheduler invariant violated"
                );
                return Err(e.into());
            }
            Err(e) => {
                tracing::warn!(activity_id = %activity_id, error = %e, "Scenario rejected");
                return Err(e.into());
            }
        };

        let document = serde_json::to_value(&schedule)
            .map_err(|e| AppError::Internal(format!("Failed to encode scenario: {}", e)))?;
        self.scenarios.save_base(activity_id, &document).await?;

        let timing = TimingSummary::for_activity(&activity, schedule.rounds.len());
        tracing::info!(
            activity_id = %activity_id,
            rounds = schedule.rounds.len(),
            teams = teams.len(),
            stands = stands.len(),
            fits = ?timing.fits,
            "Scenario generated"
        );

        Ok(GeneratedScenario {
            success: true,
            message: "Rotation scenario created",
            data: schedule,
            timing,
        })
    }

    /// Replace the working copy of an activity's scenario
    pub async fn update_current(
        &self,
        activity_id: &ActivityId,
        current: Value,
    ) -> Result<Scenario, AppError> {
        if !current.get("rounds").map(Value::is_array).unwrap_or(false) {
            return Err(AppError::BadRequest(
                "A scenario needs a 'rounds' array".to_string(),
            ));
        }

        Ok(self.scenarios.update_current(activity_id, &current).await?)
    }
}
