//! Scenario domain entity
//!
//! The rotation schedule stored against an activity. The generated schedule is
//! kept as an opaque JSON document; the current scenario is the working copy a
//! game master may adjust during the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::activity::ActivityId;

/// Unique identifier for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioId(pub i64);

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rotation scenario of an activity
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub activity_id: ActivityId,
    pub base_scenario: Option<Value>,
    pub current_scenario: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// The scenario to display: the working copy if any, else the generated one
    pub fn effective(&self) -> Option<&Value> {
        self.current_scenario
            .as_ref()
            .or(self.base_scenario.as_ref())
    }
}
