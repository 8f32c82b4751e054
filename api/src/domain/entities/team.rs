//! Team domain entity
//!
//! A team of participants rotated across the stands of an activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity::ActivityId;
use super::user::UserId;

/// Unique identifier for a team
///
/// Integer on purpose: the rotation direction of a team is derived from the
/// parity of its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub i64);

impl TeamId {
    /// Even teams rotate forward, odd teams rotate backward
    pub fn is_even(&self) -> bool {
        self.0 % 2 == 0
    }
}

impl From<i64> for TeamId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team taking part in an activity
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub activity_id: Option<ActivityId>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new team
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub activity_id: Option<ActivityId>,
    pub user_id: UserId,
}

/// Partial update of a team
#[derive(Debug, Clone, Default)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub activity_id: Option<ActivityId>,
}
