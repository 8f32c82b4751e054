//! Stand domain entity
//!
//! An activity booth hosting one or more teams per round.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity::ActivityId;
use super::user::UserId;

/// Smallest number of teams a stand can host
pub const MIN_STAND_CAPACITY: u32 = 1;

/// Largest number of teams a stand can host
pub const MAX_STAND_CAPACITY: u32 = 50;

/// Unique identifier for a stand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StandId(pub i64);

impl From<i64> for StandId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stand of an activity
#[derive(Debug, Clone, Serialize)]
pub struct Stand {
    pub id: StandId,
    pub name: String,
    /// Number of teams hosted simultaneously during a round
    pub capacity: u32,
    pub activity_id: Option<ActivityId>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Stand {
    /// A stand hosting several teams at once (head-to-head games)
    pub fn is_competitive(&self) -> bool {
        self.capacity > 1
    }
}

/// Data needed to create a new stand
#[derive(Debug, Clone)]
pub struct NewStand {
    pub name: String,
    pub capacity: u32,
    pub activity_id: Option<ActivityId>,
    pub user_id: UserId,
}

/// Partial update of a stand
#[derive(Debug, Clone, Default)]
pub struct StandChanges {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub activity_id: Option<ActivityId>,
}

/// Check a requested stand capacity
pub fn validate_capacity(capacity: u32) -> Result<(), String> {
    if (MIN_STAND_CAPACITY..=MAX_STAND_CAPACITY).contains(&capacity) {
        Ok(())
    } else {
        Err(format!(
            "The number of teams on a stand must be between {} and {}",
            MIN_STAND_CAPACITY, MAX_STAND_CAPACITY
        ))
    }
}
