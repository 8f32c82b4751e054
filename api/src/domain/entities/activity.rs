//! Activity domain entity
//!
//! A team-building event: a set of teams rotating across a set of stands,
//! plus the live progression state a game master drives during the event.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;
use crate::error::DomainError;

/// Unique identifier for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub i64);

impl From<i64> for ActivityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Activity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    /// Not started yet
    NotStarted,
    /// Teams are playing on their stands
    InProgress,
    /// Teams are walking to their next stand
    Rotating,
    /// Timer is stopped
    Paused,
    /// Activity is over
    Completed,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::NotStarted => write!(f, "NOT_STARTED"),
            ActivityStatus::InProgress => write!(f, "IN_PROGRESS"),
            ActivityStatus::Rotating => write!(f, "ROTATING"),
            ActivityStatus::Paused => write!(f, "PAUSED"),
            ActivityStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOT_STARTED" => Ok(ActivityStatus::NotStarted),
            "IN_PROGRESS" => Ok(ActivityStatus::InProgress),
            "ROTATING" => Ok(ActivityStatus::Rotating),
            "PAUSED" => Ok(ActivityStatus::Paused),
            "COMPLETED" => Ok(ActivityStatus::Completed),
            _ => Err(format!("Unknown activity status: {}", s)),
        }
    }
}

/// Live progression of an activity
///
/// Timestamps are unix milliseconds supplied by the caller, which keeps the
/// transitions deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveState {
    pub status: ActivityStatus,
    pub started_at_ms: Option<i64>,
    pub pause_started_at_ms: Option<i64>,
    pub paused_duration_ms: i64,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            status: ActivityStatus::NotStarted,
            started_at_ms: None,
            pause_started_at_ms: None,
            paused_duration_ms: 0,
        }
    }
}

impl LiveState {
    pub fn start(&mut self, now_ms: i64) -> Result<(), DomainError> {
        self.require_status(&[ActivityStatus::NotStarted], "start")?;
        self.status = ActivityStatus::InProgress;
        self.started_at_ms = Some(now_ms);
        Ok(())
    }

    /// Teams leave their stands for the next round
    pub fn rotate(&mut self) -> Result<(), DomainError> {
        self.require_status(&[ActivityStatus::InProgress], "rotate")?;
        self.status = ActivityStatus::Rotating;
        Ok(())
    }

    /// Teams reached their next stands
    pub fn settle(&mut self) -> Result<(), DomainError> {
        self.require_status(&[ActivityStatus::Rotating], "settle")?;
        self.status = ActivityStatus::InProgress;
        Ok(())
    }

    pub fn pause(&mut self, now_ms: i64) -> Result<(), DomainError> {
        self.require_status(
            &[ActivityStatus::InProgress, ActivityStatus::Rotating],
            "pause",
        )?;
        self.status = ActivityStatus::Paused;
        self.pause_started_at_ms = Some(now_ms);
        Ok(())
    }

    pub fn resume(&mut self, now_ms: i64) -> Result<(), DomainError> {
        self.require_status(&[ActivityStatus::Paused], "resume")?;
        self.close_pause(now_ms);
        self.status = ActivityStatus::InProgress;
        Ok(())
    }

    pub fn complete(&mut self, now_ms: i64) -> Result<(), DomainError> {
        if self.status == ActivityStatus::Completed {
            return Err(DomainError::Conflict(
                "Activity is already completed".to_string(),
            ));
        }
        self.close_pause(now_ms);
        self.status = ActivityStatus::Completed;
        Ok(())
    }

    /// Playing time since start, pauses excluded
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        let Some(started) = self.started_at_ms else {
            return 0;
        };
        let open_pause = self
            .pause_started_at_ms
            .map(|p| (now_ms - p).max(0))
            .unwrap_or(0);
        (now_ms - started - self.paused_duration_ms - open_pause).max(0)
    }

    fn close_pause(&mut self, now_ms: i64) {
        if let Some(paused_at) = self.pause_started_at_ms.take() {
            self.paused_duration_ms += (now_ms - paused_at).max(0);
        }
    }

    fn require_status(&self, allowed: &[ActivityStatus], action: &str) -> Result<(), DomainError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(DomainError::Conflict(format!(
                "Cannot {} an activity with status {}",
                action, self.status
            )))
        }
    }
}

/// Longest accepted duration field, in seconds (one week)
pub const MAX_DURATION_SECS: i32 = 7 * 24 * 3600;

/// A team-building activity
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub activity_date: Option<NaiveDate>,
    pub nb_participants: Option<i32>,
    pub nb_teams: Option<i32>,
    /// Total duration of the activity, in seconds
    pub global_duration: Option<i32>,
    /// Time needed to walk between stands, in seconds
    pub rotation_duration: Option<i32>,
    /// Time spent on a stand, in seconds
    pub stand_duration: Option<i32>,
    pub participant_code: String,
    pub animator_code: String,
    pub live: LiveState,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Duration of one round: playing on a stand plus walking to the next one
    pub fn turn_duration(&self) -> Option<i32> {
        match (self.stand_duration, self.rotation_duration) {
            (Some(stand), Some(rotation)) => stand.checked_add(rotation).filter(|t| *t > 0),
            _ => None,
        }
    }

    /// Number of rounds that fit in the global duration
    pub fn max_rounds(&self) -> Option<i32> {
        let turn = self.turn_duration()?;
        self.global_duration.map(|total| total / turn)
    }
}

/// Data needed to create a new activity
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub name: String,
    pub activity_date: Option<NaiveDate>,
    pub nb_participants: Option<i32>,
    pub nb_teams: Option<i32>,
    pub global_duration: Option<i32>,
    pub rotation_duration: Option<i32>,
    pub stand_duration: Option<i32>,
    pub participant_code: String,
    pub animator_code: String,
    pub user_id: UserId,
}

/// Partial update of an activity
#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    pub name: Option<String>,
    pub activity_date: Option<NaiveDate>,
    pub nb_participants: Option<i32>,
    pub nb_teams: Option<i32>,
    pub global_duration: Option<i32>,
    pub rotation_duration: Option<i32>,
    pub stand_duration: Option<i32>,
}

/// Kind of pincode handed out for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PincodeKind {
    Participant,
    Animator,
}

impl PincodeKind {
    /// Role granted to the holder of the code
    pub fn role_name(&self) -> &'static str {
        match self {
            PincodeKind::Participant => "ROLE_PARTICIPANT",
            PincodeKind::Animator => "ROLE_ANIMATOR",
        }
    }
}

impl std::fmt::Display for PincodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PincodeKind::Participant => write!(f, "participant"),
            PincodeKind::Animator => write!(f, "animator"),
        }
    }
}

impl std::str::FromStr for PincodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "participant" => Ok(PincodeKind::Participant),
            "animator" => Ok(PincodeKind::Animator),
            _ => Err(format!("Unknown route: {}", s)),
        }
    }
}
