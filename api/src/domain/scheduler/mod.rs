//! Rotation scheduler
//!
//! Turns an ordered list of teams and an ordered list of stands into a
//! schedule: one round per stand, every team placed exactly once per round,
//! no stand above its capacity.
//!
//! Pipeline: [`validator`] → [`placement`] → [`rotation`] (one
//! [`formatter`] snapshot per round). The whole computation is pure and
//! deterministic; it never touches storage or the clock.

pub mod formatter;
pub mod placement;
pub mod rotation;
pub mod validator;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Stand, StandId, Team, TeamId};
use crate::error::ScheduleError;

pub use placement::PositionMap;

/// A team as seen by the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSlot {
    pub id: TeamId,
    pub name: String,
}

impl From<&Team> for TeamSlot {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
        }
    }
}

/// A stand as seen by the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandSlot {
    pub id: StandId,
    pub name: String,
    pub capacity: u32,
}

impl From<&Stand> for StandSlot {
    fn from(stand: &Stand) -> Self {
        Self {
            id: stand.id,
            name: stand.name.clone(),
            capacity: stand.capacity,
        }
    }
}

/// A team present on a stand during a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub team_id: TeamId,
    pub team_name: String,
}

/// The teams present on one stand during a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandOccupancy {
    pub stand_id: StandId,
    pub stand_name: String,
    pub teams: Vec<TeamEntry>,
}

/// One round of the schedule, stands in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round {
    pub stands: Vec<StandOccupancy>,
}

impl Round {
    /// Teams hosted by a stand during this round
    pub fn teams_at(&self, stand: StandId) -> Option<&[TeamEntry]> {
        self.stands
            .iter()
            .find(|s| s.stand_id == stand)
            .map(|s| s.teams.as_slice())
    }

    /// Stand hosting a team during this round
    pub fn stand_of(&self, team: TeamId) -> Option<StandId> {
        self.stands
            .iter()
            .find(|s| s.teams.iter().any(|t| t.team_id == team))
            .map(|s| s.stand_id)
    }

    pub fn team_count(&self) -> usize {
        self.stands.iter().map(|s| s.teams.len()).sum()
    }
}

/// The ordered rounds of one scheduling run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub rounds: Vec<Round>,
}

/// Build the rotation schedule for the given teams and stands.
///
/// Input order matters: it drives the initial placement and the order in which
/// teams claim stands each round. Callers pass teams and stands in creation
/// order.
pub fn generate_schedule(
    teams: &[TeamSlot],
    stands: &[StandSlot],
) -> Result<Schedule, ScheduleError> {
    if teams.is_empty() {
        return Err(ScheduleError::EmptyTeams);
    }
    if stands.is_empty() {
        return Err(ScheduleError::EmptyStands);
    }

    validator::validate(teams.len(), stands)?;

    let positions = placement::initial_placement(teams, stands)?;
    let rounds = rotation::run(teams, stands, positions)?;

    Ok(Schedule { rounds })
}
