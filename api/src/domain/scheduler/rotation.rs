//! Parity-directed rotation between rounds

use super::{formatter, PositionMap, Round, StandSlot, TeamSlot};
use crate::domain::entities::TeamId;
use crate::error::ScheduleError;

/// Which way a team walks around the stand list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Even ids move forward, odd ids move backward
    pub fn for_team(id: TeamId) -> Self {
        if id.is_even() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        }
    }
}

/// Move every team one stand in its direction.
///
/// Teams claim stands in input order. A team whose target is already full for
/// this round keeps stepping the same way; at most one full lap is tried.
pub fn rotate(
    teams: &[TeamSlot],
    stands: &[StandSlot],
    positions: &PositionMap,
) -> Result<PositionMap, ScheduleError> {
    let len = stands.len();
    let mut occupancy = vec![0u32; len];
    let mut next = Vec::with_capacity(positions.len());

    for (team_index, current) in positions.iter() {
        let team = teams.get(team_index).ok_or_else(|| {
            ScheduleError::InvariantViolation(format!(
                "position map references unknown team #{}",
                team_index
            ))
        })?;
        let direction = Direction::for_team(team.id);

        let mut candidate = direction.step(current, len);
        let mut placed = None;
        for _ in 0..len {
            if occupancy[candidate] < stands[candidate].capacity {
                placed = Some(candidate);
                break;
            }
            candidate = direction.step(candidate, len);
        }

        let index = placed.ok_or_else(|| {
            ScheduleError::InvariantViolation(format!(
                "no stand has room for team {} after a full lap",
                team.id
            ))
        })?;

        occupancy[index] += 1;
        next.push(index);
    }

    Ok(PositionMap::from_indexes(next))
}

/// Produce one round per stand: the initial placement, then one rotation per
/// following round.
pub fn run(
    teams: &[TeamSlot],
    stands: &[StandSlot],
    initial: PositionMap,
) -> Result<Vec<Round>, ScheduleError> {
    let mut rounds = Vec::with_capacity(stands.len());
    let mut positions = initial;

    for round in 0..stands.len() {
        if round > 0 {
            positions = rotate(teams, stands, &positions)?;
        }
        rounds.push(formatter::format_round(teams, stands, &positions));
    }

    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StandId;

    fn team(id: i64) -> TeamSlot {
        TeamSlot {
            id: TeamId(id),
            name: format!("Team {}", id),
        }
    }

    fn stands(capacities: &[u32]) -> Vec<StandSlot> {
        capacities
            .iter()
            .enumerate()
            .map(|(i, capacity)| StandSlot {
                id: StandId(i as i64 + 1),
                name: format!("Stand {}", i + 1),
                capacity: *capacity,
            })
            .collect()
    }

    #[test]
    fn direction_follows_parity() {
        assert_eq!(Direction::for_team(TeamId(2)), Direction::Forward);
        assert_eq!(Direction::for_team(TeamId(0)), Direction::Forward);
        assert_eq!(Direction::for_team(TeamId(7)), Direction::Backward);
    }

    #[test]
    fn steps_wrap_around() {
        assert_eq!(Direction::Forward.step(3, 4), 0);
        assert_eq!(Direction::Backward.step(0, 4), 3);
        assert_eq!(Direction::Forward.step(0, 1), 0);
    }

    #[test]
    fn full_target_is_skipped_in_same_direction() {
        // Team 2 moves forward from 0 to 1 first; team 1 then wants 1 going
        // backward from 2, finds it full and continues to 0.
        let teams = vec![team(2), team(1)];
        let stands = stands(&[1, 1, 1]);
        let positions = PositionMap::from_indexes(vec![0, 2]);

        let next = rotate(&teams, &stands, &positions).unwrap();
        assert_eq!(next, PositionMap::from_indexes(vec![1, 0]));
    }

    #[test]
    fn exhausted_lap_is_an_invariant_violation() {
        // More teams than slots can only come from a bypassed validator
        let teams = vec![team(1), team(2), team(3)];
        let stands = stands(&[1, 1]);
        let positions = PositionMap::from_indexes(vec![0, 1, 0]);

        let err = rotate(&teams, &stands, &positions).unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn run_yields_one_round_per_stand() {
        let teams = vec![team(1), team(2)];
        let stands = stands(&[1, 1, 1, 1, 1]);
        let rounds = run(&teams, &stands, PositionMap::from_indexes(vec![0, 1])).unwrap();

        assert_eq!(rounds.len(), 5);
        assert_eq!(rounds[0].stand_of(TeamId(1)), Some(StandId(1)));
        assert_eq!(rounds[1].stand_of(TeamId(1)), Some(StandId(5)));
        assert_eq!(rounds[1].stand_of(TeamId(2)), Some(StandId(3)));
    }
}
