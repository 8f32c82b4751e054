//! First-fit initial placement

use super::{StandSlot, TeamSlot};
use crate::error::ScheduleError;

/// Current stand of every team.
///
/// Indexed by the team's position in the input list; values are indexes into
/// the stand list. Keeping positions instead of ids means two teams or stands
/// sharing a display name can never be confused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    stands: Vec<usize>,
}

impl PositionMap {
    pub fn from_indexes(stands: Vec<usize>) -> Self {
        Self { stands }
    }

    /// Stand index of the team at `team` in the input list
    pub fn stand_of(&self, team: usize) -> Option<usize> {
        self.stands.get(team).copied()
    }

    /// `(team index, stand index)` pairs in team order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.stands.iter().copied().enumerate()
    }

    pub fn len(&self) -> usize {
        self.stands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stands.is_empty()
    }
}

/// Put each team, in input order, on the first stand that still has room.
pub fn initial_placement(
    teams: &[TeamSlot],
    stands: &[StandSlot],
) -> Result<PositionMap, ScheduleError> {
    let mut occupancy = vec![0u32; stands.len()];
    let mut positions = Vec::with_capacity(teams.len());

    for team in teams {
        let index = stands
            .iter()
            .zip(&occupancy)
            .position(|(stand, used)| *used < stand.capacity)
            .ok_or_else(|| {
                ScheduleError::InvariantViolation(format!(
                    "no stand has room for team {} during initial placement",
                    team.id
                ))
            })?;

        occupancy[index] += 1;
        positions.push(index);
    }

    Ok(PositionMap::from_indexes(positions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{StandId, TeamId};

    fn teams(n: i64) -> Vec<TeamSlot> {
        (1..=n)
            .map(|id| TeamSlot {
                id: TeamId(id),
                name: format!("Team {}", id),
            })
            .collect()
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
    fn one_team_per_stand() {
        let positions = initial_placement(&teams(4), &stands(&[1, 1, 1, 1])).unwrap();
        assert_eq!(positions, PositionMap::from_indexes(vec![0, 1, 2, 3]));
    }

    #[test]
    fn fills_stands_in_order() {
        let positions = initial_placement(&teams(5), &stands(&[2, 2, 2])).unwrap();
        assert_eq!(positions, PositionMap::from_indexes(vec![0, 0, 1, 1, 2]));
    }

    #[test]
    fn leaves_trailing_stands_empty() {
        let positions = initial_placement(&teams(2), &stands(&[1, 1, 1])).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions.stand_of(1), Some(1));
        assert_eq!(positions.stand_of(2), None);
    }

    #[test]
    fn no_room_is_an_invariant_violation() {
        let err = initial_placement(&teams(3), &stands(&[1, 1])).unwrap_err();
        assert!(err.is_invariant_violation());
    }
}
