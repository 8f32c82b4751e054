//! Capacity validation, run before any placement

use super::StandSlot;
use crate::error::ScheduleError;

/// Check that a schedule can be built for `team_count` teams on `stands`.
///
/// Checks run in a fixed order: uniform capacity, then total room, then
/// divisibility of the competitive slots. Callers have already rejected empty
/// inputs.
pub fn validate(team_count: usize, stands: &[StandSlot]) -> Result<(), ScheduleError> {
    let Some(first) = stands.first() else {
        return Err(ScheduleError::EmptyStands);
    };

    if let Some(odd) = stands.iter().find(|s| s.capacity != first.capacity) {
        return Err(ScheduleError::CapacityMismatch {
            stand: odd.name.clone(),
            expected: first.capacity,
            found: odd.capacity,
        });
    }

    let slots: u64 = stands.iter().map(|s| u64::from(s.capacity)).sum();
    if team_count as u64 > slots {
        return Err(ScheduleError::TooManyTeams {
            teams: team_count,
            slots,
        });
    }

    let competitive: u64 = stands
        .iter()
        .filter(|s| s.capacity > 1)
        .map(|s| u64::from(s.capacity))
        .sum();
    if team_count > 0 && competitive % team_count as u64 != 0 {
        return Err(ScheduleError::IndivisibleCompetitiveSlots {
            slots: competitive,
            teams: team_count,
        });
    }

    Ok(())
}
