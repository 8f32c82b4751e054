//! Projection of a position map into a named round

use super::{PositionMap, Round, StandOccupancy, StandSlot, TeamEntry, TeamSlot};

/// Build the round snapshot for the current positions.
///
/// Every stand appears, in input order, even when nobody is on it. Teams on a
/// stand are listed in input order.
pub fn format_round(teams: &[TeamSlot], stands: &[StandSlot], positions: &PositionMap) -> Round {
    let mut occupancy: Vec<StandOccupancy> = stands
        .iter()
        .map(|stand| StandOccupancy {
            stand_id: stand.id,
            stand_name: stand.name.clone(),
            teams: Vec::new(),
        })
        .collect();

    for (team_index, stand_index) in positions.iter() {
        if let (Some(team), Some(slot)) = (teams.get(team_index), occupancy.get_mut(stand_index)) {
            slot.teams.push(TeamEntry {
                team_id: team.id,
                team_name: team.name.clone(),
            });
        }
    }

    Round { stands: occupancy }
}
