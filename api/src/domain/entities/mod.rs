//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod activity;
pub mod scenario;
pub mod stand;
pub mod team;
pub mod user;

pub use activity::{
    Activity, ActivityChanges, ActivityId, ActivityStatus, LiveState, NewActivity, PincodeKind,
    MAX_DURATION_SECS,
};
pub use scenario::{Scenario, ScenarioId};
pub use stand::{validate_capacity, NewStand, Stand, StandChanges, StandId};
pub use team::{NewTeam, Team, TeamChanges, TeamId};
pub use user::{NewUser, Role, User, UserChanges, UserId, ORGANIZER_ROLES};

/// Shortest accepted display name
pub const MIN_NAME_LEN: usize = 2;

/// Longest accepted display name
pub const MAX_NAME_LEN: usize = 255;

/// Check a display name (activities, teams, stands)
pub fn validate_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if name.trim().is_empty() {
        return Err("The name field is required".to_string());
    }
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(format!(
            "The name must be between {} and {} characters",
            MIN_NAME_LEN, MAX_NAME_LEN
        ));
    }
    Ok(())
}
