//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;

use crate::domain::entities::{
    Activity, ActivityId, LiveState, Role, Stand, StandId, Team, TeamId, User, UserId,
};

/// Lowest bcrypt cost, keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a test user holding a single role
///
/// The password hash is not a valid bcrypt hash; tests that log in create
/// their user through `UserService`.
pub fn test_user(role: Role) -> User {
    let login = match role {
        Role::Admin => "admin",
        Role::Gamemaster => "gamemaster",
    };
    User {
        id: UserId(1),
        login: login.to_string(),
        password_hash: "not-a-bcrypt-hash".to_string(),
        api_key_hash: None,
        roles: vec![role],
        created_at: Utc::now(),
    }
}

/// Create a test activity: 600s per stand, 120s walking, 3600s in total
pub fn test_activity() -> Activity {
    Activity {
        id: ActivityId(1),
        name: "Test activity".to_string(),
        activity_date: None,
        nb_participants: Some(24),
        nb_teams: Some(4),
        global_duration: Some(3600),
        rotation_duration: Some(120),
        stand_duration: Some(600),
        participant_code: "111111".to_string(),
        animator_code: "222222".to_string(),
        live: LiveState::default(),
        user_id: UserId(1),
        created_at: Utc::now(),
    }
}

/// Create a test team attached to an activity
pub fn test_team(activity_id: ActivityId, id: i64) -> Team {
    Team {
        id: TeamId(id),
        name: format!("Team {}", id),
        activity_id: Some(activity_id),
        user_id: UserId(1),
        created_at: Utc::now(),
    }
}

/// Create a test stand attached to an activity
pub fn test_stand(activity_id: ActivityId, id: i64, capacity: u32) -> Stand {
    Stand {
        id: StandId(id),
        name: format!("Stand {}", id),
        capacity,
        activity_id: Some(activity_id),
        user_id: UserId(1),
        created_at: Utc::now(),
    }
}
