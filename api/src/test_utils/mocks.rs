//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.
//! Identifiers are allocated as max(existing) + 1 so pre-populated rows never
//! collide with created ones.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Activity, ActivityChanges, ActivityId, LiveState, NewActivity, NewStand, NewTeam, NewUser,
    PincodeKind, Scenario, ScenarioId, Stand, StandChanges, StandId, Team, TeamChanges, TeamId,
    User, UserChanges, UserId,
};
use crate::domain::ports::{
    ActivityRepository, ScenarioRepository, StandRepository, TeamRepository, UserRepository,
};
use crate::error::DomainError;

fn next_id<T>(rows: &HashMap<i64, T>) -> i64 {
    rows.keys().max().copied().unwrap_or(0) + 1
}

fn sorted<T: Clone>(rows: &HashMap<i64, T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    let mut ids: Vec<i64> = rows.keys().copied().collect();
    ids.sort_unstable();
    ids.into_iter()
        .filter_map(|id| rows.get(&id))
        .filter(|row| keep(row))
        .cloned()
        .collect()
}

fn not_found(what: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::NotFound(format!("{} {} not found", what, id))
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id.0, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(&id.0).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.login == login).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.api_key_hash.as_deref() == Some(hash))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(sorted(&self.users.read().unwrap(), |_| true))
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.login == new_user.login) {
            return Err(DomainError::AlreadyExists(format!(
                "User with login '{}' already exists",
                new_user.login
            )));
        }

        let user = User {
            id: UserId(next_id(&users)),
            login: new_user.login.clone(),
            password_hash: new_user.password_hash.clone(),
            api_key_hash: None,
            roles: new_user.roles.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn update_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users.get_mut(&id.0).ok_or_else(|| not_found("User", id))?;
        user.api_key_hash = Some(hash.to_string());
        Ok(())
    }

    async fn update(&self, id: &UserId, changes: &UserChanges) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users.get_mut(&id.0).ok_or_else(|| not_found("User", id))?;
        if let Some(login) = &changes.login {
            user.login = login.clone();
        }
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(roles) = &changes.roles {
            user.roles = roles.clone();
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users
            .write()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("User", id))
    }
}

// ============================================================================
// In-Memory Activity Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryActivityRepository {
    activities: Arc<RwLock<HashMap<i64, Activity>>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an activity for testing
    pub fn with_activity(self, activity: Activity) -> Self {
        self.activities
            .write()
            .unwrap()
            .insert(activity.id.0, activity);
        self
    }

    fn find_by_code(&self, kind: PincodeKind, code: &str) -> Option<Activity> {
        let activities = self.activities.read().unwrap();
        activities
            .values()
            .find(|a| match kind {
                PincodeKind::Participant => a.participant_code == code,
                PincodeKind::Animator => a.animator_code == code,
            })
            .cloned()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        Ok(self.activities.read().unwrap().get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Activity>, DomainError> {
        Ok(sorted(&self.activities.read().unwrap(), |_| true))
    }

    async fn find_by_participant_code(&self, code: &str) -> Result<Option<Activity>, DomainError> {
        Ok(self.find_by_code(PincodeKind::Participant, code))
    }

    async fn find_by_animator_code(&self, code: &str) -> Result<Option<Activity>, DomainError> {
        Ok(self.find_by_code(PincodeKind::Animator, code))
    }

    async fn code_exists(&self, kind: PincodeKind, code: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_code(kind, code).is_some())
    }

    async fn create(&self, new_activity: &NewActivity) -> Result<Activity, DomainError> {
        let mut activities = self.activities.write().unwrap();
        let activity = Activity {
            id: ActivityId(next_id(&activities)),
            name: new_activity.name.clone(),
            activity_date: new_activity.activity_date,
            nb_participants: new_activity.nb_participants,
            nb_teams: new_activity.nb_teams,
            global_duration: new_activity.global_duration,
            rotation_duration: new_activity.rotation_duration,
            stand_duration: new_activity.stand_duration,
            participant_code: new_activity.participant_code.clone(),
            animator_code: new_activity.animator_code.clone(),
            live: LiveState::default(),
            user_id: new_activity.user_id,
            created_at: Utc::now(),
        };
        activities.insert(activity.id.0, activity.clone());
        Ok(activity)
    }

    async fn update(
        &self,
        id: &ActivityId,
        changes: &ActivityChanges,
    ) -> Result<Activity, DomainError> {
        let mut activities = self.activities.write().unwrap();
        let activity = activities
            .get_mut(&id.0)
            .ok_or_else(|| not_found("Activity", id))?;

        if let Some(name) = &changes.name {
            activity.name = name.clone();
        }
        if changes.activity_date.is_some() {
            activity.activity_date = changes.activity_date;
        }
        if changes.nb_participants.is_some() {
            activity.nb_participants = changes.nb_participants;
        }
        if changes.nb_teams.is_some() {
            activity.nb_teams = changes.nb_teams;
        }
        if changes.global_duration.is_some() {
            activity.global_duration = changes.global_duration;
        }
        if changes.rotation_duration.is_some() {
            activity.rotation_duration = changes.rotation_duration;
        }
        if changes.stand_duration.is_some() {
            activity.stand_duration = changes.stand_duration;
        }
        Ok(activity.clone())
    }

    async fn update_live_state(
        &self,
        id: &ActivityId,
        live: &LiveState,
    ) -> Result<Activity, DomainError> {
        let mut activities = self.activities.write().unwrap();
        let activity = activities
            .get_mut(&id.0)
            .ok_or_else(|| not_found("Activity", id))?;
        activity.live = *live;
        Ok(activity.clone())
    }

    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError> {
        self.activities
            .write()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("Activity", id))
    }
}

// ============================================================================
// In-Memory Team Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryTeamRepository {
    teams: Arc<RwLock<HashMap<i64, Team>>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a team for testing
    pub fn with_team(self, team: Team) -> Self {
        self.teams.write().unwrap().insert(team.id.0, team);
        self
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.teams.read().unwrap().get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Team>, DomainError> {
        Ok(sorted(&self.teams.read().unwrap(), |_| true))
    }

    async fn find_by_activity(&self, activity_id: &ActivityId) -> Result<Vec<Team>, DomainError> {
        Ok(sorted(&self.teams.read().unwrap(), |t| {
            t.activity_id == Some(*activity_id)
        }))
    }

    async fn create(&self, new_team: &NewTeam) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().unwrap();
        let team = Team {
            id: TeamId(next_id(&teams)),
            name: new_team.name.clone(),
            activity_id: new_team.activity_id,
            user_id: new_team.user_id,
            created_at: Utc::now(),
        };
        teams.insert(team.id.0, team.clone());
        Ok(team)
    }

    async fn update(&self, id: &TeamId, changes: &TeamChanges) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().unwrap();
        let team = teams.get_mut(&id.0).ok_or_else(|| not_found("Team", id))?;
        if let Some(name) = &changes.name {
            team.name = name.clone();
        }
        if changes.activity_id.is_some() {
            team.activity_id = changes.activity_id;
        }
        Ok(team.clone())
    }

    async fn delete(&self, id: &TeamId) -> Result<(), DomainError> {
        self.teams
            .write()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("Team", id))
    }
}

// ============================================================================
// In-Memory Stand Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryStandRepository {
    stands: Arc<RwLock<HashMap<i64, Stand>>>,
}

impl InMemoryStandRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a stand for testing
    pub fn with_stand(self, stand: Stand) -> Self {
        self.stands.write().unwrap().insert(stand.id.0, stand);
        self
    }
}

#[async_trait]
impl StandRepository for InMemoryStandRepository {
    async fn find_by_id(&self, id: &StandId) -> Result<Option<Stand>, DomainError> {
        Ok(self.stands.read().unwrap().get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Stand>, DomainError> {
        Ok(sorted(&self.stands.read().unwrap(), |_| true))
    }

    async fn find_by_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Vec<Stand>, DomainError> {
        Ok(sorted(&self.stands.read().unwrap(), |s| {
            s.activity_id == Some(*activity_id)
        }))
    }

    async fn create(&self, new_stand: &NewStand) -> Result<Stand, DomainError> {
        let mut stands = self.stands.write().unwrap();
        let stand = Stand {
            id: StandId(next_id(&stands)),
            name: new_stand.name.clone(),
            capacity: new_stand.capacity,
            activity_id: new_stand.activity_id,
            user_id: new_stand.user_id,
            created_at: Utc::now(),
        };
        stands.insert(stand.id.0, stand.clone());
        Ok(stand)
    }

    async fn update(&self, id: &StandId, changes: &StandChanges) -> Result<Stand, DomainError> {
        let mut stands = self.stands.write().unwrap();
        let stand = stands.get_mut(&id.0).ok_or_else(|| not_found("Stand", id))?;
        if let Some(name) = &changes.name {
            stand.name = name.clone();
        }
        if let Some(capacity) = changes.capacity {
            stand.capacity = capacity;
        }
        if changes.activity_id.is_some() {
            stand.activity_id = changes.activity_id;
        }
        Ok(stand.clone())
    }

    async fn delete(&self, id: &StandId) -> Result<(), DomainError> {
        self.stands
            .write()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("Stand", id))
    }
}

// ============================================================================
// In-Memory Scenario Repository
// ============================================================================

/// Keyed by activity: one scenario per activity
#[derive(Default)]
pub struct InMemoryScenarioRepository {
    scenarios: Arc<RwLock<HashMap<i64, Scenario>>>,
}

impl InMemoryScenarioRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScenarioRepository for InMemoryScenarioRepository {
    async fn find_by_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<Scenario>, DomainError> {
        Ok(self.scenarios.read().unwrap().get(&activity_id.0).cloned())
    }

    async fn save_base(
        &self,
        activity_id: &ActivityId,
        base: &Value,
    ) -> Result<Scenario, DomainError> {
        let mut scenarios = self.scenarios.write().unwrap();
        let id = scenarios
            .get(&activity_id.0)
            .map(|s| s.id)
            .unwrap_or_else(|| ScenarioId(scenarios.len() as i64 + 1));

        let scenario = Scenario {
            id,
            activity_id: *activity_id,
            base_scenario: Some(base.clone()),
            current_scenario: None,
            updated_at: Utc::now(),
        };
        scenarios.insert(activity_id.0, scenario.clone());
        Ok(scenario)
    }

    async fn update_current(
        &self,
        activity_id: &ActivityId,
        current: &Value,
    ) -> Result<Scenario, DomainError> {
        let mut scenarios = self.scenarios.write().unwrap();
        let scenario = scenarios
            .get_mut(&activity_id.0)
            .ok_or_else(|| not_found("Scenario for activity", activity_id))?;
        scenario.current_scenario = Some(current.clone());
        scenario.updated_at = Utc::now();
        Ok(scenario.clone())
    }
}
