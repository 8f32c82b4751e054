//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::{
    Activity, ActivityChanges, ActivityId, LiveState, NewActivity, NewStand, NewTeam, NewUser,
    PincodeKind, Scenario, Stand, StandChanges, StandId, Team, TeamChanges, TeamId, User,
    UserChanges, UserId,
};
use crate::error::DomainError;

/// Repository for back-office users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by the SHA-256 hash of their API key
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Replace the stored API key hash (a new login invalidates the old key)
    async fn update_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError>;

    async fn update(&self, id: &UserId, changes: &UserChanges) -> Result<User, DomainError>;

    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

/// Repository for activities
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError>;

    /// All activities, oldest first
    async fn find_all(&self) -> Result<Vec<Activity>, DomainError>;

    async fn find_by_participant_code(&self, code: &str) -> Result<Option<Activity>, DomainError>;

    async fn find_by_animator_code(&self, code: &str) -> Result<Option<Activity>, DomainError>;

    /// Check whether a pincode of the given kind is already taken
    async fn code_exists(&self, kind: PincodeKind, code: &str) -> Result<bool, DomainError>;

    async fn create(&self, activity: &NewActivity) -> Result<Activity, DomainError>;

    async fn update(
        &self,
        id: &ActivityId,
        changes: &ActivityChanges,
    ) -> Result<Activity, DomainError>;

    /// Persist the live progression columns only
    async fn update_live_state(
        &self,
        id: &ActivityId,
        live: &LiveState,
    ) -> Result<Activity, DomainError>;

    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError>;
}

/// Repository for teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Team>, DomainError>;

    /// Teams of an activity in creation order (ascending id)
    async fn find_by_activity(&self, activity_id: &ActivityId) -> Result<Vec<Team>, DomainError>;

    async fn create(&self, team: &NewTeam) -> Result<Team, DomainError>;

    async fn update(&self, id: &TeamId, changes: &TeamChanges) -> Result<Team, DomainError>;

    async fn delete(&self, id: &TeamId) -> Result<(), DomainError>;
}

/// Repository for stands
#[async_trait]
pub trait StandRepository: Send + Sync {
    async fn find_by_id(&self, id: &StandId) -> Result<Option<Stand>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Stand>, DomainError>;

    /// Stands of an activity in creation order (ascending id)
    async fn find_by_activity(&self, activity_id: &ActivityId)
        -> Result<Vec<Stand>, DomainError>;

    async fn create(&self, stand: &NewStand) -> Result<Stand, DomainError>;

    async fn update(&self, id: &StandId, changes: &StandChanges) -> Result<Stand, DomainError>;

    async fn delete(&self, id: &StandId) -> Result<(), DomainError>;
}

/// Repository for generated scenarios (one per activity)
#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    async fn find_by_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Option<Scenario>, DomainError>;

    /// Store a freshly generated schedule, creating the row if needed.
    /// Any edited working copy is cleared.
    async fn save_base(
        &self,
        activity_id: &ActivityId,
        base: &Value,
    ) -> Result<Scenario, DomainError>;

    /// Replace the editable working copy
    async fn update_current(
        &self,
        activity_id: &ActivityId,
        current: &Value,
    ) -> Result<Scenario, DomainError>;
}
