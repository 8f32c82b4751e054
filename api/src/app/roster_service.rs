//! Roster service
//!
//! Teams and stands of activities.

use std::sync::Arc;

use crate::domain::entities::{
    validate_capacity, validate_name, ActivityId, NewStand, NewTeam, Stand, StandChanges,
    StandId, Team, TeamChanges, TeamId, UserId,
};
use crate::domain::ports::{ActivityRepository, StandRepository, TeamRepository};
use crate::error::AppError;

/// Capacity of a stand when none is given
pub const DEFAULT_STAND_CAPACITY: u32 = 1;

/// Service for managing teams and stands
pub struct RosterService<TR, SR, AR>
where
    TR: TeamRepository,
    SR: StandRepository,
    AR: ActivityRepository,
{
    teams: Arc<TR>,
    stands: Arc<SR>,
    activities: Arc<AR>,
}

impl<TR, SR, AR> RosterService<TR, SR, AR>
where
    TR: TeamRepository,
    SR: StandRepository,
    AR: ActivityRepository,
{
    pub fn new(teams: Arc<TR>, stands: Arc<SR>, activities: Arc<AR>) -> Self {
        Self {
            teams,
            stands,
            activities,
        }
    }

    async fn ensure_activity(&self, id: &ActivityId) -> Result<(), AppError> {
        match self.activities.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Activity {} not found", id))),
        }
    }

    // Teams

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        Ok(self.teams.find_all().await?)
    }

    pub async fn get_team(&self, id: &TeamId) -> Result<Team, AppError> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    /// Teams of an activity in creation order
    pub async fn teams_of(&self, activity_id: &ActivityId) -> Result<Vec<Team>, AppError> {
        self.ensure_activity(activity_id).await?;
        Ok(self.teams.find_by_activity(activity_id).await?)
    }

    pub async fn create_team(
        &self,
        owner: UserId,
        name: &str,
        activity_id: Option<ActivityId>,
    ) -> Result<Team, AppError> {
        validate_name(name).map_err(AppError::BadRequest)?;
        if let Some(activity_id) = &activity_id {
            self.ensure_activity(activity_id).await?;
        }

        let team = self
            .teams
            .create(&NewTeam {
                name: name.trim().to_string(),
                activity_id,
                user_id: owner,
            })
            .await?;

        tracing::debug!(team_id = %team.id, "Team created");
        Ok(team)
    }

    pub async fn update_team(&self, id: &TeamId, changes: TeamChanges) -> Result<Team, AppError> {
        self.get_team(id).await?;

        let mut changes = changes;
        if let Some(name) = &changes.name {
            validate_name(name).map_err(AppError::BadRequest)?;
            changes.name = Some(name.trim().to_string());
        }
        if let Some(activity_id) = &changes.activity_id {
            self.ensure_activity(activity_id).await?;
        }

        Ok(self.teams.update(id, &changes).await?)
    }

    pub async fn delete_team(&self, id: &TeamId) -> Result<(), AppError> {
        self.teams.delete(id).await?;
        Ok(())
    }

    // Stands

    pub async fn list_stands(&self) -> Result<Vec<Stand>, AppError> {
        Ok(self.stands.find_all().await?)
    }

    pub async fn get_stand(&self, id: &StandId) -> Result<Stand, AppError> {
        self.stands
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stand {} not found", id)))
    }

    /// Stands of an activity in creation order
    pub async fn stands_of(&self, activity_id: &ActivityId) -> Result<Vec<Stand>, AppError> {
        self.ensure_activity(activity_id).await?;
        Ok(self.stands.find_by_activity(activity_id).await?)
    }

    pub async fn create_stand(
        &self,
        owner: UserId,
        name: &str,
        capacity: Option<u32>,
        activity_id: Option<ActivityId>,
    ) -> Result<Stand, AppError> {
        validate_name(name).map_err(AppError::BadRequest)?;
        let capacity = capacity.unwrap_or(DEFAULT_STAND_CAPACITY);
        validate_capacity(capacity).map_err(AppError::BadRequest)?;
        if let Some(activity_id) = &activity_id {
            self.ensure_activity(activity_id).await?;
        }

        let stand = self
            .stands
            .create(&NewStand {
                name: name.trim().to_string(),
                capacity,
                activity_id,
                user_id: owner,
            })
            .await?;

        tracing::debug!(stand_id = %stand.id, capacity = stand.capacity, "Stand created");
        Ok(stand)
    }

    pub async fn update_stand(
        &self,
        id: &StandId,
        changes: StandChanges,
    ) -> Result<Stand, AppError> {
        self.get_stand(id).await?;

        let mut changes = changes;
        if let Some(name) = &changes.name {
            validate_name(name).map_err(AppError::BadRequest)?;
            changes.name = Some(name.trim().to_string());
        }
        if let Some(capacity) = changes.capacity {
            validate_capacity(capacity).map_err(AppError::BadRequest)?;
        }
        if let Some(activity_id) = &changes.activity_id {
            self.ensure_activity(activity_id).await?;
        }

        Ok(self.stands.update(id, &changes).await?)
    }

    pub async fn delete_stand(&self, id: &StandId) -> Result<(), AppError> {
        self.stands.delete(id).await?;
        Ok(())
    }
}
