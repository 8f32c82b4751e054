//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod activities;
pub mod scenarios;
pub mod stands;
pub mod teams;
pub mod users;

pub use activities::{
    activity_by_pincode, complete_activity, create_activity, delete_activity, get_activity,
    list_activities, pause_activity, resume_activity, rotate_activity, settle_activity,
    start_activity, update_activity,
};
pub use scenarios::{generate_scenario, get_scenario, update_current_scenario};
pub use stands::{activity_stands, create_stand, delete_stand, get_stand, list_stands, update_stand};
pub use teams::{activity_teams, create_team, delete_team, get_team, list_teams, update_team};
pub use users::{create_user, delete_user, get_user, list_users, login, me, update_user};
