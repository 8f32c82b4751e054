//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports and the scheduler.

pub mod activity_service;
pub mod pincode;
pub mod roster_service;
pub mod scenario_service;
pub mod user_service;

pub use activity_service::{ActivityService, LiveAction, LiveSnapshot, PincodeAccess};
pub use roster_service::RosterService;
pub use scenario_service::{GeneratedScenario, ScenarioService, TimingSummary};
pub use user_service::{hash_api_key, UserService};
