//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod activity_repo;
pub mod scenario_repo;
pub mod stand_repo;
pub mod team_repo;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use activity_repo::PostgresActivityRepository;
pub use scenario_repo::PostgresScenarioRepository;
pub use stand_repo::PostgresStandRepository;
pub use team_repo::PostgresTeamRepository;
pub use user_repo::PostgresUserRepository;
