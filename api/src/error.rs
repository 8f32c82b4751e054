//! Unified error types for the Stand Rotation API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `ScheduleError`: Rotation scheduler outcomes (validation failures and invariant violations)
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rotation scheduler errors
///
/// Everything except `InvariantViolation` is a property of the input that the
/// caller can fix by changing the team or stand configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("No teams found for this activity")]
    EmptyTeams,

    #[error("No stands found for this activity")]
    EmptyStands,

    #[error(
        "All stands must host the same number of teams: stand '{stand}' has capacity {found}, expected {expected}"
    )]
    CapacityMismatch {
        stand: String,
        expected: u32,
        found: u32,
    },

    #[error(
        "The number of teams ({teams}) must be less than or equal to the total number of stand slots ({slots})"
    )]
    TooManyTeams { teams: usize, slots: u64 },

    #[error(
        "The total number of competitive slots ({slots}) must be divisible by the number of teams ({teams})"
    )]
    IndivisibleCompetitiveSlots { slots: u64, teams: usize },

    #[error("Scheduler invariant violated: {0}")]
    InvariantViolation(String),
}

impl ScheduleError {
    /// True when the error signals a scheduler bug rather than bad input
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ScheduleError::InvariantViolation(_))
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut success = None;
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, "Already exists", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "Forbidden", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Schedule(e) if e.is_invariant_violation() => {
                tracing::error!(error = %e, "Scheduler invariant violation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Schedule(e) => {
                success = Some(false);
                (
                    StatusCode::BAD_REQUEST,
                    "Unable to generate the scenario",
                    Some(e.to_string()),
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            success,
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
