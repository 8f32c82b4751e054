//! User handlers
//!
//! Login for organizers and admin-only account management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Role, User, UserId};
use crate::error::AppError;
use crate::AppState;

/// Credentials posted to /login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Send as `Authorization: Bearer <api_key>`; shown once
    pub api_key: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
    pub roles: Vec<Role>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            login: user.login,
            roles: user.roles,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub login: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Role>>,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (user, api_key) = state
        .user_service
        .login(&request.login, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        api_key,
        user: user.into(),
    }))
}

/// GET /me
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get(&UserId(id)).await?;
    Ok(Json(user.into()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .user_service
        .create(&request.login, &request.password, request.roles)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .user_service
        .update(
            &UserId(id),
            request.login.as_deref(),
            request.password.as_deref(),
            request.roles,
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /users/:id
///
/// Admins cannot delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if current.id == UserId(id) {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    state.user_service.delete(&UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_user;

    #[test]
    fn parse_login_request() {
        let json = r#"{"login": "gm", "password": "secret"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.login, "gm");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn parse_create_user_request_defaults_roles() {
        let json = r#"{"login": "gm", "password": "secret"}"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert!(request.roles.is_empty());

        let json = r#"{"login": "gm", "password": "secret", "roles": ["ROLE_ADMIN"]}"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.roles, vec![Role::Admin]);
    }

    #[test]
    fn parse_create_user_request_rejects_unknown_role() {
        let json = r#"{"login": "gm", "password": "secret", "roles": ["ROLE_KING"]}"#;
        let result: Result<CreateUserRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn user_response_hides_secrets() {
        let mut user = test_user(Role::Gamemaster);
        user.api_key_hash = Some("deadbeef".to_string());

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(json.contains("ROLE_GAMEMASTER"));
        assert!(json.contains("createdAt"));
        assert!(!json.contains("deadbeef"));
        assert!(!json.contains("password"));
    }
}
