//! API key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::app::hash_api_key;
use crate::domain::entities::{Role, User, ORGANIZER_ROLES};
use crate::error::AppError;
use crate::AppState;

/// Extract the API key from the Authorization header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

/// Authentication middleware
///
/// Validates the API key and injects the User into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = extract_api_key(&request).ok_or(AppError::Unauthorized)?;

    let user = state
        .user_service
        .find_by_api_key(&hash_api_key(api_key))
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Check that the authenticated user holds one of `roles`
pub fn authorize(user: Option<&User>, roles: &[Role]) -> Result<(), AppError> {
    let user = user.ok_or(AppError::Unauthorized)?;
    if user.has_any_role(roles) {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, "Insufficient role");
        Err(AppError::Forbidden)
    }
}

/// Requires an admin or game master. Runs after `auth_middleware`.
pub async fn organizer_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    authorize(request.extensions().get::<User>(), ORGANIZER_ROLES)?;
    Ok(next.run(request).await)
}

/// Requires an admin. Runs after `auth_middleware`.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    authorize(request.extensions().get::<User>(), &[Role::Admin])?;
    Ok(next.run(request).await)
}
