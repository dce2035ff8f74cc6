use actix_web::{HttpRequest, web};
use common::{AppError, Role, User};

use crate::error::HttpApiError;
use crate::session;
use crate::state::AppState;

/// Session gate for role-protected routes.
///
/// Missing cookie -> 401, bad signature / expiry -> 400 with distinct
/// messages, unknown user -> 404, live role mismatch -> 403. The role always
/// comes from the freshly loaded record, so a still-valid token stops granting
/// access the moment the stored role changes.
pub async fn authenticate(req: &HttpRequest, expected: Role) -> Result<User, HttpApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AppError::Internal)?;

    let cookie = req
        .cookie(session::cookie_name(expected))
        .ok_or_else(|| AppError::Unauthenticated(format!("{expected} Not Authenticated!")))?;

    let claims = auth::verify(&state.jwt, cookie.value())?;

    let user = db::find_user_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User Not Found!".to_string()))?;

    if user.role != expected {
        return Err(AppError::Forbidden(format!(
            "{} not authorized for this resource!",
            user.role
        ))
        .into());
    }

    Ok(user)
}
