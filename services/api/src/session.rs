use actix_web::HttpResponse;
use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use common::{AppError, Role, User};

use crate::error::HttpApiError;
use crate::state::AppState;

pub const ADMIN_COOKIE: &str = "adminToken";
pub const PATIENT_COOKIE: &str = "patientToken";

/// Two fixed session cookie names: admins get their own, patients and doctors
/// share the other.
pub fn cookie_name(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_COOKIE,
        Role::Patient | Role::Doctor => PATIENT_COOKIE,
    }
}

pub fn session_cookie(
    role: Role,
    token: String,
    expire_days: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build(cookie_name(role), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .expires(OffsetDateTime::now_utc() + Duration::days(expire_days))
        .finish()
}

/// Logout cookie: same name, empty value, expiry at the epoch. The token
/// itself stays verifiable until its own exp; there is no revocation list.
pub fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}

/// Issues a session token for the user and binds it to the response as the
/// role-named cookie, alongside the standard success envelope.
pub fn respond_with_token(
    state: &AppState,
    user: &User,
    message: &str,
) -> Result<HttpResponse, HttpApiError> {
    let token = auth::sign_session(&state.jwt, user.id, state.token_ttl).map_err(|e| {
        tracing::error!(error = %e, "token signing failed");
        AppError::Internal
    })?;
    let cookie = session_cookie(
        user.role,
        token.clone(),
        state.cookie_expire_days,
        state.cookie_secure,
    );
    Ok(HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "success": true,
        "message": message,
        "user": user,
        "token": token,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admins_and_non_admins_use_distinct_cookie_names() {
        assert_eq!(cookie_name(Role::Admin), "adminToken");
        assert_eq!(cookie_name(Role::Patient), "patientToken");
        assert_eq!(cookie_name(Role::Doctor), "patientToken");
    }

    #[test]
    fn session_cookie_carries_the_transport_attributes() {
        let cookie = session_cookie(Role::Patient, "tok".into(), 7, true);
        assert_eq!(cookie.name(), "patientToken");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        let expires = cookie.expires_datetime().unwrap();
        assert!(expires > OffsetDateTime::now_utc() + Duration::days(6));
    }

    #[test]
    fn logout_cookie_is_empty_and_dead_on_arrival() {
        let cookie = expired_cookie(ADMIN_COOKIE, false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }
}
