use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpApiError {
    #[error("{0}")]
    App(#[from] AppError),
    #[error("db error")]
    Db(#[from] db::DbError),
    #[error("auth error")]
    Token(#[from] auth::AuthError),
}

impl HttpApiError {
    /// Single translation point: every error the flows can produce becomes a
    /// status plus a client-safe message. Driver internals never leave here.
    fn translate(&self) -> (StatusCode, String) {
        match self {
            Self::App(err) => {
                let status = match err {
                    AppError::Validation(_)
                    | AppError::Conflict(_)
                    | AppError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
                    AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                    AppError::Forbidden(_) => StatusCode::FORBIDDEN,
                    AppError::NotFound(_) => StatusCode::NOT_FOUND,
                    AppError::Upstream(_) | AppError::Internal => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.to_string())
            }
            Self::Db(err) => {
                if let Some(constraint) = err.unique_violation() {
                    // lost the check-then-act race; same outcome as the
                    // application-level duplicate check
                    let field = if constraint.contains("email") {
                        "email"
                    } else {
                        "key"
                    };
                    (StatusCode::BAD_REQUEST, format!("Duplicate {field} Entered"))
                } else {
                    tracing::error!(error = %err, "database failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            }
            Self::Token(auth::AuthError::ExpiredToken) => (
                StatusCode::BAD_REQUEST,
                "Json Web Token is expired, Try Again!".to_string(),
            ),
            Self::Token(auth::AuthError::InvalidToken) => (
                StatusCode::BAD_REQUEST,
                "Json Web Token is invalid, Try Again!".to_string(),
            ),
        }
    }
}

impl ResponseError for HttpApiError {
    fn status_code(&self) -> StatusCode {
        self.translate().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, message) = self.translate();
        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_the_documented_status_codes() {
        let cases = [
            (AppError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (
                AppError::InvalidCredentials("i".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthenticated("u".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (
                AppError::Upstream("s".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(HttpApiError::App(err).status_code(), status);
        }
    }

    #[test]
    fn token_failures_render_distinct_messages() {
        let expired = HttpApiError::Token(auth::AuthError::ExpiredToken).translate();
        let invalid = HttpApiError::Token(auth::AuthError::InvalidToken).translate();
        assert_eq!(expired.0, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.0, StatusCode::BAD_REQUEST);
        assert_ne!(expired.1, invalid.1);
    }
}
