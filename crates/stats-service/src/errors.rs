//! Service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Database
//! error detail is logged server-side and never returned to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Service error type.
///
/// Maps to HTTP status codes:
/// - Database, Internal: 500 Internal Server Error
/// - NotFound: 404 Not Found
/// - Conflict: 409 Conflict
/// - BadRequest: 400 Bad Request
/// - Unauthorized: 401 Unauthorized
/// - Forbidden: 403 Forbidden
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal,
}

impl StatsError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StatsError::Database(_) | StatsError::Internal => 500,
            StatsError::NotFound(_) => 404,
            StatsError::Conflict(_) => 409,
            StatsError::BadRequest(_) => 400,
            StatsError::Unauthorized(_) => 401,
            StatsError::Forbidden(_) => 403,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            StatsError::Database(err) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "stats.database", error = %err, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            StatsError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", resource.clone())
            }
            StatsError::Conflict(reason) => (StatusCode::CONFLICT, "CONFLICT", reason.clone()),
            StatsError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            StatsError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", reason.clone())
            }
            StatsError::Forbidden(reason) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", reason.clone())
            }
            StatsError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Convert sqlx errors to StatsError.
///
/// Unique and foreign-key violations become 409 Conflict so handlers can
/// surface duplicate (player, season, grade) rows and protected deletes
/// without string-matching in every repository.
impl From<sqlx::Error> for StatsError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StatsError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StatsError::Conflict("Record already exists".to_string())
                } else if db_err.is_foreign_key_violation() {
                    StatsError::Conflict("Record is referenced by other records".to_string())
                } else {
                    StatsError::Database(err.to_string())
                }
            }
            _ => StatsError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display_database_error() {
        let error = StatsError::Database("connection failed".to_string());
        assert_eq!(format!("{}", error), "Database error: connection failed");
    }

    #[test]
    fn test_display_not_found() {
        let error = StatsError::NotFound("player".to_string());
        assert_eq!(format!("{}", error), "Not found: player");
    }

    #[test]
    fn test_display_conflict() {
        let error = StatsError::Conflict("statistic already exists".to_string());
        assert_eq!(format!("{}", error), "Conflict: statistic already exists");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StatsError::Database("test".to_string()).status_code(), 500);
        assert_eq!(StatsError::NotFound("test".to_string()).status_code(), 404);
        assert_eq!(StatsError::Conflict("test".to_string()).status_code(), 409);
        assert_eq!(StatsError::BadRequest("test".to_string()).status_code(), 400);
        assert_eq!(
            StatsError::Unauthorized("test".to_string()).status_code(),
            401
        );
        assert_eq!(StatsError::Forbidden("test".to_string()).status_code(), 403);
        assert_eq!(StatsError::Internal.status_code(), 500);
    }

    #[tokio::test]
    async fn test_into_response_database_error() {
        let error = StatsError::Database("connection failed".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "DATABASE_ERROR");
        assert_eq!(
            body_json["error"]["message"],
            "An internal database error occurred"
        );
    }

    #[tokio::test]
    async fn test_into_response_not_found() {
        let error = StatsError::NotFound("Player not found".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "NOT_FOUND");
        assert_eq!(body_json["error"]["message"], "Player not found");
    }

    #[tokio::test]
    async fn test_into_response_conflict() {
        let error = StatsError::Conflict("Statistic already exists".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "CONFLICT");
        assert_eq!(body_json["error"]["message"], "Statistic already exists");
    }

    #[tokio::test]
    async fn test_into_response_bad_request() {
        let error = StatsError::BadRequest("Invalid high score".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "BAD_REQUEST");
        assert_eq!(body_json["error"]["message"], "Invalid high score");
    }

    #[tokio::test]
    async fn test_into_response_unauthorized() {
        let error = StatsError::Unauthorized("Missing Authorization header".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_into_response_forbidden() {
        let error = StatsError::Forbidden("Superuser required".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "FORBIDDEN");
        assert_eq!(body_json["error"]["message"], "Superuser required");
    }

    #[tokio::test]
    async fn test_into_response_internal() {
        let error = StatsError::Internal;
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body_json["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error = StatsError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, StatsError::NotFound(_)));
    }
}
