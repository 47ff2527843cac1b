//! Error conversions
//!
//! Storage error codes shared by the domain crates, and the HTTP rendering
//! of [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

/// PostgreSQL error codes the domain crates react to
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
pub mod pg_codes {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const EXCLUSION_VIOLATION: &str = "23P01";

    /// SQLSTATE reported by the server, if the error came from a statement
    pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
            _ => None,
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
            "retryable": self.is_retryable(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_problem_status_matches_kind() {
        let response = AppError::conflict("Overlapping reservation")
            .with_action("Query availability")
            .into_response();
        assert_eq!(response.status().as_u16(), 409);

        let response = AppError::gateway_timeout("slow").into_response();
        assert_eq!(response.status().as_u16(), 504);
    }
}
