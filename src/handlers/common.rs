use axum::{
    extract::{FromRequest, FromRequestParts, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Success envelope: `{"success": true, "data": ...}`.
/// OpenAPI bodies document the `data` payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// JSON body extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections use the error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Trimmed value of a required field, rejecting missing or blank input
pub fn validate_required(field: &str, value: Option<String>) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

/// Like [`validate_required`] but absence is fine; only a blank value is rejected
pub fn validate_optional(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => validate_required(field, Some(v))
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must not be empty", field))),
    }
}

pub fn validate_max_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub schema_ready: bool,
}

/// Liveness check that also pings the database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database reachable", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HealthResponse>>> {
    state.pool.ping().await?;

    Ok(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        schema_ready: state.schema_ready(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_trimmed() {
        assert_eq!(
            validate_required("title", Some("  Demo ".into())).unwrap(),
            "Demo"
        );
    }

    #[test]
    fn missing_or_blank_required_field_is_rejected() {
        let err = validate_required("description", None).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: description is required");

        assert!(validate_required("description", Some("   ".into())).is_err());
    }

    #[test]
    fn optional_field_rejects_only_blank() {
        assert_eq!(validate_optional("title", None).unwrap(), None);
        assert_eq!(
            validate_optional("title", Some("x".into())).unwrap(),
            Some("x".to_string())
        );

        let err = validate_optional("title", Some("".into())).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: title must not be empty");
    }

    #[test]
    fn max_len_counts_characters() {
        assert!(validate_max_len("category", "ééé", 3).is_ok());
        assert!(validate_max_len("category", "abcd", 3).is_err());
    }
}
