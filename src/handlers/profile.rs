use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{ApiJson, ApiResponse};
use crate::models::{non_blank, Profile};
use crate::repositories::ProfileRepository;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Image URL; null or blank clears it
    pub profile_image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile_image: Option<String>,
    #[schema(value_type = Option<String>)]
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<time::OffsetDateTime>,
}

impl From<Option<Profile>> for ProfileResponse {
    fn from(profile: Option<Profile>) -> Self {
        match profile {
            Some(p) => Self {
                profile_image: p.profile_image,
                updated_at: Some(p.updated_at),
            },
            None => Self {
                profile_image: None,
                updated_at: None,
            },
        }
    }
}

/// Get the profile image
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 500, description = "Database error")
    ),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    let db = state.db().await?;
    let profile = ProfileRepository::get(db).await?;
    Ok(ApiResponse::ok(profile.into()))
}

/// Set the profile image
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    let db = state.db().await?;
    let profile = ProfileRepository::set(db, non_blank(payload.profile_image)).await?;
    tracing::info!(has_image = profile.profile_image.is_some(), "Profile updated");

    Ok(ApiResponse::ok(Some(profile).into()))
}
