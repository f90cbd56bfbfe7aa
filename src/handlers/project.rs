use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{
    validate_max_len, validate_optional, validate_required, ApiJson, ApiPath, ApiResponse,
};
use crate::models::{
    non_blank, normalize_list, CreateProject, Project, TagsInput, UpdateProject,
    CATEGORY_MAX_LEN, TITLE_MAX_LEN,
};
use crate::repositories::{ProjectRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    /// Alias for `title`
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub video: Option<String>,
    pub color: Option<String>,
}

/// Any subset of project fields. Omitted or null fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    /// Alias for `title`
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub video: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub video: Option<String>,
    /// Derived from `video` when it points at YouTube
    pub video_thumbnail: Option<String>,
    pub color: String,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            video_thumbnail: p.video_thumbnail(),
            id: p.id,
            title: p.title,
            description: p.description,
            category: p.category,
            tags: p.tags,
            image: p.image,
            images: p.images,
            video: p.video,
            color: p.color,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// `title` wins over `name` unless it is blank and `name` is given
fn pick_title(title: Option<String>, name: Option<String>) -> Option<String> {
    match (title, name) {
        (Some(title), _) if !title.trim().is_empty() => Some(title),
        (title, None) => title,
        (_, name) => name,
    }
}

impl TryFrom<CreateProjectRequest> for CreateProject {
    type Error = crate::error::AppError;

    fn try_from(payload: CreateProjectRequest) -> AppResult<Self> {
        let title = validate_required("title", pick_title(payload.title, payload.name))?;
        validate_max_len("title", &title, TITLE_MAX_LEN)?;
        let description = validate_required("description", payload.description)?;
        let category = validate_required("category", payload.category)?;
        validate_max_len("category", &category, CATEGORY_MAX_LEN)?;

        Ok(CreateProject {
            title,
            description,
            category,
            tags: payload.tags.map(TagsInput::into_tags).unwrap_or_default(),
            image: non_blank(payload.image),
            images: payload.images.map(normalize_list).unwrap_or_default(),
            video: non_blank(payload.video),
            color: non_blank(payload.color),
        })
    }
}

impl TryFrom<UpdateProjectRequest> for UpdateProject {
    type Error = crate::error::AppError;

    fn try_from(payload: UpdateProjectRequest) -> AppResult<Self> {
        let title = validate_optional("title", pick_title(payload.title, payload.name))?;
        if let Some(title) = &title {
            validate_max_len("title", title, TITLE_MAX_LEN)?;
        }
        let category = validate_optional("category", payload.category)?;
        if let Some(category) = &category {
            validate_max_len("category", category, CATEGORY_MAX_LEN)?;
        }

        Ok(UpdateProject {
            title,
            description: validate_optional("description", payload.description)?,
            category,
            tags: payload.tags.map(TagsInput::into_tags),
            image: non_blank(payload.image),
            images: payload.images.map(normalize_list),
            video: non_blank(payload.video),
            color: non_blank(payload.color),
        })
    }
}

// ============ Handlers ============

/// List all projects, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "List of projects", body = [ProjectResponse]),
        (status = 500, description = "Database error")
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProjectResponse>>>> {
    let db = state.db().await?;
    let projects = ProjectRepository::list(db).await?;

    Ok(ApiResponse::ok(
        projects.into_iter().map(|p| p.into()).collect(),
    ))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<ProjectResponse>>> {
    let db = state.db().await?;
    let project = ProjectRepository::find_by_id(db, id).await?;
    Ok(ApiResponse::ok(project.into()))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectResponse>>)> {
    let create_project = CreateProject::try_from(payload)?;

    let db = state.db().await?;
    let project = ProjectRepository::create(db, &create_project).await?;
    tracing::info!(id = project.id, category = %project.category, "Project created");

    Ok((StatusCode::CREATED, ApiResponse::ok(project.into())))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateProjectRequest>,
) -> AppResult<Json<ApiResponse<ProjectResponse>>> {
    let update_project = UpdateProject::try_from(payload)?;

    let db = state.db().await?;
    let project = ProjectRepository::update(db, id, &update_project).await?;
    tracing::info!(id = project.id, "Project updated");

    Ok(ApiResponse::ok(project.into()))
}

/// Delete a project, echoing the removed row
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<ProjectResponse>>> {
    let db = state.db().await?;
    let project = ProjectRepository::delete(db, id).await?;
    tracing::info!(id, "Project deleted");

    Ok(ApiResponse::ok(project.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn valid_create() -> CreateProjectRequest {
        CreateProjectRequest {
            title: Some("Demo".into()),
            description: Some("x".into()),
            category: Some("coding".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_applies_defaults() {
        let input = CreateProject::try_from(valid_create()).unwrap();

        assert_eq!(input.title, "Demo");
        assert!(input.tags.is_empty());
        assert!(input.images.is_empty());
        assert_eq!(input.color, None);
    }

    #[test]
    fn create_accepts_name_alias() {
        let payload = CreateProjectRequest {
            title: None,
            name: Some("Logo Design".into()),
            ..valid_create()
        };

        let input = CreateProject::try_from(payload).unwrap();
        assert_eq!(input.title, "Logo Design");
    }

    #[test]
    fn title_takes_precedence_over_name() {
        assert_eq!(
            pick_title(Some("Title".into()), Some("Name".into())),
            Some("Title".to_string())
        );
        assert_eq!(
            pick_title(Some(" ".into()), Some("Name".into())),
            Some("Name".to_string())
        );
        assert_eq!(pick_title(Some("".into()), None), Some("".to_string()));
    }

    #[test]
    fn create_requires_description() {
        let payload = CreateProjectRequest {
            description: None,
            ..valid_create()
        };

        let err = CreateProject::try_from(payload).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("description")));
    }

    #[test]
    fn create_rejects_long_category() {
        let payload = CreateProjectRequest {
            category: Some("c".repeat(CATEGORY_MAX_LEN + 1)),
            ..valid_create()
        };

        assert!(CreateProject::try_from(payload).is_err());
    }

    #[test]
    fn create_drops_blank_media() {
        let payload = CreateProjectRequest {
            image: Some("".into()),
            video: Some("  ".into()),
            images: Some(vec!["https://a/1.png".into(), " ".into()]),
            ..valid_create()
        };

        let input = CreateProject::try_from(payload).unwrap();
        assert_eq!(input.image, None);
        assert_eq!(input.video, None);
        assert_eq!(input.images, vec!["https://a/1.png"]);
    }

    #[test]
    fn update_keeps_omitted_fields_absent() {
        let payload = UpdateProjectRequest {
            color: Some("red".into()),
            ..Default::default()
        };

        let update = UpdateProject::try_from(payload).unwrap();
        assert_eq!(update.color.as_deref(), Some("red"));
        assert!(update.title.is_none());
        assert!(update.tags.is_none());
        assert!(update.images.is_none());
    }

    #[test]
    fn update_rejects_blank_required_field() {
        let payload = UpdateProjectRequest {
            description: Some("".into()),
            ..Default::default()
        };

        assert!(UpdateProject::try_from(payload).is_err());
    }
}
