pub mod common;
pub mod profile;
pub mod project;

pub use common::{
    health, validate_max_len, validate_optional, validate_required, ApiJson, ApiPath,
    ApiResponse, HealthResponse,
};
pub use profile::{get_profile, update_profile, ProfileResponse, UpdateProfileRequest};
pub use project::{
    create_project, delete_project, get_project, list_projects, update_project,
    CreateProjectRequest, ProjectResponse, UpdateProjectRequest,
};
