use anyhow::Context;
use tracing_subscriber::EnvFilter;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use portfolio_api::config::Config;
use portfolio_api::handlers::{
    CreateProjectRequest, HealthResponse, ProfileResponse, ProjectResponse, UpdateProfileRequest,
    UpdateProjectRequest,
};
use portfolio_api::models::TagsInput;
use portfolio_api::state::AppState;
use portfolio_api::{build_router, handlers};

/// Security scheme for the admin bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::common::health,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::create_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::profile::get_profile,
        handlers::profile::update_profile,
    ),
    components(schemas(
        HealthResponse,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectResponse,
        TagsInput,
        UpdateProfileRequest,
        ProfileResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Projects", description = "Portfolio project management endpoints"),
        (name = "Profile", description = "Profile image endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let addr = config.server_addr();
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set; mutating routes are open");
    }

    // Schema is prepared on the first data request
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
