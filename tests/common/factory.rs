use portfolio_api::models::{CreateProject, Project};
use portfolio_api::repositories::ProjectRepository;

use super::TestApp;

/// Factory for creating test data
pub struct Factory<'a> {
    app: &'a TestApp,
}

impl<'a> Factory<'a> {
    pub fn new(app: &'a TestApp) -> Self {
        Self { app }
    }

    /// Create a test project
    pub async fn create_project(&self) -> Project {
        self.create_project_with_title("Test Project").await
    }

    /// Create a test project with specific title
    pub async fn create_project_with_title(&self, title: &str) -> Project {
        let input = CreateProject {
            title: title.to_string(),
            description: "Test project description".to_string(),
            category: "coding".to_string(),
            tags: vec!["Rust".to_string(), "Axum".to_string()],
            image: Some("https://example.com/cover.png".to_string()),
            images: vec![
                "https://example.com/1.png".to_string(),
                "https://example.com/2.png".to_string(),
            ],
            video: None,
            color: None,
        };

        ProjectRepository::create(self.app.db().await, &input)
            .await
            .unwrap()
    }
}
