use axum_test::TestServer;
use portfolio_api::build_router;
use portfolio_api::config::Config;
use portfolio_api::state::AppState;
use sea_orm::DatabaseConnection;

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Test configuration: a private in-memory SQLite database per test
pub fn test_config() -> Config {
    Config {
        database_url: std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite::memory:".to_string()),
        // In-memory SQLite lives as long as its single connection
        db_max_connections: 1,
        db_min_connections: 1,
        admin_token: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        log_json: false,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with the admin gate open
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application that requires [`ADMIN_TOKEN`] on mutating routes
    pub async fn with_admin_token() -> Self {
        Self::with_config(Config {
            admin_token: Some(ADMIN_TOKEN.to_string()),
            ..test_config()
        })
        .await
    }

    pub async fn with_config(config: Config) -> Self {
        let state = AppState::new(config)
            .await
            .expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }

    /// Connection with the schema bootstrapped
    pub async fn db(&self) -> &DatabaseConnection {
        self.state.db().await.expect("Failed to prepare schema")
    }
}

pub fn admin_header() -> String {
    format!("Bearer {}", ADMIN_TOKEN)
}
