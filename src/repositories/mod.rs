pub mod profile;
pub mod project;
pub mod schema;

pub use profile::ProfileRepository;
pub use project::ProjectRepository;
pub use schema::ensure_schema;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;

/// Base repository trait for common CRUD operations
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<T>;

    /// Delete entity by ID, returning what was removed
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<T>;

    /// List all entities, newest first
    async fn list(db: &DatabaseConnection) -> AppResult<Vec<T>>;

    /// Count total entities
    async fn count(db: &DatabaseConnection) -> AppResult<u64>;
}
