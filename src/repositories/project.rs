use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateProject, Project, UpdateProject, DEFAULT_COLOR};
use crate::repositories::Repository;

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(model.into())
    }

    /// Single `DELETE ... RETURNING`, so the echoed row is exactly what was removed
    async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<Project> {
        ProjectEntity::delete_many()
            .filter(Column::Id.eq(id))
            .exec_with_returning(db)
            .await?
            .into_iter()
            .next()
            .map(Project::from)
            .ok_or_else(|| AppError::NotFound("Project".to_string()))
    }

    async fn list(db: &DatabaseConnection) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = ProjectEntity::find().count(db).await?;
        Ok(count)
    }
}

impl ProjectRepository {
    /// Create a new project
    pub async fn create(db: &DatabaseConnection, input: &CreateProject) -> AppResult<Project> {
        let now = OffsetDateTime::now_utc();

        let model = ActiveModel {
            id: NotSet,
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            category: Set(input.category.clone()),
            tags: Set(serde_json::to_value(&input.tags)?),
            image: Set(input.image.clone()),
            images: Set(serde_json::to_value(&input.images)?),
            video: Set(input.video.clone()),
            color: Set(input
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Coalesce update in a single `UPDATE ... RETURNING` statement.
    /// Only fields present in `input` are written; `updated_at` always is.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let mut query = ProjectEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(OffsetDateTime::now_utc()))
            .filter(Column::Id.eq(id));

        if let Some(title) = &input.title {
            query = query.col_expr(Column::Title, Expr::value(title.clone()));
        }
        if let Some(description) = &input.description {
            query = query.col_expr(Column::Description, Expr::value(description.clone()));
        }
        if let Some(category) = &input.category {
            query = query.col_expr(Column::Category, Expr::value(category.clone()));
        }
        if let Some(tags) = &input.tags {
            query = query.col_expr(Column::Tags, Expr::value(serde_json::to_value(tags)?));
        }
        if let Some(image) = &input.image {
            query = query.col_expr(Column::Image, Expr::value(image.clone()));
        }
        if let Some(images) = &input.images {
            query = query.col_expr(Column::Images, Expr::value(serde_json::to_value(images)?));
        }
        if let Some(video) = &input.video {
            query = query.col_expr(Column::Video, Expr::value(video.clone()));
        }
        if let Some(color) = &input.color {
            query = query.col_expr(Column::Color, Expr::value(color.clone()));
        }

        query
            .exec_with_returning(db)
            .await?
            .into_iter()
            .next()
            .map(Project::from)
            .ok_or_else(|| AppError::NotFound("Project".to_string()))
    }
}

/// Read a JSON array column back into strings, skipping anything that is not one
fn string_list(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

// Conversion from SeaORM model to our domain model
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            category: m.category,
            tags: string_list(m.tags),
            image: m.image,
            images: string_list(m.images),
            video: m.video,
            color: m.color,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_list_skips_non_strings() {
        assert_eq!(string_list(json!(["a", 1, null, "b"])), vec!["a", "b"]);
        assert!(string_list(json!(null)).is_empty());
        assert!(string_list(json!("a,b")).is_empty());
    }
}
