use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use time::OffsetDateTime;

use crate::entity::profile::{self, ActiveModel, Column, Entity as ProfileEntity, PROFILE_ID};
use crate::error::AppResult;
use crate::models::Profile;

/// Repository for the singleton profile row
pub struct ProfileRepository;

impl ProfileRepository {
    /// Current profile, `None` if the row has never been written
    pub async fn get(db: &DatabaseConnection) -> AppResult<Option<Profile>> {
        let model = ProfileEntity::find_by_id(PROFILE_ID).one(db).await?;
        Ok(model.map(Into::into))
    }

    /// Upsert the profile image. `None` clears it.
    pub async fn set(db: &DatabaseConnection, profile_image: Option<String>) -> AppResult<Profile> {
        let model = ActiveModel {
            id: Set(PROFILE_ID),
            profile_image: Set(profile_image),
            updated_at: Set(OffsetDateTime::now_utc()),
        };

        let result = ProfileEntity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::ProfileImage, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(db)
            .await?;

        Ok(result.into())
    }

    /// Insert the empty singleton row unless it already exists.
    /// Concurrent callers race on the primary key, so a conflict is not an error.
    pub async fn ensure_exists(db: &DatabaseConnection) -> AppResult<()> {
        let model = ActiveModel {
            id: Set(PROFILE_ID),
            profile_image: Set(None),
            updated_at: Set(OffsetDateTime::now_utc()),
        };

        let inserted = ProfileEntity::insert(model)
            .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;

        if inserted > 0 {
            tracing::info!("Created profile row");
        }
        Ok(())
    }
}

impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Self {
            profile_image: m.profile_image,
            updated_at: m.updated_at,
        }
    }
}
