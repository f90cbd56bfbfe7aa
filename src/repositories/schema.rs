use sea_orm::{
    sea_query::{ColumnDef, Table},
    ConnectionTrait, DatabaseBackend, DatabaseConnection, Schema, Statement, Value,
};

use crate::entity::{profile, project};
use crate::error::AppResult;
use crate::repositories::ProfileRepository;

const LIST_COLUMNS: [&str; 2] = ["tags", "images"];
const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// Create missing tables, add missing columns and seed the profile row.
/// Safe to repeat against a database that is already current.
pub async fn ensure_schema(db: &DatabaseConnection) -> AppResult<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let projects = schema
        .create_table_from_entity(project::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&projects)).await?;

    let profile = schema
        .create_table_from_entity(profile::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&profile)).await?;

    // Tables created before the carousel existed have no `images` column
    if !column_exists(db, "projects", "images").await? {
        let alter = Table::alter()
            .table(project::Entity)
            .add_column(
                ColumnDef::new(project::Column::Images)
                    .json_binary()
                    .not_null()
                    .default("[]"),
            )
            .to_owned();
        db.execute(backend.build(&alter)).await?;
        tracing::info!("Added images column to projects");
    }

    if backend == DatabaseBackend::Postgres {
        upgrade_legacy_columns(db).await?;
    }

    ProfileRepository::ensure_exists(db).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

/// Older PostgreSQL tables keep lists as `text[]` and timestamps without a
/// time zone. Rewrite them in place to the types the entity decodes.
async fn upgrade_legacy_columns(db: &DatabaseConnection) -> AppResult<()> {
    for column in LIST_COLUMNS {
        if column_type(db, "projects", column).await?.as_deref() != Some("ARRAY") {
            continue;
        }

        db.execute_unprepared(&format!(
            "ALTER TABLE projects ALTER COLUMN {column} DROP DEFAULT"
        ))
        .await?;
        db.execute_unprepared(&format!(
            "ALTER TABLE projects ALTER COLUMN {column} TYPE jsonb \
             USING COALESCE(to_jsonb({column}), '[]'::jsonb)"
        ))
        .await?;
        db.execute_unprepared(&format!(
            "ALTER TABLE projects ALTER COLUMN {column} SET DEFAULT '[]'::jsonb, \
             ALTER COLUMN {column} SET NOT NULL"
        ))
        .await?;
        tracing::info!(column, "Converted projects column from text[] to jsonb");
    }

    for column in TIMESTAMP_COLUMNS {
        if column_type(db, "projects", column).await?.as_deref()
            != Some("timestamp without time zone")
        {
            continue;
        }

        // Naive values are read as UTC
        db.execute_unprepared(&format!(
            "ALTER TABLE projects ALTER COLUMN {column} TYPE timestamptz \
             USING COALESCE({column}, LOCALTIMESTAMP) AT TIME ZONE 'UTC'"
        ))
        .await?;
        db.execute_unprepared(&format!(
            "ALTER TABLE projects ALTER COLUMN {column} SET NOT NULL"
        ))
        .await?;
        tracing::info!(column, "Converted projects column to timestamptz");
    }

    Ok(())
}

pub async fn column_exists(db: &DatabaseConnection, table: &str, column: &str) -> AppResult<bool> {
    Ok(column_type(db, table, column).await?.is_some())
}

/// Declared type of `table.column`, `None` when the column is missing.
/// PostgreSQL reports `information_schema` names such as `ARRAY` or `jsonb`.
pub async fn column_type(
    db: &DatabaseConnection,
    table: &str,
    column: &str,
) -> AppResult<Option<String>> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DatabaseBackend::Postgres => {
            "SELECT data_type::text AS data_type FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2"
        }
        // SQLite
        _ => "SELECT type AS data_type FROM pragma_table_info(?) WHERE name = ?",
    };

    let statement = Statement::from_sql_and_values(
        backend,
        sql,
        [Value::from(table), Value::from(column)],
    );

    match db.query_one(statement).await? {
        Some(row) => Ok(Some(row.try_get("", "data_type")?)),
        None => Ok(None),
    }
}
