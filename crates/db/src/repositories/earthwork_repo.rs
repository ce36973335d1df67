//! Repository for the `earthworks` table.

use sqlx::PgPool;
use takeoff_core::types::DbId;

use crate::models::earthwork::{Earthwork, NewEarthwork};

const COLUMNS: &str = "id, project_section, input, result, created_at";

pub struct EarthworkRepo;

impl EarthworkRepo {
    pub async fn insert(pool: &PgPool, new: &NewEarthwork) -> Result<Earthwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO earthworks (project_section, input, result) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Earthwork>(&query)
            .bind(&new.project_section)
            .bind(&new.input)
            .bind(&new.result)
            .fetch_one(pool)
            .await
    }

    /// All earthwork records, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Earthwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM earthworks ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Earthwork>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Earthwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM earthworks WHERE id = $1");
        sqlx::query_as::<_, Earthwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
