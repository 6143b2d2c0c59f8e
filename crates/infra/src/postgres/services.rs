//! Postgres services catalog store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use velora_catalog::model::{Service, ServiceDraft};
use velora_catalog::repository::ServiceRepository;
use velora_core::{ServiceId, StoreError, StoreResult};

use super::map_sqlx_error;

const COLUMNS: &str = "id, name, description, duration, price, image_url, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresServiceStore {
    pool: PgPool,
}

impl PostgresServiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PostgresServiceStore {
    #[instrument(skip(self, draft), err)]
    async fn insert(&self, draft: ServiceDraft) -> StoreResult<Service> {
        let row = sqlx::query(&format!(
            "INSERT INTO services (name, description, duration, price, image_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.duration)
        .bind(draft.price)
        .bind(&draft.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        service_from_row(row)
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ServiceId) -> StoreResult<Option<Service>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM services WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.map(service_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> StoreResult<Vec<Service>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM services ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.into_iter().map(service_from_row).collect()
    }

    #[instrument(skip(self, draft), err)]
    async fn update(&self, id: ServiceId, draft: ServiceDraft) -> StoreResult<Option<Service>> {
        let row = sqlx::query(&format!(
            "UPDATE services SET \
                name = $1, description = $2, duration = $3, price = $4, image_url = $5, \
                updated_at = NOW() \
             WHERE id = $6 \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.duration)
        .bind(draft.price)
        .bind(&draft.image_url)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.map(service_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ServiceId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug)]
struct ServiceRow {
    id: i64,
    name: String,
    description: String,
    duration: i32,
    price: f64,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for ServiceRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ServiceRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            duration: row.try_get("duration")?,
            price: row.try_get("price")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn service_from_row(row: PgRow) -> StoreResult<Service> {
    let row = ServiceRow::from_row(&row)
        .map_err(|e| StoreError::other(format!("failed to read service row: {e}")))?;

    Ok(Service {
        id: ServiceId::from_i64(row.id),
        name: row.name,
        description: row.description,
        duration: row.duration,
        price: row.price,
        image_url: row.image_url,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
