//! Postgres customer store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use velora_core::{CustomerId, StoreError, StoreResult};
use velora_customers::model::{
    Customer, CustomerPatch, CustomerRole, CustomerStatus, Decision, NewCustomer,
};
use velora_customers::repository::CustomerRepository;

use super::map_sqlx_error;

const COLUMNS: &str = "id, first_name, last_name, email, password, phone, birth_date, \
                       status, role, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresCustomerStore {
    pool: PgPool,
}

impl PostgresCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerStore {
    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.map(customer_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> StoreResult<Vec<Customer>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.into_iter().map(customer_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_pending(&self) -> StoreResult<Vec<Customer>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM customers WHERE status = 'pending' ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_pending", e))?;

        rows.into_iter().map(customer_from_row).collect()
    }

    // The email never makes it into the span; the unique constraint answers
    // for duplicates at write time.
    #[instrument(skip(self, data), err)]
    async fn insert(&self, data: NewCustomer) -> StoreResult<Customer> {
        let row = sqlx::query(&format!(
            "INSERT INTO customers (first_name, last_name, email, password, phone, birth_date, status, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .bind(data.birth_date)
        .bind(data.status.as_str())
        .bind(data.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        customer_from_row(row)
    }

    #[instrument(skip(self), err)]
    async fn update_status(
        &self,
        id: CustomerId,
        decision: Decision,
    ) -> StoreResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "UPDATE customers SET status = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(decision.status().as_str())
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_status", e))?;

        row.map(customer_from_row).transpose()
    }

    // COALESCE keeps unsupplied fields at their current value, so the
    // overlay happens inside a single statement.
    #[instrument(skip(self, patch), err)]
    async fn merge_update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "UPDATE customers SET \
                first_name = COALESCE($1, first_name), \
                last_name = COALESCE($2, last_name), \
                phone = COALESCE($3, phone), \
                birth_date = COALESCE($4, birth_date), \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = $5 \
             RETURNING {COLUMNS}"
        ))
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.phone)
        .bind(patch.birth_date)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("merge_update", e))?;

        row.map(customer_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: CustomerId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn count_bookings_for(&self, id: CustomerId) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM bookings WHERE client_id = $1")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_bookings_for", e))?;

        row.try_get("total")
            .map_err(|e| StoreError::other(format!("failed to read booking count: {e}")))
    }
}

#[derive(Debug)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    phone: Option<String>,
    birth_date: Option<NaiveDate>,
    status: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for CustomerRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CustomerRow {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            phone: row.try_get("phone")?,
            birth_date: row.try_get("birth_date")?,
            status: row.try_get("status")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn customer_from_row(row: PgRow) -> StoreResult<Customer> {
    let row = CustomerRow::from_row(&row)
        .map_err(|e| StoreError::other(format!("failed to read customer row: {e}")))?;

    let status = CustomerStatus::parse(&row.status)
        .ok_or_else(|| StoreError::other(format!("unknown customer status '{}'", row.status)))?;
    let role = CustomerRole::parse(&row.role)
        .ok_or_else(|| StoreError::other(format!("unknown customer role '{}'", row.role)))?;

    Ok(Customer {
        id: CustomerId::from_i64(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        password_hash: row.password,
        phone: row.phone,
        birth_date: row.birth_date,
        status,
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
