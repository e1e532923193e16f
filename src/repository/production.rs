//! Production record repository

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use super::where_clause;
use crate::{
    error::{AppError, AppResult},
    models::production::{NewProduction, ProductionFilter, ProductionRecord},
};

pub const DUPLICATE_ENTRY: &str =
    "A production entry already exists for this employee, equipment, date and type";

#[derive(Clone)]
pub struct ProductionRepository {
    pool: Pool<Postgres>,
}

impl ProductionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List production records, newest first
    pub async fn list(&self, filter: &ProductionFilter) -> AppResult<Vec<ProductionRecord>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        macro_rules! add_condition {
            ($field:expr, $sql:literal) => {
                if $field.is_some() {
                    conditions.push(format!($sql, idx));
                    idx += 1;
                }
            };
        }

        add_condition!(filter.start_date, "date >= ${}");
        add_condition!(filter.end_date, "date <= ${}");
        add_condition!(filter.employee_id, "employee_id = ${}");
        add_condition!(filter.equipment_id, "equipment_id = ${}");

        let query = format!(
            "SELECT * FROM production {} ORDER BY timestamp DESC, id DESC",
            where_clause(&conditions)
        );

        let mut builder = sqlx::query_as::<_, ProductionRecord>(&query);
        if let Some(start) = filter.start_date {
            builder = builder.bind(start);
        }
        if let Some(end) = filter.end_date {
            builder = builder.bind(end);
        }
        if let Some(employee_id) = filter.employee_id {
            builder = builder.bind(employee_id);
        }
        if let Some(equipment_id) = filter.equipment_id {
            builder = builder.bind(equipment_id);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Whole journal, for batch reconciliation
    pub async fn all(&self) -> AppResult<Vec<ProductionRecord>> {
        let rows = sqlx::query_as::<_, ProductionRecord>("SELECT * FROM production ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ProductionRecord> {
        sqlx::query_as::<_, ProductionRecord>("SELECT * FROM production WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Production record {} not found", id)))
    }

    /// Lock a record for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<ProductionRecord> {
        sqlx::query_as::<_, ProductionRecord>("SELECT * FROM production WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Production record {} not found", id)))
    }

    /// Whether another record already holds the (employee, equipment, date, type) slot
    pub async fn entry_exists(
        &self,
        employee_id: i32,
        equipment_id: i32,
        date: NaiveDate,
        is_reset: bool,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM production
                WHERE employee_id = $1 AND equipment_id = $2 AND date = $3 AND is_reset = $4
                  AND ($5::int IS NULL OR id <> $5)
            )
            "#,
        )
        .bind(employee_id)
        .bind(equipment_id)
        .bind(date)
        .bind(is_reset)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn exists_for_employee(&self, employee_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM production WHERE employee_id = $1)")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn insert(&self, conn: &mut PgConnection, data: &NewProduction) -> AppResult<ProductionRecord> {
        sqlx::query_as::<_, ProductionRecord>(
            r#"
            INSERT INTO production
                (employee_id, employee_name, equipment_id, equipment_model, quantity, date, is_reset)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(data.equipment_id)
        .bind(&data.equipment_model)
        .bind(data.quantity)
        .bind(data.date)
        .bind(data.is_reset)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_ENTRY))
    }

    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &NewProduction,
    ) -> AppResult<ProductionRecord> {
        sqlx::query_as::<_, ProductionRecord>(
            r#"
            UPDATE production
            SET employee_id = $1, employee_name = $2, equipment_id = $3, equipment_model = $4,
                quantity = $5, date = $6, is_reset = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(data.equipment_id)
        .bind(&data.equipment_model)
        .bind(data.quantity)
        .bind(data.date)
        .bind(data.is_reset)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_ENTRY))?
        .ok_or_else(|| AppError::NotFound(format!("Production record {} not found", id)))
    }

    /// Delete a record; its spawned movement goes with it (ON DELETE CASCADE)
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM production WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Production record {} not found", id)));
        }
        Ok(())
    }
}
