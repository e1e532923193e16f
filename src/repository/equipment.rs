//! Equipment ledger repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CounterDelta, Equipment, StockCounters},
};

const DUPLICATE_MODEL: &str = "An equipment with this model already exists";

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment ordered by model name
    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<Equipment>> {
        let query = if include_archived {
            "SELECT * FROM equipment ORDER BY model_name"
        } else {
            "SELECT * FROM equipment WHERE archived_at IS NULL ORDER BY model_name"
        };
        let rows = sqlx::query_as::<_, Equipment>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID, archived or not
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn find_by_model_name(&self, model_name: &str) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE model_name = $1")
            .bind(model_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Lock a live equipment row for the rest of the transaction
    pub async fn lock_active(&self, conn: &mut PgConnection, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE id = $1 AND archived_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Lock an equipment row whether archived or not
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn create(&self, model_name: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "INSERT INTO equipment (model_name) VALUES ($1) RETURNING *",
        )
        .bind(model_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_MODEL))
    }

    pub async fn rename(&self, conn: &mut PgConnection, id: i32, model_name: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET model_name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(model_name)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_MODEL))?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Atomically add a delta to the counters, clamping each at zero.
    ///
    /// A single UPDATE statement, so concurrent writers cannot lose each
    /// other's increments.
    pub async fn apply_delta(
        &self,
        conn: &mut PgConnection,
        id: i32,
        delta: CounterDelta,
    ) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET current_stock = GREATEST(current_stock + $1, 0),
                total_resets = GREATEST(total_resets + $2, 0),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(delta.current_stock)
        .bind(delta.total_resets)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Apply a delta after checking it under the row lock.
    ///
    /// A delta that would take `currentStock` below zero is refused, so the
    /// zero floor of [`apply_delta`](Self::apply_delta) is never reached by
    /// an accepted write.
    pub async fn apply_delta_checked(
        &self,
        conn: &mut PgConnection,
        id: i32,
        delta: CounterDelta,
    ) -> AppResult<Equipment> {
        if delta.current_stock < 0 {
            let equipment = self.lock(&mut *conn, id).await?;
            if equipment.counters().checked_apply(delta).is_none() {
                return Err(AppError::Validation(format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    equipment.model_name, equipment.current_stock, -delta.current_stock
                )));
            }
        }
        self.apply_delta(conn, id, delta).await
    }

    /// Overwrite the counters with recomputed values
    pub async fn overwrite_counters(&self, id: i32, counters: StockCounters) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE equipment
            SET current_stock = $1, total_resets = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(counters.current_stock)
        .bind(counters.total_resets)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Soft delete: hide from listings and reject new references
    pub async fn archive(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE equipment SET archived_at = NOW(), updated_at = NOW() WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
