//! MAC separation queue repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::separation::{MacSeparation, SeparationStatus},
};

/// Fields needed to insert a separation row
#[derive(Debug, Clone)]
pub struct NewSeparation {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub employee_id: i32,
    pub employee_name: String,
    pub quantity: i64,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Clone)]
pub struct SeparationsRepository {
    pool: Pool<Postgres>,
}

impl SeparationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<MacSeparation>> {
        let rows = sqlx::query_as::<_, MacSeparation>(
            "SELECT * FROM mac_separations WHERE date = $1 ORDER BY created_at DESC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<MacSeparation>> {
        let rows = sqlx::query_as::<_, MacSeparation>(
            "SELECT * FROM mac_separations ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MacSeparation> {
        sqlx::query_as::<_, MacSeparation>("SELECT * FROM mac_separations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Separation {} not found", id)))
    }

    pub async fn exists_for_employee(&self, employee_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM mac_separations WHERE employee_id = $1)",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &NewSeparation) -> AppResult<MacSeparation> {
        let row = sqlx::query_as::<_, MacSeparation>(
            r#"
            INSERT INTO mac_separations
                (equipment_id, equipment_name, employee_id, employee_name, quantity, date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(&data.equipment_name)
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(data.quantity)
        .bind(data.date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_status(&self, id: i32, status: SeparationStatus) -> AppResult<MacSeparation> {
        sqlx::query_as::<_, MacSeparation>(
            "UPDATE mac_separations SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Separation {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM mac_separations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Separation {} not found", id)));
        }
        Ok(())
    }
}
