//! Movement journal repository

use sqlx::{PgConnection, Pool, Postgres};

use super::where_clause;
use crate::{
    error::{AppError, AppResult},
    models::movement::{Movement, MovementFilter, NewMovement},
};

#[derive(Clone)]
pub struct MovementsRepository {
    pool: Pool<Postgres>,
}

impl MovementsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List movements, newest first
    pub async fn list(&self, filter: &MovementFilter) -> AppResult<Vec<Movement>> {
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
        add_condition!(filter.equipment_id, "equipment_id = ${}");
        add_condition!(filter.movement_type, "movement_type = ${}");

        let query = format!(
            "SELECT * FROM movements {} ORDER BY timestamp DESC, id DESC",
            where_clause(&conditions)
        );

        let mut builder = sqlx::query_as::<_, Movement>(&query);
        if let Some(start) = filter.start_date {
            builder = builder.bind(start);
        }
        if let Some(end) = filter.end_date {
            builder = builder.bind(end);
        }
        if let Some(equipment_id) = filter.equipment_id {
            builder = builder.bind(equipment_id);
        }
        if let Some(movement_type) = filter.movement_type {
            builder = builder.bind(movement_type);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Manual movements only, for batch reconciliation
    pub async fn all_manual(&self) -> AppResult<Vec<Movement>> {
        let rows = sqlx::query_as::<_, Movement>(
            "SELECT * FROM movements WHERE production_id IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Movement> {
        sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movement {} not found", id)))
    }

    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Movement> {
        sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movement {} not found", id)))
    }

    pub async fn find_by_production(&self, production_id: i32) -> AppResult<Option<Movement>> {
        let row = sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE production_id = $1")
            .bind(production_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn insert(&self, conn: &mut PgConnection, data: &NewMovement) -> AppResult<Movement> {
        let row = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements
                (equipment_id, equipment_name, quantity, movement_type, description, date, production_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(&data.equipment_name)
        .bind(data.quantity)
        .bind(data.movement_type)
        .bind(&data.description)
        .bind(data.date)
        .bind(data.production_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Insert outside of any transaction
    pub async fn append(&self, data: &NewMovement) -> AppResult<Movement> {
        let mut conn = self.pool.acquire().await?;
        self.insert(&mut conn, data).await
    }

    /// Rewrite the fields of a production-spawned movement
    pub async fn sync_production(&self, id: i32, data: &NewMovement) -> AppResult<Movement> {
        let mut conn = self.pool.acquire().await?;
        self.update(&mut conn, id, data).await
    }

    pub async fn delete_for_production(&self, production_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM movements WHERE production_id = $1")
            .bind(production_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update(&self, conn: &mut PgConnection, id: i32, data: &NewMovement) -> AppResult<Movement> {
        sqlx::query_as::<_, Movement>(
            r#"
            UPDATE movements
            SET equipment_id = $1, equipment_name = $2, quantity = $3, movement_type = $4,
                description = $5, date = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(&data.equipment_name)
        .bind(data.quantity)
        .bind(data.movement_type)
        .bind(&data.description)
        .bind(data.date)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movement {} not found", id)))
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM movements WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Movement {} not found", id)));
        }
        Ok(())
    }
}
