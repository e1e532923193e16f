//! Repository layer for database operations

pub mod employees;
pub mod equipment;
pub mod movements;
pub mod production;
pub mod separations;
pub mod users;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub employees: employees::EmployeesRepository,
    pub equipment: equipment::EquipmentRepository,
    pub movements: movements::MovementsRepository,
    pub production: production::ProductionRepository,
    pub separations: separations::SeparationsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            employees: employees::EmployeesRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            movements: movements::MovementsRepository::new(pool.clone()),
            production: production::ProductionRepository::new(pool.clone()),
            separations: separations::SeparationsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction spanning several repositories
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database, used by the health endpoint
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Append a `WHERE` clause built from the given conditions
pub(crate) fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}
