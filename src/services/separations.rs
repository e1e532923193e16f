//! MAC separation queue service

use crate::{
    error::{AppError, AppResult},
    models::{
        parse_day,
        separation::{CreateSeparation, MacSeparation, SeparationStatus},
    },
    repository::{separations::NewSeparation, Repository},
};

/// Size of the "all separations" listing
const RECENT_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct SeparationsService {
    repository: Repository,
}

impl SeparationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_by_date(&self, date: Option<&str>) -> AppResult<Vec<MacSeparation>> {
        let date = date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Query parameter 'date' is required".to_string()))?;
        let date = parse_day("date", date)?;
        self.repository.separations.list_by_date(date).await
    }

    pub async fn list_recent(&self) -> AppResult<Vec<MacSeparation>> {
        self.repository.separations.list_recent(RECENT_LIMIT).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MacSeparation> {
        self.repository.separations.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSeparation) -> AppResult<MacSeparation> {
        if data.quantity <= 0 {
            return Err(AppError::Validation("Quantity must be greater than zero".to_string()));
        }
        let date = parse_day("date", &data.date)?;
        let employee = self.repository.employees.get_by_id(data.employee_id).await?;
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;
        if equipment.archived_at.is_some() {
            return Err(AppError::NotFound(format!("Equipment {} not found", equipment.id)));
        }

        let separation = self
            .repository
            .separations
            .create(&NewSeparation {
                equipment_id: equipment.id,
                equipment_name: equipment.model_name,
                employee_id: employee.id,
                employee_name: employee.name,
                quantity: data.quantity,
                date,
                notes: data.notes.clone().unwrap_or_default(),
            })
            .await?;
        tracing::info!(separation_id = separation.id, "Separation queued");
        Ok(separation)
    }

    pub async fn update_status(&self, id: i32, status: &str) -> AppResult<MacSeparation> {
        let status: SeparationStatus = status.parse().map_err(AppError::Validation)?;
        let separation = self.repository.separations.update_status(id, status).await?;
        tracing::info!(separation_id = id, status = %status.as_str(), "Separation status changed");
        Ok(separation)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.separations.delete(id).await
    }
}
