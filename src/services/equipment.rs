//! Equipment service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CounterDelta, CreateEquipment, Equipment, UpdateEquipment},
        movement::{MovementType, NewMovement},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(false).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let model_name = data.model_name.trim();
        if model_name.is_empty() {
            return Err(AppError::Validation("Model name is required".to_string()));
        }
        if self.repository.equipment.find_by_model_name(model_name).await?.is_some() {
            return Err(AppError::Duplicate(
                "An equipment with this model already exists".to_string(),
            ));
        }

        let equipment = self.repository.equipment.create(model_name).await?;
        tracing::info!(equipment_id = equipment.id, model = %equipment.model_name, "Equipment created");
        Ok(equipment)
    }

    /// Rename and/or set the stock.
    ///
    /// A stock change is written as a manual adjustment movement so batch
    /// reconciliation can account for it.
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut tx = self.repository.begin().await?;
        let mut equipment = self.repository.equipment.lock_active(&mut tx, id).await?;

        if let Some(model_name) = data.model_name.as_deref().map(str::trim) {
            if model_name.is_empty() {
                return Err(AppError::Validation("Model name cannot be empty".to_string()));
            }
            if model_name != equipment.model_name {
                equipment = self.repository.equipment.rename(&mut tx, id, model_name).await?;
            }
        }

        if let Some(target) = data.current_stock {
            if target < 0 {
                return Err(AppError::Validation("Stock cannot be negative".to_string()));
            }
            let diff = target - equipment.current_stock;
            if diff != 0 {
                let movement_type = if diff > 0 {
                    MovementType::Inbound
                } else {
                    MovementType::Outbound
                };
                self.repository
                    .movements
                    .insert(
                        &mut tx,
                        &NewMovement {
                            equipment_id: id,
                            equipment_name: equipment.model_name.clone(),
                            quantity: diff.abs(),
                            movement_type,
                            description: "Ajuste manual de estoque".to_string(),
                            date: Utc::now().date_naive(),
                            production_id: None,
                        },
                    )
                    .await?;
                equipment = self
                    .repository
                    .equipment
                    .apply_delta(&mut tx, id, CounterDelta::stock(diff))
                    .await?;
                tracing::info!(
                    equipment_id = id,
                    from = target - diff,
                    to = equipment.current_stock,
                    "Stock adjusted manually"
                );
            }
        }

        tx.commit().await?;
        Ok(equipment)
    }

    /// Archive equipment; history keeps pointing at it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.archive(id).await?;
        tracing::info!(equipment_id = id, "Equipment archived");
        Ok(())
    }
}
