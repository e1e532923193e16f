//! Manual movement service
//!
//! Manual movements move `currentStock` in their direction. Movements
//! mirrored from production are read-only here; they follow their
//! production record.

use crate::{
    error::{AppError, AppResult},
    models::{
        check_quantity,
        movement::{CreateMovement, Movement, MovementFilter, MovementQuery, NewMovement, UpdateMovement},
        parse_day, parse_optional_day,
    },
    repository::Repository,
    services::reconciliation::{
        create_effect, delete_effect, update_effects, update_lock_order, LedgerEntry,
    },
};

const PRODUCTION_MOVEMENT: &str =
    "Movements generated by production can only be changed through their production record";

#[derive(Clone)]
pub struct MovementsService {
    repository: Repository,
}

impl MovementsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &MovementQuery) -> AppResult<Vec<Movement>> {
        let filter = MovementFilter {
            start_date: parse_optional_day("startDate", query.start_date.as_deref())?,
            end_date: parse_optional_day("endDate", query.end_date.as_deref())?,
            equipment_id: query.equipment_id,
            movement_type: query.movement_type,
        };
        self.repository.movements.list(&filter).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Movement> {
        self.repository.movements.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateMovement) -> AppResult<Movement> {
        check_quantity(data.quantity)?;
        let date = parse_day("date", &data.date)?;

        let mut tx = self.repository.begin().await?;
        let equipment = self
            .repository
            .equipment
            .lock_active(&mut tx, data.equipment_id)
            .await?;

        let movement = self
            .repository
            .movements
            .insert(
                &mut tx,
                &NewMovement {
                    equipment_id: equipment.id,
                    equipment_name: equipment.model_name,
                    quantity: data.quantity,
                    movement_type: data.movement_type,
                    description: data.description.trim().to_string(),
                    date,
                    production_id: None,
                },
            )
            .await?;

        let (equipment_id, delta) = create_effect(LedgerEntry::from(&movement));
        self.repository
            .equipment
            .apply_delta_checked(&mut tx, equipment_id, delta)
            .await?;
        tx.commit().await?;

        tracing::info!(
            movement_id = movement.id,
            equipment_id,
            movement_type = %movement.movement_type,
            quantity = movement.quantity,
            "Movement recorded"
        );
        Ok(movement)
    }

    pub async fn update(&self, id: i32, data: &UpdateMovement) -> AppResult<Movement> {
        if let Some(quantity) = data.quantity {
            check_quantity(quantity)?;
        }
        let date = parse_optional_day("date", data.date.as_deref())?;

        let mut tx = self.repository.begin().await?;
        let old = self.repository.movements.lock(&mut tx, id).await?;
        if !old.is_manual() {
            return Err(AppError::Validation(PRODUCTION_MOVEMENT.to_string()));
        }

        let target = data.equipment_id.unwrap_or(old.equipment_id);
        let mut equipment_name = old.equipment_name.clone();
        for (equipment_id, must_be_live) in update_lock_order(old.equipment_id, target) {
            if must_be_live {
                equipment_name = self
                    .repository
                    .equipment
                    .lock_active(&mut tx, equipment_id)
                    .await?
                    .model_name;
            } else {
                self.repository.equipment.lock(&mut tx, equipment_id).await?;
            }
        }

        let next = NewMovement {
            equipment_id: target,
            equipment_name,
            quantity: data.quantity.unwrap_or(old.quantity),
            movement_type: data.movement_type.unwrap_or(old.movement_type),
            description: data
                .description
                .as_deref()
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| old.description.clone()),
            date: date.unwrap_or(old.date),
            production_id: None,
        };

        let movement = self.repository.movements.update(&mut tx, id, &next).await?;

        let mut effects = update_effects(LedgerEntry::from(&old), LedgerEntry::from(&movement));
        effects.sort_by_key(|(equipment_id, _)| *equipment_id);
        for (equipment_id, delta) in effects {
            self.repository
                .equipment
                .apply_delta_checked(&mut tx, equipment_id, delta)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(movement_id = id, "Movement updated");
        Ok(movement)
    }

    /// Delete a manual movement and reverse its effect.
    ///
    /// Removing an `entrada` whose units were already taken out is refused.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        let movement = self.repository.movements.lock(&mut tx, id).await?;
        if !movement.is_manual() {
            return Err(AppError::Validation(PRODUCTION_MOVEMENT.to_string()));
        }
        self.repository.movements.delete(&mut tx, id).await?;

        let (equipment_id, delta) = delete_effect(LedgerEntry::from(&movement));
        self.repository
            .equipment
            .apply_delta_checked(&mut tx, equipment_id, delta)
            .await?;
        tx.commit().await?;

        tracing::info!(movement_id = id, equipment_id, "Movement deleted");
        Ok(())
    }
}
